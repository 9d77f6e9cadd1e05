//! In-process message store.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{MessageStore, StoreError};
use crate::models::message::{Message, NewMessage};
use crate::uuid::message_id;

/// Message store backed by a `Vec` in insertion order.
///
/// Timestamps are clamped so they never run backwards relative to the
/// previous record, even if the wall clock does.
#[derive(Debug)]
pub struct MemoryMessageStore {
    messages: RwLock<Vec<Message>>,
    available: AtomicBool,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Toggle availability. While unavailable every operation fails with
    /// `StoreError::Unavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store is offline".into()))
        }
    }
}

impl Default for MemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn append(&self, message: NewMessage) -> Result<Message, StoreError> {
        self.check_available()?;
        let mut messages = self.messages.write().await;

        let now = Utc::now();
        let timestamp = match messages.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };

        let stored = Message {
            id: message_id(),
            author: message.author,
            body: message.body,
            timestamp,
            kind: message.kind,
        };
        messages.push(stored.clone());
        Ok(stored)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Message>, StoreError> {
        self.check_available()?;
        let messages = self.messages.read().await;
        Ok(messages.iter().rev().take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.check_available()?;
        Ok(self.messages.read().await.len() as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }

    fn name(&self) -> &str {
        "memory"
    }
}
