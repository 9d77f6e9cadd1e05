// @awa-component: CHAT-MessageStore
//
//! Append-only message store.
//!
//! The store assigns ids and timestamps, never mutates or deletes a record,
//! and serves bounded newest-first reads. It does not validate author or body;
//! callers guard their input before appending.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::message::{Message, NewMessage};

pub use memory::MemoryMessageStore;
pub use postgres::PgMessageStore;

/// Maximum number of messages returned by a transcript read.
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// Message store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// Ordered, append-only storage of chat messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist one message. The store assigns `id` and `timestamp`.
    async fn append(&self, message: NewMessage) -> Result<Message, StoreError>;

    /// Up to `limit` most recently appended messages, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<Message>, StoreError>;

    /// Total number of stored messages.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Check that the backing storage is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Store identifier for logging.
    fn name(&self) -> &str;
}
