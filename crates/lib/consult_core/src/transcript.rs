// @awa-component: CHAT-Transcript
//
//! Transcript session — one chat view over a message store.
//!
//! Both the full-page chat and the popup chat run the same pipeline and
//! differ only by [`TranscriptProfile`]:
//!
//! 1. validate the input and refuse overlapping submissions,
//! 2. append the user message,
//! 3. after the profile's thinking delay, pick a stock reply and append it as
//!    an agent message.
//!
//! Step 3 runs on a detached task and always completes once step 2 has
//! succeeded, even if the caller goes away. The session keeps no copy of the
//! messages; every read goes back to the store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::models::message::{Message, NewMessage};
use crate::responder::{ReplyStyle, Responder};
use crate::store::{DEFAULT_RECENT_LIMIT, MessageStore, StoreError};

/// Thinking delay of the full-page chat.
pub const FULL_THINKING_DELAY: Duration = Duration::from_millis(1500);

/// Thinking delay of the popup chat.
pub const COMPACT_THINKING_DELAY: Duration = Duration::from_millis(1000);

/// Chat pipeline errors.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A reply is still pending")]
    Busy,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Reply task failed: {0}")]
    ReplyTask(String),
}

/// Per-view configuration of a transcript.
#[derive(Debug, Clone)]
pub struct TranscriptProfile {
    pub responder: Responder,
    pub thinking_delay: Duration,
    pub compact_layout: bool,
}

impl TranscriptProfile {
    pub fn full() -> Self {
        Self {
            responder: Responder::with_style(ReplyStyle::Full),
            thinking_delay: FULL_THINKING_DELAY,
            compact_layout: false,
        }
    }

    pub fn compact() -> Self {
        Self {
            responder: Responder::with_style(ReplyStyle::Compact),
            thinking_delay: COMPACT_THINKING_DELAY,
            compact_layout: true,
        }
    }

    pub fn for_style(style: ReplyStyle) -> Self {
        match style {
            ReplyStyle::Full => Self::full(),
            ReplyStyle::Compact => Self::compact(),
        }
    }

    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay;
        self
    }
}

impl Default for TranscriptProfile {
    fn default() -> Self {
        Self::full()
    }
}

/// Validate a user send. Returns the author and the trimmed body.
pub fn validate_send(author: &str, body: &str) -> Result<(String, String), ChatError> {
    let author = author.trim();
    if author.is_empty() {
        return Err(ChatError::Validation("author must not be empty".into()));
    }
    let body = body.trim();
    if body.is_empty() {
        return Err(ChatError::Validation("message body must not be empty".into()));
    }
    Ok((author.to_string(), body.to_string()))
}

/// Result of a successful submission.
#[derive(Debug)]
pub struct Submission {
    /// The stored user message.
    pub user_message: Message,
    /// Resolves to the stored agent reply.
    pub reply: JoinHandle<Result<Message, ChatError>>,
}

impl Submission {
    /// Wait for the agent reply to be stored.
    pub async fn agent_reply(self) -> Result<Message, ChatError> {
        self.reply
            .await
            .map_err(|e| ChatError::ReplyTask(e.to_string()))?
    }
}

/// Clears the busy flag when dropped.
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A chat view bound to a store and a profile.
#[derive(Clone)]
pub struct Transcript {
    store: Arc<dyn MessageStore>,
    profile: Arc<TranscriptProfile>,
    busy: Arc<AtomicBool>,
}

impl Transcript {
    pub fn new(store: Arc<dyn MessageStore>, profile: TranscriptProfile) -> Self {
        Self {
            store,
            profile: Arc::new(profile),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn profile(&self) -> &TranscriptProfile {
        &self.profile
    }

    pub fn store(&self) -> &Arc<dyn MessageStore> {
        &self.store
    }

    /// Whether a submission is waiting on its agent reply.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// The latest messages in chronological order, ready for rendering.
    pub async fn messages(&self) -> Result<Vec<Message>, ChatError> {
        let mut messages = self.store.recent(DEFAULT_RECENT_LIMIT).await?;
        messages.reverse();
        Ok(messages)
    }

    /// Submit a user turn and schedule the agent turn.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn submit(&self, author: &str, body: &str) -> Result<Submission, ChatError> {
        let (author, body) = validate_send(author, body)?;
        let guard = BusyGuard::acquire(&self.busy).ok_or(ChatError::Busy)?;

        let user_message = match self.store.append(NewMessage::user(author, body.clone())).await {
            Ok(m) => m,
            Err(e) => {
                warn!(store = self.store.name(), "failed to store user message: {e}");
                return Err(e.into());
            }
        };
        info!(id = %user_message.id, author = %user_message.author, "user message stored");

        let store = Arc::clone(&self.store);
        let profile = Arc::clone(&self.profile);
        let reply = tokio::spawn(async move {
            let _guard = guard;
            tokio::time::sleep(profile.thinking_delay).await;
            let text = profile.responder.generate(&body).to_string();
            match store.append(NewMessage::agent(text)).await {
                Ok(m) => {
                    debug!(id = %m.id, "agent reply stored");
                    Ok(m)
                }
                Err(e) => {
                    warn!(store = store.name(), "failed to store agent reply: {e}");
                    Err(ChatError::from(e))
                }
            }
        });

        Ok(Submission {
            user_message,
            reply,
        })
    }
}
