//! # consult_core
//!
//! Core domain logic for Consult: the message store, the stock-reply
//! responder and the transcript session that ties them together.

pub mod dashboard;
pub mod health;
pub mod models;
pub mod responder;
pub mod store;
pub mod transcript;
pub mod uuid;

pub use models::message::{AGENT_AUTHOR, Message, MessageKind, NewMessage};
pub use responder::{ReplyStyle, Responder};
pub use store::{DEFAULT_RECENT_LIMIT, MessageStore, StoreError};
pub use transcript::{ChatError, Submission, Transcript, TranscriptProfile};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
