//! Chat turns accepted by `POST /api/chat`.
//!
//! An author has at most one turn waiting on its agent reply, whatever
//! profile the request picks. Authors are tracked only while a reply is
//! pending and are released as soon as the reply task finishes, so the set
//! stays as small as the number of in-flight turns.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use consult_core::transcript::validate_send;
use consult_core::{ChatError, Message, MessageStore, ReplyStyle, Transcript, TranscriptProfile};
use tracing::{debug, warn};

type PendingAuthors = Arc<Mutex<HashSet<String>>>;

/// A stored user turn whose agent reply is scheduled.
#[derive(Debug)]
pub struct AcceptedTurn {
    pub user_message: Message,
    pub thinking_delay: Duration,
}

/// Removes the author from the pending set when dropped.
struct PendingTurn {
    author: String,
    pending: PendingAuthors,
}

impl PendingTurn {
    fn claim(pending: &PendingAuthors, author: &str) -> Option<Self> {
        let mut authors = pending.lock().unwrap_or_else(PoisonError::into_inner);
        authors.insert(author.to_string()).then(|| Self {
            author: author.to_string(),
            pending: Arc::clone(pending),
        })
    }
}

impl Drop for PendingTurn {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.author);
    }
}

pub struct ChatSessions {
    store: Arc<dyn MessageStore>,
    thinking_delay: Option<Duration>,
    pending: PendingAuthors,
}

impl ChatSessions {
    pub fn new(store: Arc<dyn MessageStore>, thinking_delay: Option<Duration>) -> Self {
        Self {
            store,
            thinking_delay,
            pending: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Profile for `style`, with the configured delay override applied.
    pub fn profile(&self, style: ReplyStyle) -> TranscriptProfile {
        let profile = TranscriptProfile::for_style(style);
        match self.thinking_delay {
            Some(delay) => profile.with_thinking_delay(delay),
            None => profile,
        }
    }

    /// Store the user turn and schedule the agent reply.
    ///
    /// Fails with [`ChatError::Busy`] while an earlier reply for the same
    /// author is pending, even if that turn used another profile.
    pub async fn submit(
        &self,
        author: &str,
        body: &str,
        style: ReplyStyle,
    ) -> Result<AcceptedTurn, ChatError> {
        let (author, body) = validate_send(author, body)?;
        let turn = PendingTurn::claim(&self.pending, &author).ok_or(ChatError::Busy)?;

        let transcript = Transcript::new(Arc::clone(&self.store), self.profile(style));
        let thinking_delay = transcript.profile().thinking_delay;
        let submission = transcript.submit(&author, &body).await?;

        let reply = submission.reply;
        tokio::spawn(async move {
            match reply.await {
                Ok(Ok(m)) => debug!(id = %m.id, author = %turn.author, "chat turn complete"),
                Ok(Err(e)) => warn!(author = %turn.author, "chat turn ended without a reply: {e}"),
                Err(e) => warn!(author = %turn.author, "reply task failed: {e}"),
            }
            drop(turn);
        });

        Ok(AcceptedTurn {
            user_message: submission.user_message,
            thinking_delay,
        })
    }

    /// Whether `author` has a reply pending.
    pub fn is_pending(&self, author: &str) -> bool {
        self.lock_pending().contains(author)
    }

    /// Number of authors with a reply pending.
    pub fn pending_len(&self) -> usize {
        self.lock_pending().len()
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consult_core::MessageKind;
    use consult_core::store::MemoryMessageStore;

    fn sessions(delay: Option<Duration>) -> (Arc<MemoryMessageStore>, ChatSessions) {
        let store = Arc::new(MemoryMessageStore::new());
        let sessions = ChatSessions::new(store.clone(), delay);
        (store, sessions)
    }

    #[test]
    fn profile_applies_delay_override() {
        let (_, plain) = sessions(None);
        assert_eq!(
            plain.profile(ReplyStyle::Full).thinking_delay,
            Duration::from_millis(1500)
        );

        let (_, fast) = sessions(Some(Duration::from_millis(5)));
        let compact = fast.profile(ReplyStyle::Compact);
        assert_eq!(compact.thinking_delay, Duration::from_millis(5));
        assert!(compact.compact_layout);
    }

    #[tokio::test(start_paused = true)]
    async fn switching_profile_does_not_bypass_pending_reply() {
        let (store, sessions) = sessions(Some(Duration::from_millis(500)));

        sessions.submit("alice", "one", ReplyStyle::Full).await.unwrap();
        let err = sessions
            .submit("alice", "two", ReplyStyle::Compact)
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::Busy));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn authors_are_independent() {
        let (store, sessions) = sessions(Some(Duration::from_millis(500)));

        sessions.submit("alice", "one", ReplyStyle::Full).await.unwrap();
        sessions.submit("bob", "two", ReplyStyle::Full).await.unwrap();

        assert_eq!(sessions.pending_len(), 2);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn pending_set_empties_after_replies() {
        let (store, sessions) = sessions(Some(Duration::from_millis(100)));

        for author in ["alice", "bob", "carol"] {
            sessions.submit(author, "hi", ReplyStyle::Compact).await.unwrap();
        }
        assert_eq!(sessions.pending_len(), 3);

        tokio::time::sleep(Duration::from_millis(150)).await;
        // let the watcher tasks observe the finished replies
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(sessions.pending_len(), 0);
        assert_eq!(store.count().await.unwrap(), 6);

        let again = sessions.submit("alice", "again", ReplyStyle::Full).await.unwrap();
        assert_eq!(again.user_message.kind, MessageKind::User);
    }

    #[tokio::test]
    async fn store_failure_releases_author() {
        let (store, sessions) = sessions(Some(Duration::from_millis(5)));
        store.set_available(false);

        let err = sessions.submit("alice", "hi", ReplyStyle::Full).await.unwrap_err();
        assert!(matches!(err, ChatError::Store(_)));
        assert!(!sessions.is_pending("alice"));
    }

    #[tokio::test]
    async fn validation_runs_before_claiming() {
        let (_, sessions) = sessions(None);

        let err = sessions.submit("alice", "   ", ReplyStyle::Full).await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        assert_eq!(sessions.pending_len(), 0);
    }
}
