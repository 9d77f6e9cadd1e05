//! Service health as reported by `GET /api/hello`.

use serde::Serialize;
use tracing::warn;

use crate::store::MessageStore;

/// Connectivity and size of a message store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreHealth {
    pub store: String,
    pub connected: bool,
    /// `None` when the store is unreachable or the count failed.
    pub message_count: Option<u64>,
}

/// Service banner with the crate version.
pub fn greeting() -> String {
    format!("Consult chat service v{}", super::version())
}

/// Ping the store and, when it answers, count its messages.
pub async fn check(store: &dyn MessageStore) -> StoreHealth {
    let (connected, message_count) = match store.ping().await {
        Ok(()) => match store.count().await {
            Ok(n) => (true, Some(n)),
            Err(e) => {
                warn!(store = store.name(), "message count failed: {e}");
                (true, None)
            }
        },
        Err(e) => {
            warn!(store = store.name(), "store check failed: {e}");
            (false, None)
        }
    };

    StoreHealth {
        store: store.name().to_string(),
        connected,
        message_count,
    }
}
