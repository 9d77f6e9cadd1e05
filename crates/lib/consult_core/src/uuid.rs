// Message ids are UUIDv7 so that id order follows insertion time even when
// two rows share a timestamp. Generated app-side for both store adapters.

use uuid::Uuid;

/// Generate a new message id.
pub fn message_id() -> Uuid {
    Uuid::now_v7()
}
