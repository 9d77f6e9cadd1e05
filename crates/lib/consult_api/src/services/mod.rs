//! Services shared by request handlers.

pub mod sessions;
