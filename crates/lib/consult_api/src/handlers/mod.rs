//! Request handlers.

pub mod chat;
pub mod hello;
pub mod messages;
pub mod profile;
