//! Route paths.

pub const API_HELLO: &str = "/api/hello";
pub const API_PROFILE: &str = "/api/profile";
pub const API_MESSAGES: &str = "/api/messages";
pub const API_MESSAGES_AGENT: &str = "/api/messages/agent";
pub const API_CHAT: &str = "/api/chat";
