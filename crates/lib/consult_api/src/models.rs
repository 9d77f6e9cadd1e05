//! Request and response bodies.

use consult_core::{Message, MessageKind, ReplyStyle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelloWorldResponse {
    pub greeting: String,
    pub store: String,
    pub store_connected: bool,
    pub message_count: Option<u64>,
}

/// A stored message as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    pub author: String,
    pub body: String,
    pub timestamp: String,
    pub kind: MessageKind,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id.to_string(),
            author: m.author,
            body: m.body,
            timestamp: m.timestamp.to_rfc3339(),
            kind: m.kind,
        }
    }
}

/// Newest-first page of the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

/// `SendMessage`. Missing fields deserialize empty and fail validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub kind: Option<MessageKind>,
}

/// `SendAgentResponse`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAgentResponseRequest {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub in_response_to: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub profile: Option<ReplyStyle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub user_message: MessageResponse,
    pub profile: ReplyStyle,
    pub reply_delay_ms: u64,
}
