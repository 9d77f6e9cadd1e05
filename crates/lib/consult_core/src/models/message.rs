//! Chat message model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author name stamped on every agent message.
pub const AGENT_AUTHOR: &str = "Business Consultant Agent";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    User,
    Agent,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::User => "user",
            MessageKind::Agent => "agent",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(MessageKind::User),
            "agent" => Ok(MessageKind::Agent),
            other => Err(format!("unknown message kind '{other}'")),
        }
    }
}

/// A stored, immutable chat message.
///
/// `id` and `timestamp` are assigned by the store on insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub author: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub kind: MessageKind,
}

/// Input to `MessageStore::append`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub author: String,
    pub body: String,
    pub kind: MessageKind,
}

impl NewMessage {
    /// A user-authored message.
    pub fn user(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
            kind: MessageKind::User,
        }
    }

    /// An agent reply, always authored by [`AGENT_AUTHOR`].
    pub fn agent(body: impl Into<String>) -> Self {
        Self {
            author: AGENT_AUTHOR.to_string(),
            body: body.into(),
            kind: MessageKind::Agent,
        }
    }
}
