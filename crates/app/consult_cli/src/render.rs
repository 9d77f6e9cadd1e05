//! Plain-text transcript rendering.

use chrono::Local;
use consult_core::{Message, MessageKind};

/// One transcript line: `[HH:MM] author: body`. Agent lines are prefixed so
/// they stand out from user lines.
pub fn line(message: &Message, compact: bool) -> String {
    let time = message.timestamp.with_timezone(&Local).format("%H:%M");
    let marker = match message.kind {
        MessageKind::Agent => "<<",
        MessageKind::User => ">>",
    };
    if compact {
        format!("{marker} {}", message.body)
    } else {
        format!("[{time}] {marker} {}: {}", message.author, message.body)
    }
}

/// Greeting shown when the transcript is empty.
pub fn welcome(compact: bool) -> &'static str {
    if compact {
        "Hi there! What business question can I help you with?"
    } else {
        "Welcome to your Business Consultant! I'm here to help you with strategic planning, \
         market analysis, operational improvements, and more. What business challenge can I \
         help you with today?"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use consult_core::AGENT_AUTHOR;

    fn message(kind: MessageKind, author: &str, body: &str) -> Message {
        Message {
            id: consult_core::uuid::message_id(),
            author: author.into(),
            body: body.into(),
            timestamp: Utc::now(),
            kind,
        }
    }

    #[test]
    fn full_line_includes_author() {
        let l = line(&message(MessageKind::Agent, AGENT_AUTHOR, "hello"), false);
        assert!(l.contains(AGENT_AUTHOR));
        assert!(l.ends_with("<< Business Consultant Agent: hello"));
    }

    #[test]
    fn compact_line_is_body_only() {
        let l = line(&message(MessageKind::User, "alice", "hi"), true);
        assert_eq!(l, ">> hi");
    }
}
