// @awa-component: CHAT-Responder
//
//! Stock-reply responder standing in for a real consulting agent.
//!
//! A reply is drawn uniformly at random from a fixed candidate list. The
//! inbound text is only logged; it never influences the choice.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::transcript::ChatError;

const FULL_REPLIES: [&str; 6] = [
    "That's an interesting business challenge. Let me help you think through some potential solutions and strategies.",
    "Based on your question, I'd recommend focusing on a few key areas: market analysis, operational efficiency, and strategic planning.",
    "Great question! In my experience with similar business situations, here are some approaches that have proven effective...",
    "Let's break this down systematically. First, we should consider your current position, then identify opportunities for improvement.",
    "I understand your concern. This is a common challenge many businesses face. Here's how I'd approach it...",
    "That's a strategic question that requires careful consideration of multiple factors including market conditions, resources, and timing.",
];

const COMPACT_REPLIES: [&str; 6] = [
    "Great question! Let me help you with that business challenge.",
    "I'd recommend focusing on market analysis and strategic planning for this.",
    "That's a common issue. Here's what I suggest...",
    "Let's break this down into actionable steps.",
    "Based on best practices, here's my recommendation...",
    "I can help you develop a strategy for that.",
];

/// Built-in candidate lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStyle {
    /// Long-form replies for the full-page chat.
    #[default]
    Full,
    /// Short replies for the popup chat.
    Compact,
}

impl ReplyStyle {
    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            ReplyStyle::Full => &FULL_REPLIES,
            ReplyStyle::Compact => &COMPACT_REPLIES,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyStyle::Full => "full",
            ReplyStyle::Compact => "compact",
        }
    }
}

impl fmt::Display for ReplyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplyStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(ReplyStyle::Full),
            "compact" => Ok(ReplyStyle::Compact),
            other => Err(format!("unknown reply style '{other}' (expected full or compact)")),
        }
    }
}

/// Picks a stock reply for an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responder {
    candidates: Vec<String>,
}

impl Responder {
    /// Build a responder over a custom candidate list.
    ///
    /// The list must be non-empty and every candidate must be non-empty.
    pub fn new(candidates: Vec<String>) -> Result<Self, ChatError> {
        if candidates.is_empty() {
            return Err(ChatError::Validation(
                "responder needs at least one candidate reply".into(),
            ));
        }
        if candidates.iter().any(|c| c.trim().is_empty()) {
            return Err(ChatError::Validation(
                "candidate replies must not be empty".into(),
            ));
        }
        Ok(Self { candidates })
    }

    pub fn with_style(style: ReplyStyle) -> Self {
        Self {
            candidates: style.candidates().iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Pick a reply using the thread-local RNG.
    pub fn generate(&self, input: &str) -> &str {
        self.generate_with(input, &mut rand::rng())
    }

    /// Pick a reply using the given RNG.
    pub fn generate_with<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> &str {
        trace!(input_len = input.len(), "generating stock reply");
        // `new` and `with_style` both guarantee a non-empty list.
        self.candidates
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::with_style(ReplyStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn both_styles_have_six_distinct_replies() {
        for style in [ReplyStyle::Full, ReplyStyle::Compact] {
            let mut c = style.candidates().to_vec();
            c.sort();
            c.dedup();
            assert_eq!(c.len(), 6, "{style} should have 6 distinct replies");
        }
    }

    #[test]
    fn generate_returns_candidate_for_any_input() {
        let responder = Responder::with_style(ReplyStyle::Compact);
        for input in ["", "   ", "What is my runway?", "🚀"] {
            let reply = responder.generate(input);
            assert!(!reply.is_empty());
            assert!(responder.candidates().iter().any(|c| c == reply));
        }
    }

    #[test]
    fn generate_ignores_input_content() {
        let responder = Responder::default();
        let a = responder.generate_with("pricing", &mut StdRng::seed_from_u64(7));
        let b = responder.generate_with("hiring", &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn generate_covers_every_candidate() {
        let responder = Responder::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1_000 {
            seen.insert(responder.generate_with("x", &mut rng).to_string());
        }
        assert_eq!(seen.len(), responder.candidates().len());
    }

    #[test]
    fn new_rejects_empty_lists() {
        assert!(Responder::new(vec![]).is_err());
        assert!(Responder::new(vec!["ok".into(), " ".into()]).is_err());
        assert!(Responder::new(vec!["ok".into()]).is_ok());
    }

    #[test]
    fn style_parses_case_insensitively() {
        assert_eq!("Compact".parse::<ReplyStyle>(), Ok(ReplyStyle::Compact));
        assert_eq!("full".parse::<ReplyStyle>(), Ok(ReplyStyle::Full));
        assert!("tiny".parse::<ReplyStyle>().is_err());
    }

    #[test]
    fn styles_key_hashed_collections() {
        let styles: std::collections::HashSet<ReplyStyle> =
            [ReplyStyle::Full, ReplyStyle::Compact, ReplyStyle::Full].into_iter().collect();
        assert_eq!(styles.len(), 2);
    }
}
