//! API server configuration.

use std::time::Duration;

use consult_core::{DEFAULT_RECENT_LIMIT, ReplyStyle};
use tracing::warn;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// Reply profile used by `POST /api/chat` when the request names none.
    pub default_profile: ReplyStyle,
    /// Upper bound on `GET /api/messages?limit=`.
    pub recent_limit: usize,
    /// Replaces the profile's thinking delay when set.
    pub thinking_delay: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3100".into(),
            default_profile: ReplyStyle::Full,
            recent_limit: DEFAULT_RECENT_LIMIT,
            thinking_delay: None,
        }
    }
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                  | Default          |
    /// |---------------------------|------------------|
    /// | `BIND_ADDR`               | `127.0.0.1:3100` |
    /// | `CHAT_PROFILE`            | `full`           |
    /// | `CHAT_THINKING_DELAY_MS`  | profile delay    |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same table as [`ApiConfig::from_env`], reading values from `lookup`.
    ///
    /// Unparseable values are logged and replaced by their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let default_profile =
            parse_setting(&lookup, "CHAT_PROFILE", |v| v.parse::<ReplyStyle>())
                .unwrap_or(defaults.default_profile);
        let thinking_delay = parse_setting(&lookup, "CHAT_THINKING_DELAY_MS", |v| {
            v.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| format!("invalid delay {v:?}: {e}"))
        });

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            default_profile,
            recent_limit: defaults.recent_limit,
            thinking_delay,
        }
    }
}

fn parse_setting<T, E: std::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Option<T> {
    let raw = lookup(key)?;
    match parse(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("ignoring {key}: {e}");
            None
        }
    }
}
