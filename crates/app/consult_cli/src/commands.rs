//! Subcommand implementations.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use consult_core::{ChatError, Message, MessageKind, Transcript, TranscriptProfile};
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use crate::client::{ApiClient, HttpMessageStore};
use crate::render;
use crate::{Error, Result};

fn require_author(author: Option<&str>) -> Result<String> {
    match author.map(str::trim) {
        Some(a) if !a.is_empty() => Ok(a.to_string()),
        _ => Err(Error::Custom(
            "an author name is required (--author or CONSULT_AUTHOR)".into(),
        )),
    }
}

/// Print the messages after `last_seen` in a chronological list and advance
/// `last_seen`. Everything is printed when `last_seen` is not in the list.
fn print_new(messages: &[Message], last_seen: &mut Option<Uuid>, compact: bool) {
    let start = last_seen
        .and_then(|id| messages.iter().position(|m| m.id == id))
        .map_or(0, |i| i + 1);
    for m in &messages[start..] {
        println!("{}", render::line(m, compact));
    }
    if let Some(last) = messages.last() {
        *last_seen = Some(last.id);
    }
}

fn chronological(mut newest_first: Vec<Message>) -> Vec<Message> {
    newest_first.reverse();
    newest_first
}

pub async fn history(api: &ApiClient, limit: usize, follow: bool, interval: Duration) -> Result<()> {
    let mut last_seen = None;
    let messages = chronological(api.messages(limit).await?);
    if messages.is_empty() && !follow {
        println!("{}", render::welcome(false));
    }
    print_new(&messages, &mut last_seen, false);

    while follow {
        tokio::time::sleep(interval).await;
        match api.messages(limit).await {
            Ok(batch) => print_new(&chronological(batch), &mut last_seen, false),
            // Keep following through transient outages.
            Err(e) => warn!("poll failed: {e}"),
        }
    }
    Ok(())
}

pub async fn send(
    api: &ApiClient,
    author: Option<&str>,
    body: &str,
    agent: bool,
    in_response_to: Option<&str>,
) -> Result<()> {
    if body.trim().is_empty() {
        return Err(Error::Custom("message body must not be empty".into()));
    }
    let stored = if agent {
        api.send_agent_response(body, in_response_to).await?
    } else {
        let author = require_author(author)?;
        api.send_message(&author, body.trim(), MessageKind::User)
            .await?
    };
    info!("stored message {}", stored.id);
    println!("{}", render::line(&stored, false));
    Ok(())
}

/// Interactive loop: one user turn per line, each followed by the agent turn.
pub async fn chat(api: &ApiClient, author: Option<&str>, compact: bool) -> Result<()> {
    let author = require_author(author)?;
    let profile = if compact {
        TranscriptProfile::compact()
    } else {
        TranscriptProfile::full()
    };
    let transcript = Transcript::new(Arc::new(HttpMessageStore::new(api.clone())), profile);

    let mut last_seen = None;
    let messages = transcript.messages().await?;
    if messages.is_empty() {
        println!("{}", render::welcome(compact));
    }
    print_new(&messages, &mut last_seen, compact);
    println!("(type /quit to leave)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let text = line.trim();
        if text == "/quit" {
            break;
        }
        if text.is_empty() {
            continue;
        }

        let submission = match transcript.submit(&author, text).await {
            Ok(s) => s,
            Err(ChatError::Validation(msg)) => {
                warn!("{msg}");
                continue;
            }
            Err(e) => {
                warn!("message not sent: {e}");
                println!("! message not sent");
                continue;
            }
        };
        println!("{}", if compact { "Thinking..." } else { "Agent is thinking..." });

        if let Err(e) = submission.agent_reply().await {
            warn!("agent reply not stored: {e}");
            println!("! the agent could not answer");
        }

        match transcript.messages().await {
            Ok(messages) => print_new(&messages, &mut last_seen, compact),
            Err(e) => warn!("could not refresh transcript: {e}"),
        }
    }
    Ok(())
}
