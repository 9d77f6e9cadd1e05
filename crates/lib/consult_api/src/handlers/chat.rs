//! Chat pipeline handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{ChatRequest, ChatResponse};

/// `POST /api/chat` — store the user turn and schedule the agent reply.
///
/// Answers `202 Accepted` once the user message is stored. The agent reply
/// lands in the store after the profile's thinking delay; clients pick it up
/// by polling `GET /api/messages`.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> AppResult<(StatusCode, Json<ChatResponse>)> {
    let style = body.profile.unwrap_or(state.config.default_profile);
    let turn = state.sessions.submit(&body.author, &body.body, style).await?;

    let reply_delay_ms = u64::try_from(turn.thinking_delay.as_millis()).unwrap_or(u64::MAX);
    info!(author = %turn.user_message.author, profile = %style, reply_delay_ms, "chat turn accepted");

    Ok((
        StatusCode::ACCEPTED,
        Json(ChatResponse {
            user_message: turn.user_message.into(),
            profile: style,
            reply_delay_ms,
        }),
    ))
}
