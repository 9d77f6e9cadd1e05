// @awa-component: CHAT-MessagesHandler
//
//! Message store request handlers: `SendMessage`, `GetMessages` and
//! `SendAgentResponse`.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use consult_core::transcript::validate_send;
use consult_core::NewMessage;
use tracing::debug;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{
    MessageListResponse, MessageResponse, RecentQuery, SendAgentResponseRequest,
    SendMessageRequest,
};

/// `GET /api/messages` — newest-first, at most `recent_limit` entries.
pub async fn get_messages_handler(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> AppResult<Json<MessageListResponse>> {
    let limit = query
        .limit
        .unwrap_or(state.config.recent_limit)
        .min(state.config.recent_limit);
    let messages = state.store.recent(limit).await?;
    Ok(Json(MessageListResponse {
        messages: messages.into_iter().map(MessageResponse::from).collect(),
    }))
}

/// `POST /api/messages` — append one message, `kind` defaults to user.
pub async fn send_message_handler(
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let (author, text) = validate_send(&body.author, &body.body)?;
    let message = state
        .store
        .append(NewMessage {
            author,
            body: text,
            kind: body.kind.unwrap_or_default(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(message.into())))
}

/// `POST /api/messages/agent` — append an agent reply.
///
/// The body is trimmed the same way as `POST /api/messages`.
///
/// `inResponseTo` is accepted for client compatibility; it is logged but not
/// stored.
pub async fn send_agent_response_handler(
    State(state): State<AppState>,
    Json(body): Json<SendAgentResponseRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let text = body.body.trim();
    if text.is_empty() {
        return Err(AppError::Validation("message body must not be empty".into()));
    }
    if let Some(prompt) = &body.in_response_to {
        debug!(prompt_len = prompt.len(), "agent response with inResponseTo");
    }
    let message = state.store.append(NewMessage::agent(text)).await?;
    Ok((StatusCode::CREATED, Json(message.into())))
}
