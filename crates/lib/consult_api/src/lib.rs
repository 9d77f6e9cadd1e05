//! # consult_api
//!
//! HTTP API library for Consult.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use consult_core::MessageStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{chat, hello, messages, profile};
use crate::services::sessions::ChatSessions;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Message store backing every transcript.
    pub store: Arc<dyn MessageStore>,
    /// API configuration.
    pub config: ApiConfig,
    /// Per-author chat sessions for `POST /api/chat`.
    pub sessions: Arc<ChatSessions>,
}

impl AppState {
    pub fn new(store: Arc<dyn MessageStore>, config: ApiConfig) -> Self {
        let sessions = Arc::new(ChatSessions::new(Arc::clone(&store), config.thinking_delay));
        Self {
            store,
            config,
            sessions,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::API_HELLO, get(hello::hello_world))
        .route(routes::API_PROFILE, get(profile::profile_handler))
        .route(
            routes::API_MESSAGES,
            get(messages::get_messages_handler).post(messages::send_message_handler),
        )
        .route(
            routes::API_MESSAGES_AGENT,
            post(messages::send_agent_response_handler),
        )
        .route(routes::API_CHAT, post(chat::chat_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
