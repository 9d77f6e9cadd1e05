//! Hello world endpoint — health check.

use axum::Json;
use axum::extract::State;
use consult_core::health;

use crate::AppState;
use crate::error::AppResult;
use crate::models::HelloWorldResponse;

/// `GET /api/hello` — verifies the core lib and store connectivity.
///
/// Always answers 200; an unreachable store shows up as `storeConnected: false`.
pub async fn hello_world(State(state): State<AppState>) -> AppResult<Json<HelloWorldResponse>> {
    let store = health::check(state.store.as_ref()).await;

    Ok(Json(HelloWorldResponse {
        greeting: health::greeting(),
        store: store.store,
        store_connected: store.connected,
        message_count: store.message_count,
    }))
}
