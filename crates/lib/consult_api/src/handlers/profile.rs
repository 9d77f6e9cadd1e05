//! Profile dashboard handler.

use axum::Json;
use consult_core::models::dashboard::Dashboard;

/// `GET /api/profile` — mock profile dashboard.
pub async fn profile_handler() -> Json<Dashboard> {
    Json(consult_core::dashboard::mock_dashboard())
}
