//! System endpoints: health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{HealthResponse, HealthStatus};
use crate::app_state::AppState;

/// `GET /health`: Store reachability and process uptime.
///
/// Never touches the visitor counter or the entries.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Pings the store and returns status, current timestamp and process uptime in seconds.",
    responses(
        (status = 200, description = "Store reachable", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (code, status) = if state.guestbook.is_healthy().await {
        (StatusCode::OK, HealthStatus::Ok)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::Error)
    };

    (
        code,
        Json(HealthResponse {
            status,
            timestamp: Utc::now().to_rfc3339(),
            uptime: state.started_at.elapsed().as_secs_f64(),
        }),
    )
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
