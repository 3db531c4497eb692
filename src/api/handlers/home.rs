//! Home page handler.

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use chrono::Utc;

use crate::app_state::AppState;
use crate::error::GuestbookError;

/// `GET /`: Count the visit and render the guestbook.
///
/// # Errors
///
/// Returns [`GuestbookError::StorageUnavailable`] (rendered as the generic
/// failure page) if the counter or the entry listing fails.
#[utoipa::path(
    get,
    path = "/",
    tag = "Guestbook",
    summary = "Render the guestbook",
    description = "Increments the visitor counter, lists the 50 most recent entries and returns the rendered page.",
    responses(
        (status = 200, description = "Rendered guestbook page", body = String, content_type = "text/html"),
        (status = 500, description = "Generic failure page", body = String, content_type = "text/html"),
    )
)]
pub async fn home_handler(State(state): State<AppState>) -> Result<Html<String>, GuestbookError> {
    let page = state.guestbook.home_page(Utc::now()).await?;
    Ok(Html(page))
}

/// Home route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(home_handler))
}
