//! HTTP endpoint handlers.

pub mod home;
pub mod sign;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes the guestbook and system routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(home::routes())
        .merge(sign::routes())
        .merge(system::routes())
}
