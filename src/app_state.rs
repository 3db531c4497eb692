//! Shared application state injected into all Axum handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::service::GuestbookService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Guestbook service for all business logic.
    pub guestbook: Arc<GuestbookService>,
    /// Process start, captured first thing in `main`; used to report uptime.
    pub started_at: Instant,
}

impl AppState {
    /// Creates state for a process that started at `started_at`.
    #[must_use]
    pub fn new(guestbook: Arc<GuestbookService>, started_at: Instant) -> Self {
        Self {
            guestbook,
            started_at,
        }
    }
}
