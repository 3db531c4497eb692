//! Guestbook service: composes the store and the renderer.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{Entry, NewEntry, SubmitOutcome};
use crate::error::GuestbookError;
use crate::persistence::GuestbookStore;
use crate::render::render_page;

/// Number of entries shown on the home page.
pub const RECENT_ENTRIES_LIMIT: u32 = 50;

/// Orchestration layer for all guestbook operations.
///
/// Stateless coordinator: every piece of shared state lives in the
/// [`GuestbookStore`], and each method is a fixed sequence of single
/// store round trips with no retries.
#[derive(Debug, Clone)]
pub struct GuestbookService {
    store: Arc<dyn GuestbookStore>,
}

impl GuestbookService {
    /// Creates a new `GuestbookService`.
    #[must_use]
    pub fn new(store: Arc<dyn GuestbookStore>) -> Self {
        Self { store }
    }

    /// Ensures the schema and counter row exist. Run once at startup.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::StorageUnavailable`]; the caller must not
    /// start serving traffic.
    pub async fn initialize(&self) -> Result<(), GuestbookError> {
        self.store.ensure_schema().await
    }

    /// Records one visit and returns the post-increment count.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::StorageUnavailable`] on store failure.
    pub async fn record_visit(&self) -> Result<u64, GuestbookError> {
        self.store.increment_visitors().await
    }

    /// Returns at most `limit` entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::StorageUnavailable`] on store failure.
    pub async fn recent_entries(&self, limit: u32) -> Result<Vec<Entry>, GuestbookError> {
        self.store.recent_entries(limit).await
    }

    /// Builds the home page: increments the counter, lists recent entries
    /// and renders both.
    ///
    /// Nothing is rendered if either store call fails.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::StorageUnavailable`] from either call.
    pub async fn home_page(&self, now: DateTime<Utc>) -> Result<String, GuestbookError> {
        let visitor_count = self.record_visit().await?;
        let entries = self.recent_entries(RECENT_ENTRIES_LIMIT).await?;
        Ok(render_page(visitor_count, &entries, now))
    }

    /// Sanitizes and persists a submission.
    ///
    /// Never fails: empty input yields [`SubmitOutcome::Skipped`] without
    /// touching the store, and a store failure is logged and swallowed as
    /// [`SubmitOutcome::Dropped`].
    pub async fn submit(&self, name: &str, message: &str) -> SubmitOutcome {
        let Some(entry) = NewEntry::sanitize(name, message) else {
            tracing::debug!("submission skipped: empty name or message");
            return SubmitOutcome::Skipped;
        };

        match self.store.insert_entry(&entry).await {
            Ok(id) => {
                tracing::debug!(id, "entry saved");
                SubmitOutcome::Saved { id }
            }
            Err(e) => {
                tracing::warn!(error = %e, "entry dropped");
                SubmitOutcome::Dropped
            }
        }
    }

    /// Returns `true` if the store answers a trivial round trip.
    pub async fn is_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "health check failed");
                false
            }
        }
    }

    /// Releases store resources.
    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}
