//! Guestbook error types with HTTP status code mapping.
//!
//! [`GuestbookError`] is the central error type for the service. Each
//! variant maps to an HTTP status code. Because the only user-facing
//! surface that can fail is the rendered home page, the response body is
//! the generic failure document rather than structured JSON.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::render::FAILURE_PAGE;

/// Server-side error enum with HTTP status code mapping.
///
/// Skipped submissions are not errors; see
/// [`crate::domain::SubmitOutcome::Skipped`].
#[derive(Debug, thiserror::Error)]
pub enum GuestbookError {
    /// The store could not be reached or a query failed.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GuestbookError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::StorageUnavailable(_) | Self::InvalidConfig(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Wraps any displayable store error as [`GuestbookError::StorageUnavailable`].
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

impl IntoResponse for GuestbookError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (self.status_code(), Html(FAILURE_PAGE)).into_response()
    }
}
