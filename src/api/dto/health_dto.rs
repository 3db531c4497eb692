//! Health check DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// Store reachability as reported by `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// The store answered.
    Ok,
    /// The store did not answer.
    Error,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Store reachability.
    pub status: HealthStatus,
    /// Current time (RFC 3339).
    pub timestamp: String,
    /// Seconds since the process started.
    pub uptime: f64,
}
