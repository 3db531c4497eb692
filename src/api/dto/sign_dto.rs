//! Guestbook submission form.

use serde::Deserialize;
use utoipa::ToSchema;

/// URL-encoded body of `POST /sign`.
///
/// Both fields are optional at the wire level; a missing field is treated
/// the same as an empty one.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SignForm {
    /// Signer name. Trimmed and truncated to 100 characters.
    #[serde(default)]
    pub name: Option<String>,
    /// Message body. Trimmed and truncated to 500 characters.
    #[serde(default)]
    pub message: Option<String>,
}
