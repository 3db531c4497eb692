//! Guestbook entries and sanitized submissions.
//!
//! [`Entry`] is a persisted, immutable guestbook row. [`NewEntry`] is the
//! only way to build input for the store: it trims both fields, rejects
//! empty-after-trim input, and truncates over-length input to the column
//! limits.

use chrono::{DateTime, Utc};

/// Maximum number of characters kept from a submitted name.
pub const MAX_NAME_CHARS: usize = 100;

/// Maximum number of characters kept from a submitted message.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// A stored row from the `entries` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Auto-increment row ID.
    pub id: i64,
    /// Signer name, 1–100 characters.
    pub name: String,
    /// Message body, 1–500 characters.
    pub message: String,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A validated submission ready to be persisted.
///
/// Fields are private so an unsanitized value can never reach the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    name: String,
    message: String,
}

impl NewEntry {
    /// Trims and truncates raw form input.
    ///
    /// Returns `None` when either field is empty after trimming. Over-length
    /// input is truncated to [`MAX_NAME_CHARS`] / [`MAX_MESSAGE_CHARS`]
    /// characters, never rejected.
    #[must_use]
    pub fn sanitize(name: &str, message: &str) -> Option<Self> {
        let name = clamp(name, MAX_NAME_CHARS)?;
        let message = clamp(message, MAX_MESSAGE_CHARS)?;
        Some(Self { name, message })
    }

    /// Returns the sanitized name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sanitized message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Counts characters, not bytes, so multi-byte input is never split.
/// A byte order mark is stripped along with whitespace.
fn clamp(raw: &str, max_chars: usize) -> Option<String> {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(max_chars).collect())
}
