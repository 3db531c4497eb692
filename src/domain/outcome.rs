//! Internal result of a guestbook submission.

use std::fmt;

/// What happened to a submission.
///
/// All three variants produce the same redirect for the visitor; the
/// distinction exists for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The entry was persisted with the given row ID.
    Saved {
        /// ID assigned by the store.
        id: i64,
    },
    /// Name or message was missing or empty after trimming; nothing was
    /// sent to the store.
    Skipped,
    /// The store failed and the error was swallowed.
    Dropped,
}

impl SubmitOutcome {
    /// Returns `true` if the entry reached the store.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved { id } => write!(f, "saved ({id})"),
            Self::Skipped => f.write_str("skipped"),
            Self::Dropped => f.write_str("dropped"),
        }
    }
}
