//! Domain layer: guestbook entries and submission outcomes.
//!
//! The visitor counter has no domain type of its own; it lives entirely in
//! the store and is only ever observed as the value returned by an atomic
//! increment.

pub mod entry;
pub mod outcome;

pub use entry::{Entry, MAX_MESSAGE_CHARS, MAX_NAME_CHARS, NewEntry};
pub use outcome::SubmitOutcome;
