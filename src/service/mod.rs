//! Service layer: business logic orchestration.
//!
//! [`GuestbookService`] composes the visitor counter, the entry store and
//! the page renderer into the three request-level operations.

pub mod guestbook_service;

pub use guestbook_service::{GuestbookService, RECENT_ENTRIES_LIMIT};
