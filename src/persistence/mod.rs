//! Persistence layer: the visitor counter and the entries table.
//!
//! All shared state lives behind [`GuestbookStore`]. The service holds no
//! cached copy of the counter; every read of it is the value returned by
//! an atomic increment. [`PostgresStore`] is the production backend and
//! [`MemoryStore`] stands in for it in tests and local runs.

pub mod memory;
pub mod postgres;

use std::fmt::Debug;

use crate::domain::{Entry, NewEntry};
use crate::error::GuestbookError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Fixed primary key of the single counter row.
pub const COUNTER_ID: i32 = 1;

/// Durable storage for the guestbook.
///
/// Every method is a single store round trip. Implementations never retry;
/// a failure is reported once as [`GuestbookError::StorageUnavailable`].
#[async_trait::async_trait]
pub trait GuestbookStore: Send + Sync + Debug {
    /// Creates the counter and entries tables if absent and inserts the
    /// counter row with value 0 if no row with [`COUNTER_ID`] exists.
    ///
    /// Safe to call on every start, including concurrently from several
    /// instances.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::StorageUnavailable`] if the store cannot
    /// be reached.
    async fn ensure_schema(&self) -> Result<(), GuestbookError>;

    /// Atomically increments the counter and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::StorageUnavailable`] on failure, in which
    /// case the counter is unchanged.
    async fn increment_visitors(&self) -> Result<u64, GuestbookError>;

    /// Appends an entry, stamping it with the store's current time.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::StorageUnavailable`] on failure.
    async fn insert_entry(&self, entry: &NewEntry) -> Result<i64, GuestbookError>;

    /// Returns at most `limit` entries, newest first. Ties on
    /// `created_at` are broken by ID, newest insertion first.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::StorageUnavailable`] on failure.
    async fn recent_entries(&self, limit: u32) -> Result<Vec<Entry>, GuestbookError>;

    /// Performs a trivial round trip without touching guestbook data.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::StorageUnavailable`] if the store is
    /// unreachable.
    async fn ping(&self) -> Result<(), GuestbookError>;

    /// Releases pooled resources. Called once on shutdown.
    async fn close(&self);
}
