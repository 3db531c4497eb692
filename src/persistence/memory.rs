//! In-memory store for tests and local runs without PostgreSQL.
//!
//! Mirrors the PostgreSQL semantics: the counter row only exists after
//! [`GuestbookStore::ensure_schema`], increments are serialized under one
//! lock, and listings sort by `(created_at, id)` descending. The store can
//! be switched offline as a whole, or listings alone can be made to fail,
//! to exercise failure paths.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::sync::Mutex;

use super::GuestbookStore;
use crate::domain::{Entry, NewEntry};
use crate::error::GuestbookError;

#[derive(Debug, Default)]
struct Tables {
    /// `None` until the schema has been created.
    visitors: Option<u64>,
    entries: Vec<Entry>,
    next_id: i64,
}

/// Process-local [`GuestbookStore`].
#[derive(Debug)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    online: AtomicBool,
    listing_online: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store with no schema.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            online: AtomicBool::new(true),
            listing_online: AtomicBool::new(true),
        }
    }

    /// Creates a store with the schema in place and the given rows already
    /// persisted. IDs of later inserts continue after the highest seeded ID.
    #[must_use]
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        Self {
            tables: Mutex::new(Tables {
                visitors: Some(0),
                entries,
                next_id,
            }),
            online: AtomicBool::new(true),
            listing_online: AtomicBool::new(true),
        }
    }

    /// Simulates the store becoming reachable or unreachable.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Makes only [`GuestbookStore::recent_entries`] fail while every other
    /// operation keeps working.
    pub fn set_listing_online(&self, online: bool) {
        self.listing_online.store(online, Ordering::SeqCst);
    }

    /// Returns the current counter without incrementing it, or `None`
    /// before the schema exists.
    pub async fn visitor_count(&self) -> Option<u64> {
        self.tables.lock().await.visitors
    }

    /// Returns the number of persisted entries.
    pub async fn entry_count(&self) -> usize {
        self.tables.lock().await.entries.len()
    }

    fn check_online(&self) -> Result<(), GuestbookError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(GuestbookError::StorageUnavailable(
                "memory store is offline".into(),
            ))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GuestbookStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), GuestbookError> {
        self.check_online()?;
        let mut tables = self.tables.lock().await;
        tables.visitors.get_or_insert(0);
        Ok(())
    }

    async fn increment_visitors(&self) -> Result<u64, GuestbookError> {
        self.check_online()?;
        let mut tables = self.tables.lock().await;
        let Some(count) = tables.visitors.as_mut() else {
            return Err(GuestbookError::StorageUnavailable(
                "visitor counter row missing".into(),
            ));
        };
        *count = count.saturating_add(1);
        Ok(*count)
    }

    async fn insert_entry(&self, entry: &NewEntry) -> Result<i64, GuestbookError> {
        self.check_online()?;
        let mut tables = self.tables.lock().await;
        if tables.visitors.is_none() {
            return Err(GuestbookError::StorageUnavailable(
                "entries table missing".into(),
            ));
        }
        tables.next_id = tables.next_id.saturating_add(1);
        let id = tables.next_id;
        tables.entries.push(Entry {
            id,
            name: entry.name().to_string(),
            message: entry.message().to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn recent_entries(&self, limit: u32) -> Result<Vec<Entry>, GuestbookError> {
        self.check_online()?;
        if !self.listing_online.load(Ordering::SeqCst) {
            return Err(GuestbookError::StorageUnavailable(
                "entries listing failed".into(),
            ));
        }
        let tables = self.tables.lock().await;
        let mut entries = tables.entries.clone();
        entries.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        entries.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(entries)
    }

    async fn ping(&self) -> Result<(), GuestbookError> {
        self.check_online()
    }

    async fn close(&self) {
        tracing::debug!("memory store closed");
    }
}
