//! # guestbook-server
//!
//! A public guestbook: every page view increments a shared visitor
//! counter, visitors see the most recent signed messages and may leave one
//! of their own.
//!
//! All shared state lives in the store. The counter is only ever read as
//! the result of an atomic increment, entries are immutable once written,
//! and the page is a pure function of the counter value and the entries.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── Handlers (api/)          GET /, POST /sign, GET /health
//!     │
//!     ├── GuestbookService (service/)
//!     │       ├── Page renderer (render/)
//!     │       └── Sanitized submissions (domain/)
//!     │
//!     └── GuestbookStore (persistence/)
//!             ├── PostgreSQL
//!             └── In-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod render;
pub mod service;
