//! SQLite backend for the nexus store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Failures are mapped onto the fixed
//! taxonomy in [`nexus_core::error`].

mod lazy;
mod schema;
mod store;

pub use lazy::LazyStore;
pub use store::SqliteStore;
