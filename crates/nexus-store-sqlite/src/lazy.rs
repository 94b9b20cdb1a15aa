//! Lazy, idempotent store opening.

use std::path::PathBuf;

use nexus_core::Result;
use tokio::sync::OnceCell;

use crate::SqliteStore;

/// A store handle that defers opening until first use.
///
/// However many callers race on an uninitialized handle, exactly one
/// initialization runs ([`OnceCell::get_or_try_init`]) and every caller
/// observes the same ready store. Once ready the handle never reverts;
/// a failed initialization leaves it uninitialized so a later call can
/// retry.
pub struct LazyStore {
  path: PathBuf,
  cell: OnceCell<SqliteStore>,
}

impl LazyStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into(), cell: OnceCell::new() }
  }

  /// Open the store, or return the already-open handle.
  ///
  /// Fails with [`nexus_core::Error::StorageUnavailable`] if the database
  /// cannot be opened.
  pub async fn open(&self) -> Result<&SqliteStore> {
    self
      .cell
      .get_or_try_init(|| SqliteStore::open(&self.path))
      .await
  }

  /// The store, if `open` has already completed.
  pub fn get(&self) -> Option<&SqliteStore> { self.cell.get() }
}
