//! The [`Store`] trait.
//!
//! Implemented by storage backends (e.g. `nexus-store-sqlite`). Feature
//! services depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  collection::Collection,
  error::Error,
  record::{Record, RecordId},
};

/// Abstraction over the collection-oriented persistence layer.
///
/// There are no query, filter, or index operations: callers load whole
/// collections and filter in memory, sorting explicitly where order matters.
/// A multi-step update is a plain sequence of these calls — the store gives
/// no isolation between interleaved callers (last write wins).
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait Store: Send + Sync {
  /// Every record in `collection`, in storage order. Returns an empty
  /// sequence — never a failure — for a collection with no records.
  fn get_all(
    &self,
    collection: Collection,
  ) -> impl Future<Output = Result<Vec<Record>, Error>> + Send + '_;

  /// Persist `record`, assigning an identifier if it carries none, and
  /// return the identifier under which it was stored. The stored body
  /// always includes the id.
  fn add_item(
    &self,
    collection: Collection,
    record: Record,
  ) -> impl Future<Output = Result<RecordId, Error>> + Send + '_;

  /// Merge the fields of `patch` into the existing record at `id`
  /// (merge semantics, not replace; the stored id is never changed).
  fn update_item<'a>(
    &'a self,
    collection: Collection,
    id: &'a RecordId,
    patch: Record,
  ) -> impl Future<Output = Result<(), Error>> + Send + 'a;

  /// Remove the record at `id`. Fails with [`Error::NotFound`] if no such
  /// record exists, consistently with `update_item`.
  fn delete_item<'a>(
    &'a self,
    collection: Collection,
    id: &'a RecordId,
  ) -> impl Future<Output = Result<(), Error>> + Send + 'a;
}
