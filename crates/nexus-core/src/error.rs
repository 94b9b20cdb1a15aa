//! Error taxonomy for the store.
//!
//! The store never retries internally; every failure is surfaced to the
//! caller as-is, and a failed write leaves prior state unchanged.

use thiserror::Error;

use crate::{collection::Collection, record::RecordId};

#[derive(Debug, Error)]
pub enum Error {
  /// The host environment refused to provide persistent storage.
  #[error("persistent storage unavailable: {0}")]
  StorageUnavailable(String),

  /// An insert or update failed below the record layer (I/O, quota, SQL).
  #[error("write to {collection} failed: {reason}")]
  Write {
    collection: Collection,
    reason:     String,
  },

  /// An update or delete referenced an id not present in the collection.
  #[error("no record {id} in {collection}")]
  NotFound {
    collection: Collection,
    id:         RecordId,
  },

  /// A write would duplicate the value of a unique field.
  #[error("{collection}.{field} already holds {value:?}")]
  Conflict {
    collection: Collection,
    field:      &'static str,
    value:      String,
  },

  #[error("record serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
