//! Records and identifiers — the unit of storage.
//!
//! A record is a flat mapping of field names to JSON values. The store
//! itself is schema-less; typed entities (see the sibling modules) convert
//! to and from records at the service boundary.

use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::Result;

// ─── RecordId ────────────────────────────────────────────────────────────────

/// A record identifier: store-assigned numeric, or caller-supplied string
/// (messaging uses `conv_`/`msg_`-prefixed strings for compatibility with
/// persisted data).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
  Num(i64),
  Str(String),
}

impl RecordId {
  pub fn as_num(&self) -> Option<i64> {
    match self {
      RecordId::Num(n) => Some(*n),
      RecordId::Str(_) => None,
    }
  }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RecordId::Num(n) => write!(f, "{n}"),
      RecordId::Str(s) => f.write_str(s),
    }
  }
}

impl From<i64> for RecordId {
  fn from(n: i64) -> Self { RecordId::Num(n) }
}

impl From<&str> for RecordId {
  fn from(s: &str) -> Self { RecordId::Str(s.to_owned()) }
}

impl From<String> for RecordId {
  fn from(s: String) -> Self { RecordId::Str(s) }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A flat field-name → value mapping representing one entity instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record(pub Map<String, Value>);

impl Record {
  /// The record's identifier, read from its `id` field.
  pub fn id(&self) -> Option<RecordId> {
    match self.0.get("id")? {
      Value::Number(n) => n.as_i64().map(RecordId::Num),
      Value::String(s) => Some(RecordId::Str(s.clone())),
      _ => None,
    }
  }

  pub fn set_id(&mut self, id: &RecordId) {
    let value = match id {
      RecordId::Num(n) => Value::from(*n),
      RecordId::Str(s) => Value::from(s.clone()),
    };
    self.0.insert("id".to_owned(), value);
  }

  /// Merge `patch` into this record, field by field. The `id` field is
  /// never taken from a patch.
  pub fn merge(&mut self, patch: Record) {
    for (field, value) in patch.0 {
      if field != "id" {
        self.0.insert(field, value);
      }
    }
  }

  pub fn get(&self, field: &str) -> Option<&Value> { self.0.get(field) }
}

// ─── Typed conversions ───────────────────────────────────────────────────────

/// Serialize an entity into its flat record form.
/// Fails if the entity does not serialize to a JSON object.
pub fn to_record<T: Serialize>(entity: &T) -> Result<Record> {
  match serde_json::to_value(entity)? {
    Value::Object(map) => Ok(Record(map)),
    other => Err(crate::Error::Serialization(serde::ser::Error::custom(
      format!("entity serialized to {other:?}, expected an object"),
    ))),
  }
}

/// Deserialize an entity from its flat record form.
pub fn from_record<T: DeserializeOwned>(record: &Record) -> Result<T> {
  Ok(serde_json::from_value(Value::Object(record.0.clone()))?)
}
