//! Calendar events.
//!
//! Start and end are kept as the raw persisted ISO strings (several formats
//! exist in the wild, see [`crate::dates`]); typed access goes through
//! [`Event::start`] and [`Event::end`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{collection::Collection, dates, record::RecordId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:          Option<RecordId>,
  #[serde(rename = "titulo")]
  pub title:       String,
  #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  /// Free-form category ("reunion", "visita", ...).
  #[serde(rename = "tipo", default)]
  pub kind:        String,
  #[serde(rename = "fechaInicio")]
  pub starts_at:   String,
  #[serde(rename = "fechaFin")]
  pub ends_at:     String,
  #[serde(rename = "clienteId", default, skip_serializing_if = "Option::is_none")]
  pub client_id:   Option<RecordId>,
}

impl Event {
  pub const COLLECTION: Collection = Collection::Events;

  pub fn start(&self) -> Option<NaiveDateTime> {
    dates::parse_datetime(&self.starts_at)
  }

  pub fn end(&self) -> Option<NaiveDateTime> {
    dates::parse_datetime(&self.ends_at)
  }
}

/// Input to event creation. A missing (or earlier-than-start) end defaults
/// to the start.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
  pub title:       String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub kind:        String,
  pub starts_at:   String,
  #[serde(default)]
  pub ends_at:     Option<String>,
  #[serde(default)]
  pub client_id:   Option<RecordId>,
}
