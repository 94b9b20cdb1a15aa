//! Clients — the businesses and people this system manages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{collection::Collection, record::RecordId};

/// A client record. Referenced informally (by id field, resolved by linear
/// scan) from events, conversations, and quotes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:            Option<RecordId>,
  #[serde(rename = "nombre")]
  pub name:          String,
  #[serde(default)]
  pub email:         String,
  #[serde(rename = "telefono", default)]
  pub phone:         String,
  #[serde(rename = "fecha_registro")]
  pub registered_on: NaiveDate,
}

impl Client {
  pub const COLLECTION: Collection = Collection::Clients;
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewClient {
  pub name:  String,
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub phone: String,
}
