//! User accounts.
//!
//! The business key is the national id (`cedula`); its uniqueness is
//! enforced by the store (see [`crate::collection::Collection::unique_fields`]).
//! The numeric record id is store-assigned.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{collection::Collection, record::RecordId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:            Option<RecordId>,
  pub cedula:        String,
  #[serde(rename = "nombre")]
  pub name:          String,
  pub email:         String,
  #[serde(rename = "fechaRegistro")]
  pub registered_on: NaiveDate,
}

impl User {
  pub const COLLECTION: Collection = Collection::Users;
}

/// Input to registration. The stored `nombre` is the concatenation of the
/// given and family names.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
  pub first_name: String,
  pub last_name:  String,
  pub cedula:     String,
  pub email:      String,
}
