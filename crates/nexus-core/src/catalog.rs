//! The service catalog (servicios) — what the business offers.

use serde::{Deserialize, Serialize};

use crate::{collection::Collection, record::RecordId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:          Option<RecordId>,
  #[serde(rename = "nombre")]
  pub name:        String,
  #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(rename = "precio", default)]
  pub price:       f64,
}

impl Service {
  pub const COLLECTION: Collection = Collection::Services;
}
