//! Quotes (cotizaciones) — the billing-side records the reports run over.

use serde::{Deserialize, Serialize};

use crate::{collection::Collection, record::RecordId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:        Option<RecordId>,
  #[serde(rename = "clienteId")]
  pub client_id: RecordId,
  /// Date-only ISO string; range filters compare these lexicographically.
  #[serde(rename = "fecha")]
  pub date:      String,
  pub subtotal:  f64,
  #[serde(rename = "impuesto")]
  pub tax:       f64,
  pub total:     f64,
}

impl Quote {
  pub const COLLECTION: Collection = Collection::Quotes;
}
