//! Quote reporting and dashboard statistics.
//!
//! Filters behave like the rest of the system: whole collections loaded and
//! joined in memory, date ranges compared as ISO strings (which order
//! correctly lexicographically).

use std::sync::Arc;

use chrono::{Days, Utc};
use nexus_core::{
  catalog::Service,
  client::Client,
  dates,
  quote::Quote,
  record::{self, RecordId},
  store::Store,
};
use serde::{Deserialize, Serialize};

use crate::Result;

// ─── Report types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteFilter {
  pub client_id: Option<RecordId>,
  /// Inclusive ISO date bounds.
  pub from:      Option<String>,
  pub to:        Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteRow {
  #[serde(flatten)]
  pub quote:       Quote,
  /// Resolved client name; `"N/E"` when the client no longer exists.
  #[serde(rename = "cliente")]
  pub client_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteReport {
  pub rows:     Vec<QuoteRow>,
  pub subtotal: f64,
  pub tax:      f64,
  pub total:    f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
  pub clients:        usize,
  pub services:       usize,
  pub quotes:         usize,
  /// Revenue over the trailing 30 days.
  pub recent_revenue: f64,
}

// ─── Service ─────────────────────────────────────────────────────────────────

pub struct Reports<S> {
  store: Arc<S>,
}

impl<S: Store> Reports<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn quote_report(&self, filter: &QuoteFilter) -> Result<QuoteReport> {
    let quotes = self.load::<Quote>(Quote::COLLECTION).await?;
    let clients = self.load::<Client>(Client::COLLECTION).await?;

    let rows: Vec<QuoteRow> = quotes
      .into_iter()
      .filter(|q| {
        filter.client_id.as_ref().is_none_or(|id| &q.client_id == id)
          && filter.from.as_deref().is_none_or(|from| q.date.as_str() >= from)
          && filter.to.as_deref().is_none_or(|to| q.date.as_str() <= to)
      })
      .map(|quote| {
        let client_name = clients
          .iter()
          .find(|c| c.id.as_ref() == Some(&quote.client_id))
          .map(|c| c.name.clone())
          .unwrap_or_else(|| "N/E".to_owned());
        QuoteRow { quote, client_name }
      })
      .collect();

    let subtotal = rows.iter().map(|r| r.quote.subtotal).sum();
    let tax = rows.iter().map(|r| r.quote.tax).sum();
    let total = rows.iter().map(|r| r.quote.total).sum();
    Ok(QuoteReport { rows, subtotal, tax, total })
  }

  /// The landing-page numbers: entity counts plus 30-day revenue.
  pub async fn dashboard(&self) -> Result<DashboardStats> {
    let clients = self.store.get_all(Client::COLLECTION).await?.len();
    let services = self.store.get_all(Service::COLLECTION).await?.len();
    let quotes = self.load::<Quote>(Quote::COLLECTION).await?;

    let cutoff = Utc::now().date_naive() - Days::new(30);
    let recent_revenue = quotes
      .iter()
      .filter(|q| dates::parse_date(&q.date).is_some_and(|d| d >= cutoff))
      .map(|q| q.total)
      .sum();

    Ok(DashboardStats {
      clients,
      services,
      quotes: quotes.len(),
      recent_revenue,
    })
  }

  async fn load<T: serde::de::DeserializeOwned>(
    &self,
    collection: nexus_core::collection::Collection,
  ) -> Result<Vec<T>> {
    let records = self.store.get_all(collection).await?;
    records
      .iter()
      .map(|r| Ok(record::from_record(r)?))
      .collect()
  }
}

/// CSV rendering of a report, one line per row, all fields quoted.
pub fn to_csv(report: &QuoteReport) -> String {
  let mut out = String::from("Fecha,ID,Cliente,Subtotal,Impuesto,Total\n");
  for row in &report.rows {
    let id = row
      .quote
      .id
      .as_ref()
      .map(ToString::to_string)
      .unwrap_or_default();
    out.push_str(&format!(
      "{},{},{},{},{},{}\n",
      csv_field(&row.quote.date),
      csv_field(&id),
      csv_field(&row.client_name),
      csv_field(&row.quote.subtotal.to_string()),
      csv_field(&row.quote.tax.to_string()),
      csv_field(&row.quote.total.to_string()),
    ));
  }
  out
}

/// Quote a CSV field, doubling embedded quotes.
fn csv_field(s: &str) -> String {
  format!("\"{}\"", s.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
  use super::csv_field;

  #[test]
  fn csv_fields_are_quoted_and_escaped() {
    assert_eq!(csv_field("Acme"), "\"Acme\"");
    assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
  }
}
