//! Handlers for `/reports` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET` | `/reports/quotes` | Optional `?client_id=`, `?from=`, `?to=` (inclusive ISO dates) |
//! | `GET` | `/reports/quotes.csv` | Same filters, rendered as CSV |
//! | `GET` | `/reports/dashboard` | Entity counts + 30-day revenue |

use axum::{
  Json,
  extract::{Query, State},
  http::header,
  response::IntoResponse,
};
use nexus_app::reports::{self, QuoteFilter};
use nexus_core::store::Store;
use serde::Deserialize;

use crate::{AppState, error::ApiError, record_id};

#[derive(Debug, Default, Deserialize)]
pub struct QuoteParams {
  pub client_id: Option<String>,
  pub from:      Option<String>,
  pub to:        Option<String>,
}

impl From<QuoteParams> for QuoteFilter {
  fn from(p: QuoteParams) -> Self {
    QuoteFilter {
      client_id: p.client_id.map(record_id),
      from:      p.from,
      to:        p.to,
    }
  }
}

/// `GET /reports/quotes`
pub async fn quotes<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<QuoteParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let report = state.reports.quote_report(&params.into()).await?;
  Ok(Json(report))
}

/// `GET /reports/quotes.csv`
pub async fn quotes_csv<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<QuoteParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let report = state.reports.quote_report(&params.into()).await?;
  let csv = reports::to_csv(&report);
  Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv))
}

/// `GET /reports/dashboard`
pub async fn dashboard<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  Ok(Json(state.reports.dashboard().await?))
}
