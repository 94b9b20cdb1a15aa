//! Handlers for `/events` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/events` | Optional `?year=&month=`, `?client_id=`, or `?q=` (title search) |
//! | `POST`   | `/events` | Body: [`NewEvent`]; 201 + stored event |
//! | `PATCH`  | `/events/:id` | Body: [`EventPatch`]; merge update |
//! | `DELETE` | `/events/:id` | |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use nexus_app::calendar::EventPatch;
use nexus_core::{event::NewEvent, store::Store};
use serde::Deserialize;

use crate::{AppState, error::ApiError, record_id};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub year:      Option<i32>,
  pub month:     Option<u32>,
  pub client_id: Option<String>,
  /// Case-insensitive title search.
  pub q:         Option<String>,
}

/// `GET /events` — one filter at a time: `q`, then `year`+`month`, then
/// `client_id`, otherwise everything.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let events = if let Some(q) = &params.q {
    state.calendar.search(q).await?
  } else if let (Some(year), Some(month)) = (params.year, params.month) {
    state.calendar.events_in_month(year, month).await?
  } else if let Some(client_id) = params.client_id {
    state.calendar.events_for_client(&record_id(client_id)).await?
  } else {
    state.calendar.list().await?
  };
  Ok(Json(events))
}

/// `POST /events`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewEvent>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let event = state.calendar.create(body).await?;
  Ok((StatusCode::CREATED, Json(event)))
}

/// `PATCH /events/:id`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  Json(body): Json<EventPatch>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  state.calendar.update(&record_id(id), body).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /events/:id`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  state.calendar.delete(&record_id(id)).await?;
  Ok(StatusCode::NO_CONTENT)
}
