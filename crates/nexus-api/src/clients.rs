//! Handlers for `/clients` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/clients` | All clients, storage order |
//! | `POST`   | `/clients` | Body: [`NewClient`]; 201 + stored client |
//! | `GET`    | `/clients/:id` | 404 if not found |
//! | `PATCH`  | `/clients/:id` | Body: [`ClientPatch`]; merge update |
//! | `DELETE` | `/clients/:id` | |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use nexus_app::clients::ClientPatch;
use nexus_core::{client::NewClient, store::Store};

use crate::{AppState, error::ApiError, record_id};

/// `GET /clients`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  Ok(Json(state.clients.list().await?))
}

/// `POST /clients`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewClient>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let client = state.clients.create(body).await?;
  Ok((StatusCode::CREATED, Json(client)))
}

/// `GET /clients/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let id = record_id(id);
  let client = state
    .clients
    .get(&id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("client {id} not found")))?;
  Ok(Json(client))
}

/// `PATCH /clients/:id`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  Json(body): Json<ClientPatch>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  state.clients.update(&record_id(id), body).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /clients/:id`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  state.clients.delete(&record_id(id)).await?;
  Ok(StatusCode::NO_CONTENT)
}
