//! Handlers for `/auth` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/auth/register` | Body: [`nexus_core::user::NewUser`]; 201 + stored user |
//! | `POST` | `/auth/login` | Body: `{"cedula":"...","name":"..."}`; 200 + session |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use nexus_core::{store::Store, user::NewUser};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

/// `POST /auth/register`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let user = state.auth.register(body).await?;
  Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub cedula: String,
  pub name:   String,
}

/// `POST /auth/login` — name matching is case- and accent-insensitive.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let session = state.auth.login(&body.cedula, &body.name).await?;
  Ok(Json(session))
}
