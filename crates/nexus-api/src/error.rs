//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(String),
}

impl From<nexus_app::Error> for ApiError {
  fn from(e: nexus_app::Error) -> Self {
    use nexus_app::Error as E;
    use nexus_core::Error as StoreError;

    let message = e.to_string();
    match e {
      E::Store(StoreError::NotFound { .. }) => ApiError::NotFound(message),
      E::Store(StoreError::Conflict { .. }) => ApiError::Conflict(message),
      E::DuplicateEmail(_) => ApiError::Conflict(message),
      E::Invalid(_) => ApiError::BadRequest(message),
      E::UnknownUser { .. } | E::NameMismatch => ApiError::Unauthorized(message),
      E::Store(_) => ApiError::Store(message),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
