//! Handlers for `/conversations` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/conversations` | Sorted by most recent activity |
//! | `POST` | `/conversations` | Body: [`StartBody`]; 201 + thread |
//! | `POST` | `/conversations/read-all` | Mark every thread read |
//! | `GET`  | `/conversations/unread-count` | Badge value |
//! | `GET`  | `/conversations/:id/messages` | Chronological ascending |
//! | `POST` | `/conversations/:id/messages` | Body: [`SendBody`]; 201 + message |
//! | `POST` | `/conversations/:id/inbound` | Record a message from the other side |
//! | `POST` | `/conversations/:id/read` | Mark the thread read |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use nexus_app::messaging::{Sender, StartConversation};
use nexus_core::{
  message::{Conversation, Message},
  store::Store,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /conversations`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  Ok(Json(state.messaging.conversations().await?))
}

// ─── Start ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StartBody {
  pub sender: Sender,
  #[serde(flatten)]
  pub thread: StartConversation,
}

#[derive(Debug, Serialize)]
pub struct StartedThread {
  pub conversation: Conversation,
  pub message:      Message,
}

/// `POST /conversations`
pub async fn start<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<StartBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let (conversation, message) =
    state.messaging.start(&body.sender, body.thread).await?;
  Ok((StatusCode::CREATED, Json(StartedThread { conversation, message })))
}

// ─── Messages ─────────────────────────────────────────────────────────────────

/// `GET /conversations/:id/messages`
pub async fn messages<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  Ok(Json(state.messaging.messages(&id).await?))
}

#[derive(Debug, Deserialize)]
pub struct SendBody {
  pub sender: Sender,
  pub body:   String,
}

/// `POST /conversations/:id/messages`
pub async fn send<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  Json(body): Json<SendBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let message = state.messaging.send(&id, &body.sender, body.body).await?;
  Ok((StatusCode::CREATED, Json(message)))
}

/// `POST /conversations/:id/inbound`
pub async fn inbound<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  Json(body): Json<SendBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let message = state
    .messaging
    .record_inbound(&id, &body.sender, body.body)
    .await?;
  Ok((StatusCode::CREATED, Json(message)))
}

// ─── Read state ───────────────────────────────────────────────────────────────

/// `POST /conversations/:id/read`
pub async fn mark_read<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let marked = state.messaging.mark_read(&id).await?;
  Ok(Json(json!({ "marked": marked })))
}

/// `POST /conversations/read-all`
pub async fn mark_all_read<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let marked = state.messaging.mark_all_read().await?;
  Ok(Json(json!({ "marked": marked })))
}

/// `GET /conversations/unread-count`
pub async fn unread_count<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let unread = state.messaging.total_unread().await?;
  Ok(Json(json!({ "unread": unread })))
}
