//! Handlers for `/notifications` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/notifications` | Optional `?kind=`, `?status=read\|unread`, `?period=today\|week\|month`, `?q=` |
//! | `POST`   | `/notifications` | Body: [`NewNotification`]; 201 + stored notification |
//! | `DELETE` | `/notifications` | Delete everything |
//! | `POST`   | `/notifications/read-all` | |
//! | `GET`    | `/notifications/unread-count` | Derived from the unread set |
//! | `POST`   | `/notifications/:id/read` | |
//! | `DELETE` | `/notifications/:id` | |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use nexus_app::notifications::{NotificationFilter, Period, ReadStatus};
use nexus_core::{
  notification::{NewNotification, NotificationKind},
  store::Store,
};
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, error::ApiError, record_id};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub kind:   Option<NotificationKind>,
  pub status: Option<ReadStatus>,
  pub period: Option<Period>,
  /// Case-insensitive search over title and description.
  pub q:      Option<String>,
}

/// `GET /notifications` — newest first.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let notifications = if let Some(q) = &params.q {
    state.notifications.search(q).await?
  } else {
    state
      .notifications
      .list(NotificationFilter {
        kind:   params.kind,
        status: params.status,
        period: params.period,
      })
      .await?
  };
  Ok(Json(notifications))
}

/// `POST /notifications`
pub async fn publish<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewNotification>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let notification = state.notifications.publish(body).await?;
  Ok((StatusCode::CREATED, Json(notification)))
}

/// `POST /notifications/:id/read`
pub async fn mark_read<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  state.notifications.mark_read(&record_id(id)).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `POST /notifications/read-all`
pub async fn mark_all_read<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let marked = state.notifications.mark_all_read().await?;
  Ok(Json(json!({ "marked": marked })))
}

/// `DELETE /notifications/:id`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  state.notifications.delete(&record_id(id)).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /notifications`
pub async fn delete_all<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let removed = state.notifications.delete_all().await?;
  Ok(Json(json!({ "removed": removed })))
}

/// `GET /notifications/unread-count`
pub async fn unread_count<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Store,
{
  let unread = state.notifications.unread_count().await?;
  Ok(Json(json!({ "unread": unread })))
}
