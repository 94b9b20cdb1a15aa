//! JSON HTTP API for the nexus business-management system.
//!
//! Exposes an axum [`Router`] backed by any [`Store`]. The feature services
//! are constructed once around the injected store and shared through
//! [`AppState`]. TLS and transport concerns are the caller's responsibility.

pub mod auth;
pub mod clients;
pub mod error;
pub mod events;
pub mod messages;
pub mod notifications;
pub mod reports;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{delete, get, post},
};
use nexus_app::{
  auth::Auth, calendar::Calendar, clients::Clients, messaging::Messaging,
  notifications::Notifications, reports::Reports,
};
use nexus_core::{record::RecordId, store::Store};
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Application state ────────────────────────────────────────────────────────

/// The feature services, constructed once around a shared store and
/// threaded through all handlers.
pub struct AppState<S> {
  pub auth:          Arc<Auth<S>>,
  pub clients:       Arc<Clients<S>>,
  pub calendar:      Arc<Calendar<S>>,
  pub messaging:     Arc<Messaging<S>>,
  pub notifications: Arc<Notifications<S>>,
  pub reports:       Arc<Reports<S>>,
}

impl<S: Store> AppState<S> {
  /// Wire every service to the same store. This is the single composition
  /// point — nothing else ever holds the store globally.
  pub fn new(store: Arc<S>) -> Self {
    Self {
      auth:          Arc::new(Auth::new(store.clone())),
      clients:       Arc::new(Clients::new(store.clone())),
      calendar:      Arc::new(Calendar::new(store.clone())),
      messaging:     Arc::new(Messaging::new(store.clone())),
      notifications: Arc::new(Notifications::new(store.clone())),
      reports:       Arc::new(Reports::new(store)),
    }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      auth:          self.auth.clone(),
      clients:       self.clients.clone(),
      calendar:      self.calendar.clone(),
      messaging:     self.messaging.clone(),
      notifications: self.notifications.clone(),
      reports:       self.reports.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: Store + 'static,
{
  Router::new()
    // Auth
    .route("/auth/register", post(auth::register::<S>))
    .route("/auth/login", post(auth::login::<S>))
    // Clients
    .route("/clients", get(clients::list::<S>).post(clients::create::<S>))
    .route(
      "/clients/{id}",
      get(clients::get_one::<S>)
        .patch(clients::update::<S>)
        .delete(clients::delete::<S>),
    )
    // Events
    .route("/events", get(events::list::<S>).post(events::create::<S>))
    .route(
      "/events/{id}",
      axum::routing::patch(events::update::<S>).delete(events::delete::<S>),
    )
    // Conversations
    .route("/conversations", get(messages::list::<S>).post(messages::start::<S>))
    .route("/conversations/read-all", post(messages::mark_all_read::<S>))
    .route("/conversations/unread-count", get(messages::unread_count::<S>))
    .route(
      "/conversations/{id}/messages",
      get(messages::messages::<S>).post(messages::send::<S>),
    )
    .route("/conversations/{id}/inbound", post(messages::inbound::<S>))
    .route("/conversations/{id}/read", post(messages::mark_read::<S>))
    // Notifications
    .route(
      "/notifications",
      get(notifications::list::<S>)
        .post(notifications::publish::<S>)
        .delete(notifications::delete_all::<S>),
    )
    .route("/notifications/read-all", post(notifications::mark_all_read::<S>))
    .route("/notifications/unread-count", get(notifications::unread_count::<S>))
    .route("/notifications/{id}/read", post(notifications::mark_read::<S>))
    .route("/notifications/{id}", delete(notifications::delete_one::<S>))
    // Reports
    .route("/reports/quotes", get(reports::quotes::<S>))
    .route("/reports/quotes.csv", get(reports::quotes_csv::<S>))
    .route("/reports/dashboard", get(reports::dashboard::<S>))
    .with_state(state)
}

/// Path and query ids: numeric when they parse as such, strings otherwise
/// (`conv_*`/`msg_*`).
pub(crate) fn record_id(raw: String) -> RecordId {
  raw.parse::<i64>().map(RecordId::Num).unwrap_or(RecordId::Str(raw))
}

// ─── Integration tests ────────────────────────────────────────────────────────
