//! Notifications.
//!
//! The unread badge is always derived on read from the stored records —
//! there is no cached unread counter for notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{collection::Collection, record::RecordId};

/// The source area of a notification; determines the persisted icon name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
  #[serde(rename = "sistema")]
  System,
  #[serde(rename = "cliente")]
  Client,
  #[serde(rename = "cotizacion")]
  Quote,
  #[serde(rename = "calendario")]
  Calendar,
}

impl NotificationKind {
  /// Persisted icon class for the kind. The strings are a compatibility
  /// contract with data written by earlier clients.
  pub fn icon(self) -> &'static str {
    match self {
      NotificationKind::System => "fas fa-cog",
      NotificationKind::Client => "fas fa-users",
      NotificationKind::Quote => "fas fa-file-invoice-dollar",
      NotificationKind::Calendar => "fas fa-calendar-alt",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      NotificationKind::System => "sistema",
      NotificationKind::Client => "cliente",
      NotificationKind::Quote => "cotizacion",
      NotificationKind::Calendar => "calendario",
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:          Option<RecordId>,
  #[serde(rename = "titulo")]
  pub title:       String,
  #[serde(rename = "descripcion")]
  pub description: String,
  #[serde(rename = "tipo")]
  pub kind:        NotificationKind,
  #[serde(rename = "leida")]
  pub read:        bool,
  #[serde(rename = "urgente", default)]
  pub urgent:      bool,
  #[serde(rename = "fecha")]
  pub date:        DateTime<Utc>,
  /// Navigation target the notification points at, if any.
  #[serde(rename = "accion", default, skip_serializing_if = "Option::is_none")]
  pub action:      Option<String>,
  #[serde(rename = "icono")]
  pub icon:        String,
}

impl Notification {
  pub const COLLECTION: Collection = Collection::Notifications;
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewNotification {
  pub title:       String,
  pub description: String,
  pub kind:        NotificationKind,
  #[serde(default)]
  pub urgent:      bool,
  #[serde(default)]
  pub action:      Option<String>,
}
