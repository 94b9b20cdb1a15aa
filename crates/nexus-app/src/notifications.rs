//! Notification service.
//!
//! Unlike conversations there is no cached unread counter here: the badge
//! value is always derived on read from the stored records.

use std::sync::Arc;

use chrono::Utc;
use nexus_core::{
  dates,
  notification::{NewNotification, Notification, NotificationKind},
  record::{self, Record, RecordId},
  store::Store,
};
use serde::Deserialize;
use serde_json::json;

use crate::Result;

// ─── Filter ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
  Read,
  Unread,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
  Today,
  Week,
  Month,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NotificationFilter {
  pub kind:   Option<NotificationKind>,
  pub status: Option<ReadStatus>,
  pub period: Option<Period>,
}

// ─── Service ─────────────────────────────────────────────────────────────────

pub struct Notifications<S> {
  store: Arc<S>,
}

impl<S: Store> Notifications<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Publish a notification. The persisted icon is derived from the kind.
  pub async fn publish(&self, input: NewNotification) -> Result<Notification> {
    let mut notification = Notification {
      id:          None,
      title:       input.title,
      description: input.description,
      kind:        input.kind,
      read:        false,
      urgent:      input.urgent,
      date:        Utc::now(),
      action:      input.action,
      icon:        input.kind.icon().to_owned(),
    };
    let id = self
      .store
      .add_item(Notification::COLLECTION, record::to_record(&notification)?)
      .await?;
    tracing::info!(%id, kind = input.kind.as_str(), "notification published");
    notification.id = Some(id);
    Ok(notification)
  }

  /// Matching notifications, newest first.
  pub async fn list(&self, filter: NotificationFilter) -> Result<Vec<Notification>> {
    let today = Utc::now().date_naive();
    let mut notifications = self.load().await?;

    notifications.retain(|n| {
      if filter.kind.is_some_and(|k| k != n.kind) {
        return false;
      }
      match filter.status {
        Some(ReadStatus::Read) if !n.read => return false,
        Some(ReadStatus::Unread) if n.read => return false,
        _ => {}
      }
      match filter.period {
        Some(Period::Today) => n.date.date_naive() == today,
        Some(Period::Week) => dates::same_week(n.date.date_naive(), today),
        Some(Period::Month) => dates::same_month(n.date.date_naive(), today),
        None => true,
      }
    });

    notifications.sort_by_key(|n| std::cmp::Reverse(n.date));
    Ok(notifications)
  }

  /// Case-insensitive substring search over title and description.
  pub async fn search(&self, term: &str) -> Result<Vec<Notification>> {
    let needle = term.to_lowercase();
    let mut notifications = self.load().await?;
    notifications.retain(|n| {
      n.title.to_lowercase().contains(&needle)
        || n.description.to_lowercase().contains(&needle)
    });
    notifications.sort_by_key(|n| std::cmp::Reverse(n.date));
    Ok(notifications)
  }

  pub async fn mark_read(&self, id: &RecordId) -> Result<()> {
    self
      .store
      .update_item(Notification::COLLECTION, id, read_patch())
      .await?;
    Ok(())
  }

  pub async fn mark_all_read(&self) -> Result<usize> {
    let unread: Vec<Notification> = self
      .load()
      .await?
      .into_iter()
      .filter(|n| !n.read)
      .collect();
    for notification in &unread {
      if let Some(id) = &notification.id {
        self
          .store
          .update_item(Notification::COLLECTION, id, read_patch())
          .await?;
      }
    }
    Ok(unread.len())
  }

  pub async fn delete(&self, id: &RecordId) -> Result<()> {
    self
      .store
      .delete_item(Notification::COLLECTION, id)
      .await?;
    Ok(())
  }

  pub async fn delete_all(&self) -> Result<usize> {
    let all = self.load().await?;
    let mut removed = 0;
    for notification in &all {
      if let Some(id) = &notification.id {
        self.store.delete_item(Notification::COLLECTION, id).await?;
        removed += 1;
      }
    }
    Ok(removed)
  }

  /// Derived on read; there is no stored counter to fall out of sync.
  pub async fn unread_count(&self) -> Result<usize> {
    Ok(self.load().await?.iter().filter(|n| !n.read).count())
  }

  async fn load(&self) -> Result<Vec<Notification>> {
    let records = self.store.get_all(Notification::COLLECTION).await?;
    records
      .iter()
      .map(|r| Ok(record::from_record(r)?))
      .collect()
  }
}

fn read_patch() -> Record {
  match json!({ "leida": true }) {
    serde_json::Value::Object(map) => Record(map),
    _ => unreachable!(),
  }
}
