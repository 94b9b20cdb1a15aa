//! Calendar service.
//!
//! Events carry their datetimes as the raw persisted ISO strings; every
//! filter here parses leniently (see [`nexus_core::dates`]) because three
//! datetime formats coexist in older data.

use std::sync::Arc;

use chrono::NaiveDate;
use nexus_core::{
  dates,
  event::{Event, NewEvent},
  record::{self, RecordId},
  store::Store,
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Partial update; only the set fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
  #[serde(rename = "titulo", skip_serializing_if = "Option::is_none")]
  pub title:       Option<String>,
  #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
  pub kind:        Option<String>,
  #[serde(rename = "fechaInicio", skip_serializing_if = "Option::is_none")]
  pub starts_at:   Option<String>,
  #[serde(rename = "fechaFin", skip_serializing_if = "Option::is_none")]
  pub ends_at:     Option<String>,
  #[serde(rename = "clienteId", skip_serializing_if = "Option::is_none")]
  pub client_id:   Option<RecordId>,
}

pub struct Calendar<S> {
  store: Arc<S>,
}

impl<S: Store> Calendar<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn list(&self) -> Result<Vec<Event>> {
    let records = self.store.get_all(Event::COLLECTION).await?;
    records
      .iter()
      .map(|r| Ok(record::from_record(r)?))
      .collect()
  }

  /// Create an event. The end defaults to the start when missing or when it
  /// would precede it.
  pub async fn create(&self, input: NewEvent) -> Result<Event> {
    let title = input.title.trim();
    if title.is_empty() {
      return Err(Error::Invalid("event title is required".into()));
    }
    let Some(start) = dates::parse_datetime(&input.starts_at) else {
      return Err(Error::Invalid(format!(
        "unparseable start datetime {:?}",
        input.starts_at
      )));
    };

    let ends_at = match input.ends_at {
      Some(end) if dates::parse_datetime(&end).is_some_and(|e| e >= start) => end,
      _ => input.starts_at.clone(),
    };

    let mut event = Event {
      id:          None,
      title:       title.to_owned(),
      description: input.description,
      kind:        input.kind,
      starts_at:   input.starts_at,
      ends_at,
      client_id:   input.client_id,
    };
    let id = self
      .store
      .add_item(Event::COLLECTION, record::to_record(&event)?)
      .await?;
    tracing::info!(%id, "event scheduled");
    event.id = Some(id);
    Ok(event)
  }

  pub async fn update(&self, id: &RecordId, patch: EventPatch) -> Result<()> {
    if let Some(start) = &patch.starts_at
      && dates::parse_datetime(start).is_none()
    {
      return Err(Error::Invalid(format!("unparseable start datetime {start:?}")));
    }
    self
      .store
      .update_item(Event::COLLECTION, id, record::to_record(&patch)?)
      .await?;
    Ok(())
  }

  pub async fn delete(&self, id: &RecordId) -> Result<()> {
    self.store.delete_item(Event::COLLECTION, id).await?;
    Ok(())
  }

  /// Events whose start falls within the given month.
  pub async fn events_in_month(&self, year: i32, month: u32) -> Result<Vec<Event>> {
    let Some(anchor) = NaiveDate::from_ymd_opt(year, month, 1) else {
      return Err(Error::Invalid(format!("invalid month {year}-{month}")));
    };
    let mut events = self.list().await?;
    events.retain(|e| {
      e.start()
        .is_some_and(|s| dates::same_month(s.date(), anchor))
    });
    Ok(events)
  }

  pub async fn events_for_client(&self, client_id: &RecordId) -> Result<Vec<Event>> {
    let mut events = self.list().await?;
    events.retain(|e| e.client_id.as_ref() == Some(client_id));
    Ok(events)
  }

  /// Case-insensitive substring search over titles.
  pub async fn search(&self, term: &str) -> Result<Vec<Event>> {
    let needle = term.to_lowercase();
    let mut events = self.list().await?;
    events.retain(|e| e.title.to_lowercase().contains(&needle));
    Ok(events)
  }
}
