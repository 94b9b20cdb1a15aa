//! Client directory service.

use std::sync::Arc;

use chrono::Utc;
use nexus_core::{
  client::{Client, NewClient},
  record::{self, RecordId},
  store::Store,
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Partial update; only the set fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientPatch {
  #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
  pub name:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
  pub phone: Option<String>,
}

pub struct Clients<S> {
  store: Arc<S>,
}

impl<S: Store> Clients<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// All clients, in storage order.
  pub async fn list(&self) -> Result<Vec<Client>> {
    let records = self.store.get_all(Client::COLLECTION).await?;
    records
      .iter()
      .map(|r| Ok(record::from_record(r)?))
      .collect()
  }

  /// Linear scan by id, the way every cross-collection reference is
  /// resolved here.
  pub async fn get(&self, id: &RecordId) -> Result<Option<Client>> {
    Ok(self.list().await?.into_iter().find(|c| c.id.as_ref() == Some(id)))
  }

  pub async fn create(&self, input: NewClient) -> Result<Client> {
    let name = input.name.trim();
    if name.is_empty() {
      return Err(Error::Invalid("client name is required".into()));
    }
    let mut client = Client {
      id:            None,
      name:          name.to_owned(),
      email:         input.email.trim().to_owned(),
      phone:         input.phone.trim().to_owned(),
      registered_on: Utc::now().date_naive(),
    };
    let id = self
      .store
      .add_item(Client::COLLECTION, record::to_record(&client)?)
      .await?;
    tracing::info!(%id, "client registered");
    client.id = Some(id);
    Ok(client)
  }

  pub async fn update(&self, id: &RecordId, patch: ClientPatch) -> Result<()> {
    if let Some(name) = &patch.name
      && name.trim().is_empty()
    {
      return Err(Error::Invalid("client name cannot be emptied".into()));
    }
    self
      .store
      .update_item(Client::COLLECTION, id, record::to_record(&patch)?)
      .await?;
    Ok(())
  }

  pub async fn delete(&self, id: &RecordId) -> Result<()> {
    self.store.delete_item(Client::COLLECTION, id).await?;
    Ok(())
  }
}
