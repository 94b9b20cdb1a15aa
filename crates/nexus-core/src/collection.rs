//! The named collections of the store.
//!
//! Collection names are part of the persisted-storage contract (other
//! clients may read the same database), so the serialized forms below must
//! never change.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// A named, independently-addressed set of records (analogous to a table).
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
pub enum Collection {
  #[serde(rename = "users")]
  #[strum(serialize = "users")]
  Users,
  #[serde(rename = "clientes")]
  #[strum(serialize = "clientes")]
  Clients,
  #[serde(rename = "eventos")]
  #[strum(serialize = "eventos")]
  Events,
  #[serde(rename = "conversaciones")]
  #[strum(serialize = "conversaciones")]
  Conversations,
  #[serde(rename = "mensajes")]
  #[strum(serialize = "mensajes")]
  Messages,
  #[serde(rename = "notificaciones")]
  #[strum(serialize = "notificaciones")]
  Notifications,
  #[serde(rename = "cotizaciones")]
  #[strum(serialize = "cotizaciones")]
  Quotes,
  #[serde(rename = "servicios")]
  #[strum(serialize = "servicios")]
  Services,
}

impl Collection {
  pub const ALL: [Collection; 8] = [
    Collection::Users,
    Collection::Clients,
    Collection::Events,
    Collection::Conversations,
    Collection::Messages,
    Collection::Notifications,
    Collection::Quotes,
    Collection::Services,
  ];

  /// The persisted collection name.
  pub fn as_str(self) -> &'static str { self.into() }

  /// Fields whose values must be unique within the collection. Enforced by
  /// the store on insert and update.
  pub fn unique_fields(self) -> &'static [&'static str] {
    match self {
      Collection::Users => &["cedula"],
      _ => &[],
    }
  }
}
