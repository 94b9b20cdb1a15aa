//! Registration and login.
//!
//! There are no passwords: identity is the national id (`cedula`) plus a
//! normalized name check — a single matched record lookup. Session storage
//! is the host's concern; this service only mints the session value.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use nexus_core::{
  record::{self, RecordId},
  store::Store,
  user::{NewUser, User},
};
use serde::Serialize;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Session ─────────────────────────────────────────────────────────────────

/// A logged-in identity. Persisting it (and expiring it) is up to the host.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
  pub token:      Uuid,
  pub user_id:    RecordId,
  pub cedula:     String,
  pub name:       String,
  pub email:      String,
  pub started_at: DateTime<Utc>,
}

// ─── Service ─────────────────────────────────────────────────────────────────

pub struct Auth<S> {
  store: Arc<S>,
}

impl<S: Store> Auth<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Register a new user. Every field is required; a duplicate cedula is
  /// rejected by the store's unique-field check, a duplicate email
  /// (case-insensitive) by this service.
  pub async fn register(&self, input: NewUser) -> Result<User> {
    let first = input.first_name.trim();
    let last = input.last_name.trim();
    let cedula = input.cedula.trim();
    let email = input.email.trim();
    if first.is_empty() || last.is_empty() || cedula.is_empty() || email.is_empty() {
      return Err(Error::Invalid("all registration fields are required".into()));
    }

    let users = self.users().await?;
    if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
      return Err(Error::DuplicateEmail(email.to_owned()));
    }

    let mut user = User {
      id:            None,
      cedula:        cedula.to_owned(),
      name:          format!("{first} {last}"),
      email:         email.to_owned(),
      registered_on: Utc::now().date_naive(),
    };
    let id = self
      .store
      .add_item(User::COLLECTION, record::to_record(&user)?)
      .await?;
    tracing::info!(%id, "user registered");
    user.id = Some(id);
    Ok(user)
  }

  /// Log in by cedula. The name is compared after normalization, so case,
  /// accents, and stray whitespace do not matter.
  pub async fn login(&self, cedula: &str, name: &str) -> Result<Session> {
    let cedula = cedula.trim();
    let users = self.users().await?;
    let user = users
      .into_iter()
      .find(|u| u.cedula == cedula)
      .ok_or_else(|| Error::UnknownUser { cedula: cedula.to_owned() })?;

    if normalize(&user.name) != normalize(name) {
      return Err(Error::NameMismatch);
    }

    let user_id = user
      .id
      .ok_or_else(|| Error::Invalid("stored user has no id".into()))?;
    tracing::info!(%user_id, "login");
    Ok(Session {
      token:      Uuid::new_v4(),
      user_id,
      cedula:     user.cedula,
      name:       user.name,
      email:      user.email,
      started_at: Utc::now(),
    })
  }

  async fn users(&self) -> Result<Vec<User>> {
    let records = self.store.get_all(User::COLLECTION).await?;
    records
      .iter()
      .map(|r| Ok(record::from_record(r)?))
      .collect()
  }
}

// ─── Name normalization ──────────────────────────────────────────────────────

/// Lowercase, fold Latin accents, collapse whitespace runs, trim.
fn normalize(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for word in s.split_whitespace() {
    if !out.is_empty() {
      out.push(' ');
    }
    for c in word.chars().flat_map(char::to_lowercase) {
      out.push(fold_accent(c));
    }
  }
  out
}

fn fold_accent(c: char) -> char {
  match c {
    'á' | 'à' | 'ä' | 'â' => 'a',
    'é' | 'è' | 'ë' | 'ê' => 'e',
    'í' | 'ì' | 'ï' | 'î' => 'i',
    'ó' | 'ò' | 'ö' | 'ô' => 'o',
    'ú' | 'ù' | 'ü' | 'û' => 'u',
    'ñ' => 'n',
    'ç' => 'c',
    other => other,
  }
}

#[cfg(test)]
mod tests {
  use super::normalize;

  #[test]
  fn normalize_folds_case_accents_and_whitespace() {
    assert_eq!(normalize("  José   PÉREZ "), "jose perez");
    assert_eq!(normalize("Muñoz"), "munoz");
    assert_eq!(normalize("ana"), normalize("ANA"));
  }
}
