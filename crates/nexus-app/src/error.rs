//! Service-level errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Store(#[from] nexus_core::Error),

  /// Input rejected before it reached the store.
  #[error("{0}")]
  Invalid(String),

  /// Login: no user with the given cedula.
  #[error("no user registered under cedula {cedula:?}")]
  UnknownUser { cedula: String },

  /// Login: the supplied name does not match the cedula's record.
  #[error("name does not match the registered user")]
  NameMismatch,

  /// Registration: the email is already taken (case-insensitive).
  #[error("a user with email {0:?} already exists")]
  DuplicateEmail(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
