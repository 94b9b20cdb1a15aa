//! Feature services over the nexus store.
//!
//! Every service is an explicitly-constructed value holding an injected
//! `Arc<impl Store>`; there is no global store handle. Where two pieces of
//! state must move together (a conversation and its unread counter), exactly
//! one service owns both transitions — the store itself gives no isolation.

pub mod auth;
pub mod calendar;
pub mod clients;
pub mod error;
pub mod messaging;
pub mod notifications;
pub mod reports;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
