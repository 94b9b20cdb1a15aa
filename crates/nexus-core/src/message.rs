//! Conversations and messages.
//!
//! A conversation and its messages form an aggregate: the cached unread
//! counter (`noLeidos`) must stay consistent with the set of unread inbound
//! messages. Only the messaging service writes either side, and it does so
//! within one logical operation (single-writer discipline; the store itself
//! provides no isolation).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{collection::Collection, record::RecordId};

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// Who sits on the other side of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationKind {
  #[serde(rename = "cliente")]
  Client,
  #[serde(rename = "equipo")]
  Team,
}

/// The provenance of a single message, as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
  /// Sent by a client.
  #[serde(rename = "cliente")]
  Client,
  /// Sent by a team member.
  #[serde(rename = "equipo")]
  Team,
  /// Sent by the logged-in user.
  #[serde(rename = "propio")]
  Own,
}

impl MessageKind {
  /// Inbound messages count toward the unread badge; own messages never do.
  pub fn is_inbound(self) -> bool { !matches!(self, MessageKind::Own) }
}

// ─── Conversation ────────────────────────────────────────────────────────────

/// One thread with a client or a team channel. Identifier is the
/// caller-supplied `conv_<millis>` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
  pub id:               String,
  #[serde(rename = "tipo")]
  pub kind:             ConversationKind,
  #[serde(rename = "participanteId")]
  pub participant_id:   RecordId,
  #[serde(rename = "participanteNombre")]
  pub participant_name: String,
  #[serde(rename = "asunto", default, skip_serializing_if = "Option::is_none")]
  pub subject:          Option<String>,
  #[serde(rename = "fechaCreacion")]
  pub created_at:       DateTime<Utc>,
  /// Cached count of unread inbound messages. Derived state; see module docs.
  #[serde(rename = "noLeidos", default)]
  pub unread:           u32,
}

impl Conversation {
  pub const COLLECTION: Collection = Collection::Conversations;
}

// ─── Message ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
  pub id:              String,
  #[serde(rename = "conversacionId")]
  pub conversation_id: String,
  #[serde(rename = "remitenteId")]
  pub sender_id:       RecordId,
  #[serde(rename = "remitenteNombre")]
  pub sender_name:     String,
  #[serde(rename = "contenido")]
  pub body:            String,
  #[serde(rename = "fecha")]
  pub sent_at:         DateTime<Utc>,
  #[serde(rename = "leido")]
  pub read:            bool,
  #[serde(rename = "tipo")]
  pub kind:            MessageKind,
}

impl Message {
  pub const COLLECTION: Collection = Collection::Messages;
}
