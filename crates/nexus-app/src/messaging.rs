//! Messaging service — the conversation aggregate.
//!
//! A conversation's cached unread counter (`noLeidos`) and its messages'
//! read flags are two sides of the same state. This service is the only
//! writer of either, and always moves them inside one logical operation.
//! The store gives no isolation, so interleaved aggregates are still
//! last-write-wins; within a single process this single-writer discipline
//! is what keeps the counter honest.

use std::sync::{
  Arc,
  atomic::{AtomicI64, Ordering},
};

use chrono::Utc;
use nexus_core::{
  Error as StoreError,
  message::{Conversation, ConversationKind, Message, MessageKind},
  record::{self, Record, RecordId},
  store::Store,
};
use serde::Deserialize;
use serde_json::json;

use crate::Result;

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// The identity a message is written as.
#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
  pub id:   RecordId,
  pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartConversation {
  pub kind:             ConversationKind,
  pub participant_id:   RecordId,
  pub participant_name: String,
  #[serde(default)]
  pub subject:          Option<String>,
  pub body:             String,
}

// ─── Service ─────────────────────────────────────────────────────────────────

pub struct Messaging<S> {
  store: Arc<S>,
  ids:   MillisIds,
}

impl<S: Store> Messaging<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store, ids: MillisIds::default() }
  }

  /// All conversations, most recent activity first (last message date,
  /// falling back to the conversation's creation date).
  pub async fn conversations(&self) -> Result<Vec<Conversation>> {
    let mut conversations = self.load_conversations().await?;
    let messages = self.load_messages().await?;

    conversations.sort_by_key(|c| {
      let last = messages
        .iter()
        .filter(|m| m.conversation_id == c.id)
        .map(|m| m.sent_at)
        .max();
      std::cmp::Reverse(last.unwrap_or(c.created_at))
    });
    Ok(conversations)
  }

  /// Open a new thread with its first outbound message.
  pub async fn start(
    &self,
    sender: &Sender,
    input: StartConversation,
  ) -> Result<(Conversation, Message)> {
    let conversation = Conversation {
      id:               format!("conv_{}", self.ids.next()),
      kind:             input.kind,
      participant_id:   input.participant_id,
      participant_name: input.participant_name,
      subject:          input.subject,
      created_at:       Utc::now(),
      unread:           0,
    };
    self
      .store
      .add_item(Conversation::COLLECTION, record::to_record(&conversation)?)
      .await?;

    let message = self
      .append(&conversation.id, sender, MessageKind::Own, input.body)
      .await?;
    tracing::info!(conversation = %conversation.id, "conversation started");
    Ok((conversation, message))
  }

  /// Send an outbound message. Sending also clears the thread's unread
  /// counter — the sender has the thread open.
  pub async fn send(
    &self,
    conversation_id: &str,
    sender: &Sender,
    body: String,
  ) -> Result<Message> {
    // Fail early with NotFound rather than orphaning a message.
    let conversation = self.load_conversation(conversation_id).await?;

    let message = self
      .append(conversation_id, sender, MessageKind::Own, body)
      .await?;
    self.set_unread(&conversation.id, 0).await?;
    Ok(message)
  }

  /// Record a message from the other side and bump the unread counter.
  pub async fn record_inbound(
    &self,
    conversation_id: &str,
    from: &Sender,
    body: String,
  ) -> Result<Message> {
    let conversation = self.load_conversation(conversation_id).await?;
    let kind = match conversation.kind {
      ConversationKind::Client => MessageKind::Client,
      ConversationKind::Team => MessageKind::Team,
    };

    let message = self.append(conversation_id, from, kind, body).await?;
    self
      .set_unread(&conversation.id, conversation.unread + 1)
      .await?;
    Ok(message)
  }

  /// Messages of one conversation, oldest first.
  pub async fn messages(&self, conversation_id: &str) -> Result<Vec<Message>> {
    let mut messages = self.load_messages().await?;
    messages.retain(|m| m.conversation_id == conversation_id);
    messages.sort_by_key(|m| m.sent_at);
    Ok(messages)
  }

  /// Mark every unread inbound message of the conversation read and reset
  /// its counter. Returns how many messages were flipped.
  pub async fn mark_read(&self, conversation_id: &str) -> Result<usize> {
    let conversation = self.load_conversation(conversation_id).await?;

    let unread: Vec<Message> = self
      .load_messages()
      .await?
      .into_iter()
      .filter(|m| {
        m.conversation_id == conversation_id && !m.read && m.kind.is_inbound()
      })
      .collect();

    for message in &unread {
      let id = RecordId::Str(message.id.clone());
      self
        .store
        .update_item(Message::COLLECTION, &id, patch(json!({ "leido": true })))
        .await?;
    }
    self.set_unread(&conversation.id, 0).await?;
    Ok(unread.len())
  }

  /// [`Self::mark_read`] across every conversation that has unread items.
  pub async fn mark_all_read(&self) -> Result<usize> {
    let mut flipped = 0;
    for conversation in self.load_conversations().await? {
      if conversation.unread > 0 {
        flipped += self.mark_read(&conversation.id).await?;
      }
    }
    Ok(flipped)
  }

  /// The badge value: total unread across all conversations.
  pub async fn total_unread(&self) -> Result<u32> {
    Ok(self.load_conversations().await?.iter().map(|c| c.unread).sum())
  }

  // ── Internals ─────────────────────────────────────────────────────────────

  async fn append(
    &self,
    conversation_id: &str,
    sender: &Sender,
    kind: MessageKind,
    body: String,
  ) -> Result<Message> {
    let message = Message {
      id:              format!("msg_{}", self.ids.next()),
      conversation_id: conversation_id.to_owned(),
      sender_id:       sender.id.clone(),
      sender_name:     sender.name.clone(),
      body,
      sent_at:         Utc::now(),
      read:            false,
      kind,
    };
    self
      .store
      .add_item(Message::COLLECTION, record::to_record(&message)?)
      .await?;
    Ok(message)
  }

  async fn set_unread(&self, conversation_id: &str, unread: u32) -> Result<()> {
    let id = RecordId::Str(conversation_id.to_owned());
    self
      .store
      .update_item(
        Conversation::COLLECTION,
        &id,
        patch(json!({ "noLeidos": unread })),
      )
      .await?;
    Ok(())
  }

  async fn load_conversation(&self, conversation_id: &str) -> Result<Conversation> {
    self
      .load_conversations()
      .await?
      .into_iter()
      .find(|c| c.id == conversation_id)
      .ok_or_else(|| {
        StoreError::NotFound {
          collection: Conversation::COLLECTION,
          id:         RecordId::Str(conversation_id.to_owned()),
        }
        .into()
      })
  }

  async fn load_conversations(&self) -> Result<Vec<Conversation>> {
    let records = self.store.get_all(Conversation::COLLECTION).await?;
    records
      .iter()
      .map(|r| Ok(record::from_record(r)?))
      .collect()
  }

  async fn load_messages(&self) -> Result<Vec<Message>> {
    let records = self.store.get_all(Message::COLLECTION).await?;
    records
      .iter()
      .map(|r| Ok(record::from_record(r)?))
      .collect()
  }
}

fn patch(value: serde_json::Value) -> Record {
  match value {
    serde_json::Value::Object(map) => Record(map),
    _ => unreachable!("patch literals are objects"),
  }
}

// ─── Id source ───────────────────────────────────────────────────────────────

/// Millisecond-timestamp source for `conv_`/`msg_` identifiers, strictly
/// increasing even when several ids are minted in the same millisecond.
#[derive(Default)]
struct MillisIds {
  last: AtomicI64,
}

impl MillisIds {
  fn next(&self) -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = self.last.load(Ordering::Relaxed);
    loop {
      let next = now.max(last + 1);
      match self
        .last
        .compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
      {
        Ok(_) => return next,
        Err(current) => last = current,
      }
    }
  }
}
