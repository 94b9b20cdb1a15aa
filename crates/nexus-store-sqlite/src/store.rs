//! [`SqliteStore`] — the SQLite implementation of [`Store`].

use std::path::Path;

use nexus_core::{
  Error, Result,
  collection::Collection,
  record::{Record, RecordId},
  store::Store,
};
use rusqlite::OptionalExtension as _;
use serde_json::Value;

use crate::schema::SCHEMA;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A nexus store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(|e| Error::StorageUnavailable(e.to_string()))
  }
}

// ─── Store impl ──────────────────────────────────────────────────────────────

impl Store for SqliteStore {
  async fn get_all(&self, collection: Collection) -> Result<Vec<Record>> {
    let bodies: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT body FROM records WHERE collection = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![collection.as_str()], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(|e| Error::StorageUnavailable(e.to_string()))?;

    bodies
      .iter()
      .map(|body| Ok(serde_json::from_str::<Record>(body)?))
      .collect()
  }

  async fn add_item(
    &self,
    collection: Collection,
    record: Record,
  ) -> Result<RecordId> {
    let outcome = self
      .conn
      .call(move |conn| {
        let mut record = record;

        // Assign the next per-collection numeric id when the caller gave
        // none; caller-supplied ids (numeric or string) are kept verbatim.
        let id = match record.id() {
          Some(id) => id,
          None => {
            let next: i64 = conn.query_row(
              "SELECT COALESCE(MAX(numeric_id), 0) + 1 FROM records
               WHERE collection = ?1",
              rusqlite::params![collection.as_str()],
              |r| r.get(0),
            )?;
            let id = RecordId::Num(next);
            record.set_id(&id);
            id
          }
        };
        let id_text = id.to_string();

        if let Some((field, value)) =
          unique_conflict(conn, collection, &id_text, &record)?
        {
          return Ok(AddOutcome::Conflict { field, value });
        }

        let body = encode_body(&record)?;
        conn.execute(
          "INSERT INTO records (collection, id, numeric_id, body)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![collection.as_str(), id_text, id.as_num(), body],
        )?;
        Ok(AddOutcome::Added(id))
      })
      .await
      .map_err(|e| write_err(collection, e))?;

    match outcome {
      AddOutcome::Added(id) => Ok(id),
      AddOutcome::Conflict { field, value } => {
        Err(Error::Conflict { collection, field, value })
      }
    }
  }

  async fn update_item(
    &self,
    collection: Collection,
    id: &RecordId,
    patch: Record,
  ) -> Result<()> {
    let id_text = id.to_string();
    let outcome = self
      .conn
      .call(move |conn| {
        let body: Option<String> = conn
          .query_row(
            "SELECT body FROM records WHERE collection = ?1 AND id = ?2",
            rusqlite::params![collection.as_str(), id_text],
            |r| r.get(0),
          )
          .optional()?;

        let Some(body) = body else {
          return Ok(WriteOutcome::NotFound);
        };

        let mut record: Record = decode_body(&body)?;
        record.merge(patch);

        if let Some((field, value)) =
          unique_conflict(conn, collection, &id_text, &record)?
        {
          return Ok(WriteOutcome::Conflict { field, value });
        }

        let updated = encode_body(&record)?;
        conn.execute(
          "UPDATE records SET body = ?3 WHERE collection = ?1 AND id = ?2",
          rusqlite::params![collection.as_str(), id_text, updated],
        )?;
        Ok(WriteOutcome::Done)
      })
      .await
      .map_err(|e| write_err(collection, e))?;

    match outcome {
      WriteOutcome::Done => Ok(()),
      WriteOutcome::NotFound => {
        Err(Error::NotFound { collection, id: id.clone() })
      }
      WriteOutcome::Conflict { field, value } => {
        Err(Error::Conflict { collection, field, value })
      }
    }
  }

  async fn delete_item(&self, collection: Collection, id: &RecordId) -> Result<()> {
    let id_text = id.to_string();
    let removed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM records WHERE collection = ?1 AND id = ?2",
          rusqlite::params![collection.as_str(), id_text],
        )?;
        Ok(n)
      })
      .await
      .map_err(|e| write_err(collection, e))?;

    if removed == 0 {
      return Err(Error::NotFound { collection, id: id.clone() });
    }
    Ok(())
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

enum AddOutcome {
  Added(RecordId),
  Conflict { field: &'static str, value: String },
}

enum WriteOutcome {
  Done,
  NotFound,
  Conflict { field: &'static str, value: String },
}

fn write_err(collection: Collection, e: tokio_rusqlite::Error) -> Error {
  Error::Write { collection, reason: e.to_string() }
}

fn encode_body(record: &Record) -> std::result::Result<String, tokio_rusqlite::Error> {
  serde_json::to_string(record).map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))
}

fn decode_body(body: &str) -> std::result::Result<Record, tokio_rusqlite::Error> {
  serde_json::from_str(body).map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))
}

/// Scan for another record in `collection` holding the same value of any of
/// the collection's unique fields. Runs inside the connection closure, so
/// the check and the subsequent write cannot interleave with other callers.
fn unique_conflict(
  conn: &rusqlite::Connection,
  collection: Collection,
  id_text: &str,
  record: &Record,
) -> rusqlite::Result<Option<(&'static str, String)>> {
  for &field in collection.unique_fields() {
    let Some(value) = record.get(field) else { continue };
    let value_text = match value {
      Value::String(s) => s.clone(),
      other => other.to_string(),
    };
    let clash: Option<i64> = conn
      .query_row(
        "SELECT 1 FROM records
         WHERE collection = ?1 AND id != ?2
           AND json_extract(body, '$.' || ?3) = ?4",
        rusqlite::params![collection.as_str(), id_text, field, value_text],
        |r| r.get(0),
      )
      .optional()?;
    if clash.is_some() {
      return Ok(Some((field, value_text)));
    }
  }
  Ok(None)
}
