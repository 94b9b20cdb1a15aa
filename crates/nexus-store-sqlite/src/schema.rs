//! SQL schema for the SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// All collections share one table. Records are schema-less JSON bodies;
/// `numeric_id` shadows numeric ids so the store can assign the next one
/// with a MAX() scan per collection.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS records (
    collection  TEXT NOT NULL,
    id          TEXT NOT NULL,    -- canonical text form of the record id
    numeric_id  INTEGER,          -- NULL for caller-supplied string ids
    body        TEXT NOT NULL,    -- full record JSON, id field included
    PRIMARY KEY (collection, id)
);

CREATE INDEX IF NOT EXISTS records_numeric_idx
    ON records(collection, numeric_id);

PRAGMA user_version = 1;
";
