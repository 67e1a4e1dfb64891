//! SQL schema for the Restock SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS items (
    item_id     TEXT PRIMARY KEY,
    owner_id    TEXT NOT NULL,
    name        TEXT NOT NULL,   -- case-sensitive; unique per owner
    created_at  TEXT NOT NULL,
    UNIQUE (owner_id, name)
);

-- Ledgers are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table; rowid preserves
-- the order events were reported in.
CREATE TABLE IF NOT EXISTS purchase_events (
    item_id   TEXT NOT NULL REFERENCES items(item_id),
    date      TEXT NOT NULL,     -- naive ISO 8601; normalised before storage
    purchased INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS items_owner_idx ON items(owner_id);
CREATE INDEX IF NOT EXISTS events_item_idx ON purchase_events(item_id);

PRAGMA user_version = 1;
";
