//! SQL schema for the Folio SQLite store.
//!
//! Executed at connection startup. `PRAGMA user_version` records the schema
//! version so later migrations can be gated on it.

/// Current schema version, written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Per-connection settings. SQLite leaves foreign keys off by default, and
/// neither FK checks nor `ON DELETE CASCADE` run without this pragma.
pub const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
";

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS item (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    type        TEXT NOT NULL,   -- item kind, e.g. 'book', 'journalArticle'
    field_data  TEXT NOT NULL,   -- JSON object: field name -> value
    creators    TEXT NOT NULL    -- JSON object: creator type -> [name]
);

CREATE TABLE IF NOT EXISTS collection (
    name TEXT PRIMARY KEY
);

-- No UNIQUE (collection, item): duplicate memberships are not prevented here.
CREATE TABLE IF NOT EXISTS collection_entry (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    collection  TEXT    NOT NULL REFERENCES collection(name) ON DELETE CASCADE,
    item        INTEGER NOT NULL REFERENCES item(id)         ON DELETE CASCADE
);
";
