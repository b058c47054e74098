//! SQL schema for the readmark SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per article. Rows are never deleted.
CREATE TABLE IF NOT EXISTS reading_status (
    article_id  TEXT PRIMARY KEY NOT NULL,
    status      TEXT NOT NULL,
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC; set on insert only
    updated_at  TEXT NOT NULL,   -- ISO 8601 UTC; refreshed on every write
    CONSTRAINT ck_reading_status_status
      CHECK (status IN ('to_read', 'reading', 'read'))
);

PRAGMA user_version = 1;
";
