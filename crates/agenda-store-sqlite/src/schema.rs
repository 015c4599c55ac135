//! SQL schema for the Agenda SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One-off activities, recurring-series roots, and materialised children of a
-- root (parent_id set). Occurrences of a root are never stored.
CREATE TABLE IF NOT EXISTS activities (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    title               TEXT    NOT NULL,
    description         TEXT,
    date                TEXT    NOT NULL,   -- YYYY-MM-DD
    start_time          TEXT,               -- HH:MM
    end_time            TEXT,               -- HH:MM
    color               TEXT    NOT NULL DEFAULT '#3B82F6',
    icon                TEXT    NOT NULL DEFAULT 'Calendar',
    active              INTEGER NOT NULL DEFAULT 1,
    created_by          INTEGER NOT NULL,
    created_at          TEXT    NOT NULL,   -- RFC 3339 UTC
    updated_at          TEXT    NOT NULL,   -- RFC 3339 UTC
    is_recurring        INTEGER NOT NULL DEFAULT 0,
    recurrence_pattern  TEXT    NOT NULL DEFAULT 'NONE',
    recurrence_end_date TEXT,               -- YYYY-MM-DD
    weekday             INTEGER,            -- 0 = Sunday
    nth_occurrence      INTEGER,
    parent_id           INTEGER REFERENCES activities(id) ON DELETE CASCADE,
    CHECK (recurrence_end_date IS NULL OR recurrence_end_date >= date)
);

-- Read-only here; user management lives elsewhere.
CREATE TABLE IF NOT EXISTS users (
    id         INTEGER PRIMARY KEY,
    name       TEXT    NOT NULL,
    photo_url  TEXT,
    birthdate  TEXT,                        -- YYYY-MM-DD or RFC 3339
    active     INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS activities_date_idx   ON activities(date);
CREATE INDEX IF NOT EXISTS activities_parent_idx ON activities(parent_id);
CREATE INDEX IF NOT EXISTS activities_roots_idx  ON activities(is_recurring, parent_id);

PRAGMA user_version = 1;
";
