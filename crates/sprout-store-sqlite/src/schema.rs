//! SQL schema for the Sprout SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Check-ins are strictly append-only.
CREATE TABLE IF NOT EXISTS check_ins (
    check_in_id TEXT PRIMARY KEY,
    at          TEXT NOT NULL      -- ISO 8601 UTC
);

-- Snapshot tables below hold a single row with id = 1.
CREATE TABLE IF NOT EXISTS streak_state (
    id                INTEGER PRIMARY KEY CHECK (id = 1),
    current_streak    INTEGER NOT NULL,
    longest_streak    INTEGER NOT NULL,
    last_check_in_day TEXT              -- YYYY-MM-DD or NULL
);

CREATE TABLE IF NOT EXISTS challenge_log (
    id              INTEGER PRIMARY KEY CHECK (id = 1),
    completed_count INTEGER NOT NULL,
    day             TEXT,              -- NULL when no challenge was drawn
    challenge_id    TEXT,
    completed       INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS achievements (
    achievement_id TEXT PRIMARY KEY,
    unlocked_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS activity (
    kind  TEXT PRIMARY KEY,            -- 'recipe' | 'restaurant' | 'friend'
    count INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS check_ins_at_idx ON check_ins(at);

PRAGMA user_version = 1;
";
