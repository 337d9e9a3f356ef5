//! SQL schema for the SQLite ticket store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- A plain key-value store of ticket sequences. Tickets are flat JSON
-- records; active tickets carry no exit_time/total_amount keys at all.
CREATE TABLE IF NOT EXISTS collections (
    key     TEXT PRIMARY KEY,    -- 'active_tickets' | 'history_tickets'
    tickets TEXT NOT NULL        -- JSON array, in insertion order
);

PRAGMA user_version = 1;
";
