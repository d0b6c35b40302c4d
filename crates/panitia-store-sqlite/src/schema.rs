//! SQL schema for the Panitia SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Submissions are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS form_submissions (
    id            TEXT PRIMARY KEY,
    employee_id   TEXT NOT NULL,
    employee_name TEXT NOT NULL,
    full_name     TEXT NOT NULL,
    sector        TEXT,            -- NULL for position holders
    department    TEXT,            -- NULL for position holders
    division      TEXT,            -- NULL for position holders
    position      TEXT,            -- NULL for regular staff
    instagram     TEXT NOT NULL,
    birth_place   TEXT NOT NULL,
    birth_date    TEXT NOT NULL,   -- YYYY-MM-DD
    quotes        TEXT NOT NULL,
    program_studi TEXT NOT NULL,
    created_at    TEXT NOT NULL    -- RFC 3339 UTC, fixed precision; server-assigned
);

CREATE INDEX IF NOT EXISTS form_submissions_created_idx
    ON form_submissions(created_at);

PRAGMA user_version = 1;
";
