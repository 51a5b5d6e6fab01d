//! SQL schema for the Casebook SQLite store.
//!
//! Executed once when the store is opened. `PRAGMA user_version` records the
//! schema revision so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS cases (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    crime_type  TEXT NOT NULL,
    status      TEXT DEFAULT 'Open',
    location    TEXT NOT NULL,
    date        TEXT NOT NULL      -- YYYY-MM-DD by convention, not checked
);

-- Owned by a case; removed with it.
CREATE TABLE IF NOT EXISTS suspects (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT NOT NULL,
    age      INTEGER,
    alibi    TEXT,
    case_id  INTEGER NOT NULL REFERENCES cases(id) ON DELETE CASCADE
);

-- Owned by a case; removed with it.
CREATE TABLE IF NOT EXISTS evidence (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    description     TEXT NOT NULL,
    found_location  TEXT,
    case_id         INTEGER NOT NULL REFERENCES cases(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS detectives (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    rank          TEXT DEFAULT 'Junior',
    solved_cases  INTEGER DEFAULT 0
);

-- One record per suspect. Deleting the suspect keeps the record and clears
-- the reference.
CREATE TABLE IF NOT EXISTS criminal_records (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    previous_crimes  TEXT,
    sentence         TEXT,
    suspect_id       INTEGER UNIQUE REFERENCES suspects(id) ON DELETE SET NULL
);

-- Detective <-> case assignments. Deleting either side drops the link only.
CREATE TABLE IF NOT EXISTS detective_case (
    detective_id  INTEGER NOT NULL REFERENCES detectives(id) ON DELETE CASCADE,
    case_id       INTEGER NOT NULL REFERENCES cases(id) ON DELETE CASCADE,
    PRIMARY KEY (detective_id, case_id)
);

CREATE INDEX IF NOT EXISTS suspects_case_idx       ON suspects(case_id);
CREATE INDEX IF NOT EXISTS evidence_case_idx       ON evidence(case_id);
CREATE INDEX IF NOT EXISTS detective_case_case_idx ON detective_case(case_id);

PRAGMA user_version = 1;
";

/// Pragmas applied to every connection before its unit of work begins.
/// `foreign_keys` is per-connection in SQLite and off by default.
pub const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";
