//! SQLite schema definitions
//!
//! `SCHEMA` always describes the latest version; `migrations.rs` upgrades
//! databases created by earlier versions.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 2;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Teams (must be before members due to FK)
-- =============================================================================
CREATE TABLE IF NOT EXISTS team (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 100)
);

CREATE INDEX IF NOT EXISTS idx_team_name ON team(name);

-- =============================================================================
-- 2. Members (references teams)
-- =============================================================================
CREATE TABLE IF NOT EXISTS member (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT,
    age INTEGER NOT NULL DEFAULT 0,
    team_id INTEGER REFERENCES team(id)
);

CREATE INDEX IF NOT EXISTS idx_member_team ON member(team_id);
CREATE INDEX IF NOT EXISTS idx_member_username ON member(username);
CREATE INDEX IF NOT EXISTS idx_member_age ON member(age);
"#;

/// Version 1 schema (no age index). Kept to exercise upgrades in tests.
#[cfg(test)]
pub const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS team (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 100)
);

CREATE TABLE IF NOT EXISTS member (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT,
    age INTEGER NOT NULL DEFAULT 0,
    team_id INTEGER REFERENCES team(id)
);

INSERT INTO schema_version (id, version, applied_at, description) VALUES (1, 1, 0, 'Initial schema');
"#;
