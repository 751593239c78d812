//! Database schema definitions.
//!
//! Contains the SQL schema for the chatbot `SQLite` database. Every statement
//! uses `IF NOT EXISTS`, so databases created by older seeding tools (which
//! have the `responses` table but no `schema_info`) are adopted in place.

/// Current schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// SQL schema for initial database setup.
pub const SCHEMA_SQL: &str = r"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_info (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Pattern/response pairs
CREATE TABLE IF NOT EXISTS responses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pattern TEXT NOT NULL,
    response TEXT NOT NULL,
    context TEXT,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

-- Index for exact pattern lookups and deduplication
CREATE INDEX IF NOT EXISTS idx_responses_pattern ON responses(pattern);

-- Logged conversation turns
CREATE TABLE IF NOT EXISTS conversations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_input TEXT NOT NULL,
    bot_response TEXT NOT NULL,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
);
";

/// SQL to check if schema is initialized.
pub const CHECK_SCHEMA_SQL: &str = r"
SELECT COUNT(*) FROM sqlite_master
WHERE type='table' AND name='schema_info';
";

/// SQL to get schema version.
pub const GET_VERSION_SQL: &str = r"
SELECT value FROM schema_info WHERE key = 'version';
";

/// SQL to set schema version.
pub const SET_VERSION_SQL: &str = r"
INSERT OR REPLACE INTO schema_info (key, value) VALUES ('version', ?);
";

/// Fuzzy lookup: the pattern occurs in the input or the input occurs in the
/// pattern, case-insensitively; the longest pattern wins.
///
/// `instr` compares literally, so `%` and `_` typed by the user are plain
/// characters.
pub const FIND_RESPONSE_SQL: &str = r"
SELECT response FROM responses
WHERE instr(lower(?1), lower(pattern)) > 0
   OR instr(lower(pattern), lower(?1)) > 0
ORDER BY length(pattern) DESC
LIMIT 1;
";
