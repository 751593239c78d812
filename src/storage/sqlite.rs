//! `SQLite` storage implementation.
//!
//! Persistent variant of the response dictionary: pattern/response rows
//! answered by a fuzzy substring query, plus the conversation log.

// Row counts and limits cross the i64 boundary; all of them are non-negative.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::error::{Result, StorageError};
use crate::matching::Responder;
use crate::storage::schema::{
    CHECK_SCHEMA_SQL, CURRENT_SCHEMA_VERSION, FIND_RESPONSE_SQL, GET_VERSION_SQL, SCHEMA_SQL,
    SET_VERSION_SQL,
};
use crate::storage::traits::{ConversationRecord, ResponseRecord, Storage, StorageStats};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};

/// Response store and conversation log in one `SQLite` file.
///
/// # Examples
///
/// ```no_run
/// use chatbot_rs::storage::{SqliteStorage, Storage};
///
/// let mut storage = SqliteStorage::open("chatbot.db").unwrap();
/// storage.init().unwrap();
/// ```
pub struct SqliteStorage {
    /// `SQLite` connection.
    conn: Connection,
    /// Path to the database file (None for in-memory).
    path: Option<PathBuf>,
}

impl SqliteStorage {
    /// Opens the database file at `path`, creating it and any missing parent
    /// directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Database(e.to_string()))?;
        }

        let conn = Connection::open(&path).map_err(StorageError::from)?;
        tracing::debug!(path = %path.display(), "opened database");

        Ok(Self {
            conn,
            path: Some(path),
        })
    }

    /// Opens a private in-memory database that vanishes on drop.
    ///
    /// # Errors
    ///
    /// Returns an error if `SQLite` cannot allocate the connection.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        Ok(Self { conn, path: None })
    }

    /// Reads the version row; `None` before `init`.
    fn get_schema_version(&self) -> Result<Option<u32>> {
        let version: Option<String> = self
            .conn
            .query_row(GET_VERSION_SQL, [], |row| row.get(0))
            .optional()
            .map_err(StorageError::from)?;

        Ok(version.and_then(|v| v.parse().ok()))
    }

    fn set_schema_version(&self, version: u32) -> Result<()> {
        self.conn
            .execute(SET_VERSION_SQL, params![version.to_string()])
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn count(&self, table: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .map_err(StorageError::from)?;
        Ok(count as usize)
    }
}

impl Storage for SqliteStorage {
    fn init(&mut self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA_SQL)
            .map_err(|e| StorageError::Schema(e.to_string()))?;

        match self.get_schema_version()? {
            Some(version) if version >= CURRENT_SCHEMA_VERSION => {}
            _ => self.set_schema_version(CURRENT_SCHEMA_VERSION)?,
        }

        tracing::debug!(version = CURRENT_SCHEMA_VERSION, "schema ready");
        Ok(())
    }

    fn is_initialized(&self) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(CHECK_SCHEMA_SQL, [], |row| row.get(0))
            .map_err(StorageError::from)?;
        Ok(count > 0)
    }

    fn reset(&mut self) -> Result<()> {
        self.conn
            .execute_batch(
                r"
            DELETE FROM responses;
            DELETE FROM conversations;
        ",
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    // ==================== Response Operations ====================

    fn add_response(
        &mut self,
        pattern: &str,
        response: &str,
        context: Option<&str>,
    ) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO responses (pattern, response, context) VALUES (?, ?, ?)",
                params![pattern, response, context],
            )
            .map_err(StorageError::from)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn find_response(&self, input: &str) -> Result<Option<String>> {
        // An empty needle would match every pattern.
        if input.trim().is_empty() {
            return Ok(None);
        }

        let response = self
            .conn
            .query_row(FIND_RESPONSE_SQL, params![input], |row| row.get(0))
            .optional()
            .map_err(StorageError::from)?;
        Ok(response)
    }

    fn list_responses(&self) -> Result<Vec<ResponseRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, pattern, response, context FROM responses ORDER BY id")
            .map_err(StorageError::from)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ResponseRecord {
                    id: row.get(0)?,
                    pattern: row.get(1)?,
                    response: row.get(2)?,
                    context: row.get(3)?,
                })
            })
            .map_err(StorageError::from)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(StorageError::from)?);
        }
        Ok(records)
    }

    fn response_count(&self) -> Result<usize> {
        self.count("responses")
    }

    // ==================== Conversation Operations ====================

    fn log_conversation(&mut self, user_input: &str, bot_response: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO conversations (user_input, bot_response) VALUES (?, ?)",
                params![user_input, bot_response],
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    #[allow(clippy::cast_possible_wrap)]
    fn recent_conversations(&self, limit: usize) -> Result<Vec<ConversationRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                r"
            SELECT id, user_input, bot_response, timestamp
            FROM conversations
            ORDER BY id DESC
            LIMIT ?
        ",
            )
            .map_err(StorageError::from)?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok(ConversationRecord {
                    id: row.get(0)?,
                    user_input: row.get(1)?,
                    bot_response: row.get(2)?,
                    timestamp: row.get(3)?,
                })
            })
            .map_err(StorageError::from)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(StorageError::from)?);
        }
        Ok(records)
    }

    // ==================== Utility Operations ====================

    fn stats(&self) -> Result<StorageStats> {
        let db_size = self
            .path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok())
            .map(|m| m.len());

        Ok(StorageStats {
            response_count: self.response_count()?,
            conversation_count: self.count("conversations")?,
            schema_version: self.get_schema_version()?.unwrap_or(0),
            db_size,
        })
    }
}

impl Responder for SqliteStorage {
    fn lookup(&self, input: &str) -> Result<Option<String>> {
        self.find_response(input)
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> SqliteStorage {
        let mut storage = SqliteStorage::in_memory().unwrap();
        storage.init().unwrap();
        storage
    }

    #[test]
    fn test_init_idempotent() {
        let mut storage = setup();
        assert!(storage.is_initialized().unwrap());
        storage.init().unwrap();
        let stats = storage.stats().unwrap();
        assert_eq!(stats.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(stats.db_size, None);
    }

    #[test]
    fn test_not_initialized() {
        let storage = SqliteStorage::in_memory().unwrap();
        assert!(!storage.is_initialized().unwrap());
    }

    #[test]
    fn test_find_pattern_in_input() {
        let mut storage = setup();
        storage.add_response("hello", "Hi there!", None).unwrap();

        let found = storage.find_response("Well HELLO friend").unwrap();
        assert_eq!(found.as_deref(), Some("Hi there!"));
    }

    #[test]
    fn test_find_input_in_pattern() {
        let mut storage = setup();
        storage
            .add_response("what is your name", "I'm a chatbot.", Some("identity"))
            .unwrap();

        let found = storage.find_response("your name").unwrap();
        assert_eq!(found.as_deref(), Some("I'm a chatbot."));
    }

    #[test]
    fn test_longest_pattern_wins() {
        let mut storage = setup();
        storage.add_response("python", "short", None).unwrap();
        storage
            .add_response("python programming", "long", None)
            .unwrap();

        let found = storage.find_response("I like python programming").unwrap();
        assert_eq!(found.as_deref(), Some("long"));
    }

    #[test]
    fn test_wildcard_characters_are_literal() {
        let mut storage = setup();
        storage
            .add_response("weather forecast", "Sunny.", None)
            .unwrap();
        storage.add_response("100% sure", "Certain.", None).unwrap();

        assert_eq!(storage.find_response("%").unwrap().as_deref(), Some("Certain."));
        assert_eq!(storage.find_response("w_ather").unwrap(), None);
        assert_eq!(storage.find_response("_").unwrap(), None);
        assert_eq!(
            storage.find_response("WEATHER").unwrap().as_deref(),
            Some("Sunny.")
        );
    }

    #[test]
    fn test_no_match_and_blank_input() {
        let mut storage = setup();
        storage.add_response("hello", "Hi!", None).unwrap();

        assert_eq!(storage.find_response("xyzzy").unwrap(), None);
        assert_eq!(storage.find_response("   ").unwrap(), None);
        assert_eq!(storage.lookup("").unwrap(), None);
    }

    #[test]
    fn test_conversation_log() {
        let mut storage = setup();
        storage.log_conversation("hi", "Hello!").unwrap();
        storage.log_conversation("bye", "Goodbye!").unwrap();

        let recent = storage.recent_conversations(1).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].user_input, "bye");
        assert!(!recent[0].timestamp.is_empty());

        assert_eq!(storage.stats().unwrap().conversation_count, 2);
    }

    #[test]
    fn test_list_and_reset() {
        let mut storage = setup();
        let id = storage.add_response("hi", "Hello!", Some("greetings")).unwrap();
        assert!(id > 0);

        let records = storage.list_responses().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].context.as_deref(), Some("greetings"));

        storage.reset().unwrap();
        assert_eq!(storage.response_count().unwrap(), 0);
        assert!(storage.is_initialized().unwrap());
    }
}
