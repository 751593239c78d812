//! Storage trait definition.
//!
//! Defines the interface for persistent storage backends: a repository of
//! pattern/response rows plus an append-only conversation log.

use crate::error::Result;
use serde::Serialize;

/// Trait for persistent storage backends.
pub trait Storage {
    /// Initializes storage (creates the schema and records its version).
    ///
    /// Should be idempotent - safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails.
    fn init(&mut self) -> Result<()>;

    /// Checks if storage is initialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    fn is_initialized(&self) -> Result<bool>;

    /// Deletes all responses and conversations, keeping the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    fn reset(&mut self) -> Result<()>;

    // ==================== Response Operations ====================

    /// Adds a pattern/response row and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be inserted.
    fn add_response(&mut self, pattern: &str, response: &str, context: Option<&str>)
    -> Result<i64>;

    /// Finds the response whose pattern best matches `input`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_response(&self, input: &str) -> Result<Option<String>>;

    /// Lists all stored responses in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_responses(&self) -> Result<Vec<ResponseRecord>>;

    /// Returns the count of stored responses.
    ///
    /// # Errors
    ///
    /// Returns an error if the count query fails.
    fn response_count(&self) -> Result<usize>;

    // ==================== Conversation Operations ====================

    /// Appends one conversation turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn log_conversation(&mut self, user_input: &str, bot_response: &str) -> Result<()>;

    /// Returns up to `limit` turns, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn recent_conversations(&self, limit: usize) -> Result<Vec<ConversationRecord>>;

    // ==================== Utility Operations ====================

    /// Gets storage statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if statistics cannot be gathered.
    fn stats(&self) -> Result<StorageStats>;
}

/// A stored pattern/response row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseRecord {
    /// Row ID.
    pub id: i64,
    /// Pattern matched against input.
    pub pattern: String,
    /// Canned response.
    pub response: String,
    /// Optional category or context label.
    pub context: Option<String>,
}

/// A logged conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationRecord {
    /// Row ID.
    pub id: i64,
    /// What the user typed.
    pub user_input: String,
    /// What the bot answered.
    pub bot_response: String,
    /// `SQLite` `CURRENT_TIMESTAMP` at insert time.
    pub timestamp: String,
}

/// Storage statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageStats {
    /// Number of response rows.
    pub response_count: usize,
    /// Number of logged conversation turns.
    pub conversation_count: usize,
    /// Schema version.
    pub schema_version: u32,
    /// Database file size in bytes (if applicable).
    pub db_size: Option<u64>,
}
