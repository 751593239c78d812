//! Storage layer for the chatbot.
//!
//! Provides the persistent response repository and conversation log using
//! `SQLite`.

pub mod schema;
pub mod sqlite;
pub mod traits;

pub use schema::{CURRENT_SCHEMA_VERSION, SCHEMA_SQL};
pub use sqlite::SqliteStorage;
pub use traits::{ConversationRecord, ResponseRecord, Storage, StorageStats};

/// Default database path relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "chatbot.db";
