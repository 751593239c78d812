//! Error types for chatbot operations.
//!
//! A lookup miss is never an error; it resolves to the default response.
//! Errors cover building the response table, the database, seed and
//! transcript files, and CLI commands.

use thiserror::Error;

/// Result type alias for chatbot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The response table could not be built.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Database failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Seed or transcript file failure.
    #[error(transparent)]
    Io(#[from] IoError),

    /// A command refused to run.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// A session setting is out of range.
    #[error("invalid configuration: {message}")]
    Config {
        /// Which setting is wrong and why.
        message: String,
    },
}

/// Errors raised while building the in-memory response table.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    /// The table needs at least one bucket.
    #[error("bucket count must be at least 1, got {count}")]
    InvalidBucketCount {
        /// Requested bucket count.
        count: usize,
    },
}

/// Errors from the `SQLite` response store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database: {0}")]
    Database(String),

    /// The schema has not been created yet.
    #[error("database not initialized. Run: chatbot init")]
    NotInitialized,

    /// Creating the schema failed.
    #[error("could not create schema: {0}")]
    Schema(String),
}

/// Errors from reading seed files and appending to the transcript.
#[derive(Error, Debug)]
pub enum IoError {
    /// No file at `path`.
    #[error("no such file: {path}")]
    FileNotFound {
        /// Requested path.
        path: String,
    },

    /// The file exists but could not be loaded.
    #[error("cannot read {path}: {reason}")]
    ReadFailed {
        /// Requested path.
        path: String,
        /// Underlying cause.
        reason: String,
    },

    /// The file could not be opened for appending or written.
    #[error("cannot write {path}: {reason}")]
    WriteFailed {
        /// Target path.
        path: String,
        /// Underlying cause.
        reason: String,
    },

    /// A JSON seed file does not have the categories layout.
    #[error("malformed seed file {path}: {reason}")]
    ParseFailed {
        /// Seed file path.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// Any other operating-system error.
    #[error("{0}")]
    Other(String),
}

/// Reasons a CLI command refuses to run.
#[derive(Error, Debug)]
pub enum CommandError {
    /// `init` would overwrite an existing database.
    #[error("database already exists at {path}; pass --force to recreate it")]
    DatabaseExists {
        /// Database path.
        path: String,
    },

    /// `add` was given a blank pattern.
    #[error("pattern must not be empty")]
    EmptyPattern,

    /// `reset` was run without `--yes`.
    #[error("refusing to reset without --yes")]
    ConfirmationRequired,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Other(err.to_string()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrappers_are_transparent() {
        let err: Error = TableError::InvalidBucketCount { count: 0 }.into();
        assert!(matches!(err, Error::Table(_)));
        assert_eq!(err.to_string(), "bucket count must be at least 1, got 0");

        let err: Error = StorageError::NotInitialized.into();
        assert_eq!(err.to_string(), "database not initialized. Run: chatbot init");

        let err: Error = CommandError::EmptyPattern.into();
        assert_eq!(err.to_string(), "pattern must not be empty");
    }

    #[test]
    fn test_config_message() {
        let err = Error::Config {
            message: "context capacity must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: context capacity must be at least 1"
        );
    }

    #[test]
    fn test_io_messages_name_the_path() {
        let missing = IoError::FileNotFound {
            path: "responses.txt".to_string(),
        };
        assert_eq!(missing.to_string(), "no such file: responses.txt");

        let malformed = IoError::ParseFailed {
            path: "qa_pairs.json".to_string(),
            reason: "missing field `categories`".to_string(),
        };
        assert!(malformed.to_string().starts_with("malformed seed file qa_pairs.json"));
    }

    #[test]
    fn test_command_messages() {
        let err = CommandError::DatabaseExists {
            path: "chatbot.db".to_string(),
        };
        assert!(err.to_string().contains("--force"));
        assert!(CommandError::ConfirmationRequired.to_string().contains("--yes"));
    }

    #[test]
    fn test_conversions() {
        let err: Error = std::io::Error::other("pipe closed").into();
        assert!(matches!(err, Error::Io(IoError::Other(_))));

        let err: Error = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, Error::Storage(StorageError::Database(_))));
    }
}
