//! Append-only transcript of conversation turns.
//!
//! Each turn is written as:
//!
//! ```text
//! [Tue Oct 16 09:30:00 2026] User: hi
//! [Tue Oct 16 09:30:00 2026] Bot: Hello!
//!
//! ```
//!
//! The file is opened per turn in append mode, so a session never holds it
//! open between turns.

use crate::error::{IoError, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Timestamp format matching C `ctime` output without the newline.
const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Transcript log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    path: PathBuf,
}

impl Transcript {
    /// Creates a transcript writing to `path`.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Returns the log path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn append(&self, user_input: &str, response: &str) -> Result<()> {
        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let entry = format_entry(&stamp, user_input, response);

        let write_failed = |e: std::io::Error| IoError::WriteFailed {
            path: self.path.to_string_lossy().to_string(),
            reason: e.to_string(),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_failed)?;
        file.write_all(entry.as_bytes()).map_err(write_failed)?;
        Ok(())
    }

    /// Appends one turn, logging instead of failing.
    ///
    /// A transcript problem must never interrupt the conversation.
    pub fn record(&self, user_input: &str, response: &str) {
        if let Err(e) = self.append(user_input, response) {
            tracing::warn!(
                path = %self.path().display(),
                error = %e,
                "could not write transcript"
            );
        }
    }
}

fn format_entry(stamp: &str, user_input: &str, response: &str) -> String {
    format!("[{stamp}] User: {user_input}\n[{stamp}] Bot: {response}\n\n")
}
