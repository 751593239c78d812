//! Responder trait definition.
//!
//! A responder answers the question "is there a canned response for this
//! input?". The matcher layers truncation, fallback, and context framing on
//! top of any responder, so the in-memory table and the `SQLite` store are
//! interchangeable inside a chat session.

use crate::core::ResponseTable;
use crate::error::Result;
use crate::matching::tokenize::tokens;

/// Source of canned responses.
pub trait Responder {
    /// Looks up a response for `input`.
    ///
    /// `Ok(None)` means no match; that is a normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn lookup(&self, input: &str) -> Result<Option<String>>;

    /// Returns a short name for logging.
    fn name(&self) -> &'static str;
}

impl ResponseTable {
    /// Returns the value of the first token, left to right, that has one.
    #[must_use]
    pub fn first_match(&self, input: &str) -> Option<&str> {
        tokens(input).find_map(|token| self.get(token))
    }
}

impl Responder for ResponseTable {
    fn lookup(&self, input: &str) -> Result<Option<String>> {
        Ok(self.first_match(input).map(str::to_string))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
