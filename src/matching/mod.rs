//! Response matching.
//!
//! Turns a raw input line into a reply: the input is cut to a byte limit,
//! split into tokens, and resolved against a [`Responder`]. A miss falls back
//! to [`DEFAULT_RESPONSE`]; if the conversation context holds a question, the
//! reply is framed with [`CONTEXT_PREFIX`]. Every call returns a fresh owned
//! string, so earlier results are never overwritten by later calls.

pub mod tokenize;
pub mod traits;

pub use tokenize::{SEPARATORS, tokens};
pub use traits::Responder;

use crate::config::Limits;
use crate::core::{ConversationContext, ResponseTable};
use crate::error::Result;
use crate::io::truncate_bytes;

/// Reply used when no token has a stored response.
pub const DEFAULT_RESPONSE: &str =
    "I'm not sure how to respond to that. Try asking something else!";

/// Prefix added when the recent conversation contains a question.
pub const CONTEXT_PREFIX: &str = "Regarding your previous question, ";

/// Resolves input lines to responses under fixed byte limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Matcher {
    limits: Limits,
}

impl Matcher {
    /// Creates a matcher with the given limits.
    #[must_use]
    pub const fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// Resolves `input` against the table using the first-match policy.
    #[must_use]
    pub fn generate_response(&self, table: &ResponseTable, input: &str) -> String {
        let input = truncate_bytes(input, self.limits.max_input_len);
        self.finish(table.first_match(input))
    }

    /// Resolves `input` and frames it with the conversation context.
    ///
    /// The context is only read.
    #[must_use]
    pub fn get_contextual_response(
        &self,
        table: &ResponseTable,
        context: &ConversationContext,
        input: &str,
    ) -> String {
        let basic = self.generate_response(table, input);
        self.reframe(context, basic)
    }

    /// Resolves `input` against any responder, with optional context framing.
    ///
    /// # Errors
    ///
    /// Propagates query failures from the responder. A miss is not an error.
    pub fn resolve<R: Responder + ?Sized>(
        &self,
        responder: &R,
        context: Option<&ConversationContext>,
        input: &str,
    ) -> Result<String> {
        let input = truncate_bytes(input, self.limits.max_input_len);
        let found = responder.lookup(input)?;
        let basic = self.finish(found.as_deref());

        Ok(match context {
            Some(context) => self.reframe(context, basic),
            None => basic,
        })
    }

    /// Returns the fallback reply, framed by the context if one is given.
    ///
    /// Used when a responder cannot be queried at all.
    #[must_use]
    pub fn miss(&self, context: Option<&ConversationContext>) -> String {
        let basic = self.finish(None);
        match context {
            Some(context) => self.reframe(context, basic),
            None => basic,
        }
    }

    fn finish(&self, found: Option<&str>) -> String {
        let response = found.unwrap_or(DEFAULT_RESPONSE);
        truncate_bytes(response, self.limits.max_response_len).to_string()
    }

    fn reframe(&self, context: &ConversationContext, basic: String) -> String {
        if !context.contains_question() {
            return basic;
        }
        let framed = format!("{CONTEXT_PREFIX}{basic}");
        truncate_bytes(&framed, self.limits.max_response_len).to_string()
    }
}

/// Resolves `input` with the default limits.
///
/// # Examples
///
/// ```
/// use chatbot_rs::core::ResponseTable;
/// use chatbot_rs::matching::generate_response;
///
/// let mut table = ResponseTable::new(64).unwrap();
/// table.set("hi", "Hello!");
/// assert_eq!(generate_response(&table, "well hi there"), "Hello!");
/// ```
#[must_use]
pub fn generate_response(table: &ResponseTable, input: &str) -> String {
    Matcher::default().generate_response(table, input)
}

/// Resolves and context-frames `input` with the default limits.
#[must_use]
pub fn get_contextual_response(
    table: &ResponseTable,
    context: &ConversationContext,
    input: &str,
) -> String {
    Matcher::default().get_contextual_response(table, context, input)
}
