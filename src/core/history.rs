//! Conversation context ring.
//!
//! Keeps the last N exchanged messages (user inputs and bot responses) in a
//! fixed array of slots. Each push overwrites the oldest slot, so memory stays
//! bounded no matter how long the session runs.

use crate::error::{Error, Result};
use serde::Serialize;

/// Default number of context slots.
pub const DEFAULT_CONTEXT_CAPACITY: usize = 5;

/// Fixed-capacity circular log of recent messages.
///
/// # Examples
///
/// ```
/// use chatbot_rs::core::ConversationContext;
///
/// let mut ctx = ConversationContext::default();
/// ctx.push("how are you?");
/// assert!(ctx.contains_question());
/// ctx.clear();
/// assert!(!ctx.contains_question());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationContext {
    /// Message slots; `None` until first written.
    slots: Vec<Option<String>>,
    /// Index of the next slot to write.
    cursor: usize,
}

impl ConversationContext {
    /// Creates an empty context with `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::Config {
                message: "context capacity must be at least 1".to_string(),
            });
        }
        Ok(Self::with_slots(capacity))
    }

    fn with_slots(capacity: usize) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(capacity, || None);
        Self { slots, cursor: 0 }
    }

    /// Stores a copy of `message` in the slot at the cursor and advances it.
    ///
    /// Whatever previously occupied that slot is dropped.
    pub fn push(&mut self, message: &str) {
        self.slots[self.cursor] = Some(message.to_string());
        self.cursor = (self.cursor + 1) % self.slots.len();
    }

    /// Empties every slot and resets the cursor.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.cursor = 0;
    }

    /// Returns `true` if any stored message contains a `?`.
    #[must_use]
    pub fn contains_question(&self) -> bool {
        self.iter().any(|message| message.contains('?'))
    }

    /// Iterates over occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(Option::as_deref)
    }

    /// Returns the occupied messages ordered oldest to newest.
    #[must_use]
    pub fn recent(&self) -> Vec<&str> {
        let (newer, older) = self.slots.split_at(self.cursor);
        older
            .iter()
            .chain(newer)
            .filter_map(Option::as_deref)
            .collect()
    }

    /// Returns the number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` if no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::with_slots(DEFAULT_CONTEXT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let ctx = ConversationContext::default();
        assert_eq!(ctx.capacity(), DEFAULT_CONTEXT_CAPACITY);
        assert!(ctx.is_empty());
        assert_eq!(ctx.len(), 0);
        assert!(!ctx.contains_question());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            ConversationContext::new(0),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_push_and_wrap() {
        let mut ctx = ConversationContext::new(3).unwrap();
        for msg in ["a", "b", "c", "d"] {
            ctx.push(msg);
        }

        assert_eq!(ctx.len(), 3);
        // "d" overwrote slot 0
        assert_eq!(ctx.iter().collect::<Vec<_>>(), vec!["d", "b", "c"]);
        assert_eq!(ctx.recent(), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_recent_before_full() {
        let mut ctx = ConversationContext::new(4).unwrap();
        ctx.push("first");
        ctx.push("second");
        assert_eq!(ctx.recent(), vec!["first", "second"]);
    }

    #[test]
    fn test_question_ages_out() {
        let mut ctx = ConversationContext::new(2).unwrap();
        ctx.push("what is rust?");
        assert!(ctx.contains_question());

        ctx.push("ok");
        assert!(ctx.contains_question());

        ctx.push("fine");
        assert!(!ctx.contains_question());
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut ctx = ConversationContext::new(2).unwrap();
        ctx.push("x");
        ctx.clear();
        assert!(ctx.is_empty());

        ctx.push("y");
        assert_eq!(ctx.iter().collect::<Vec<_>>(), vec!["y"]);
        assert_eq!(ctx.recent(), vec!["y"]);
    }
}
