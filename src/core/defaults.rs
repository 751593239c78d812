//! Built-in responses loaded before any seed file.

use crate::core::ResponseTable;

/// Pattern/response pairs every in-memory table starts with.
pub const BUILTIN_RESPONSES: &[(&str, &str)] = &[
    ("hi", "Hello! How can I help you today?"),
    ("hey", "Hey there! What's on your mind?"),
    ("hello", "Hi! Nice to meet you!"),
    ("how", "I'm doing well, thanks for asking! How about you?"),
    ("what", "That's an interesting question! Let me think..."),
    ("why", "That's a good question! I think it's because..."),
    (
        "python",
        "Python is a great programming language! I love its simplicity and power.",
    ),
    (
        "programming",
        "Programming is fun! I especially enjoy helping people learn to code.",
    ),
    ("bye", "Goodbye! Have a great day!"),
    (
        "thanks",
        "You're welcome! Let me know if you need anything else.",
    ),
];

impl ResponseTable {
    /// Binds every built-in response.
    pub fn load_builtins(&mut self) {
        self.extend(BUILTIN_RESPONSES.iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builtins() {
        let mut table = ResponseTable::new(64).unwrap();
        table.load_builtins();

        assert_eq!(table.len(), BUILTIN_RESPONSES.len());
        assert_eq!(table.get("hi"), Some("Hello! How can I help you today?"));
        assert_eq!(
            table.get("thanks"),
            Some("You're welcome! Let me know if you need anything else.")
        );
    }
}
