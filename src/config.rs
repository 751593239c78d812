//! Runtime configuration.
//!
//! Collects the sizing limits, presentation settings, and file locations a
//! chat session needs. Values come from CLI arguments (with environment
//! fallbacks) and are validated before a session starts.

use crate::core::{DEFAULT_BUCKET_COUNT, DEFAULT_CONTEXT_CAPACITY};
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Maximum input bytes considered for matching.
pub const DEFAULT_MAX_INPUT_LEN: usize = 1023;

/// Maximum response bytes returned to the caller.
pub const DEFAULT_MAX_RESPONSE_LEN: usize = 1023;

/// Delay between printed characters, in milliseconds.
pub const DEFAULT_TYPING_DELAY_MS: u64 = 50;

/// Default transcript log path.
pub const DEFAULT_LOG_FILE: &str = "chatbot.log";

/// Byte limits applied by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Input is cut to this many bytes before tokenizing.
    pub max_input_len: usize,
    /// Responses are cut to this many bytes.
    pub max_response_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            max_response_len: DEFAULT_MAX_RESPONSE_LEN,
        }
    }
}

/// Settings for one chat session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Bucket count of the in-memory response table.
    pub bucket_count: usize,
    /// Number of context slots.
    pub context_capacity: usize,
    /// Matcher byte limits.
    pub limits: Limits,
    /// Per-character typing delay; zero prints responses at once.
    pub typing_delay_ms: u64,
    /// Emit ANSI colors.
    pub color: bool,
    /// Transcript log file, if turn logging is enabled.
    pub log_file: Option<PathBuf>,
    /// Optional seed file loaded before the session starts.
    pub seed_file: Option<PathBuf>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            context_capacity: DEFAULT_CONTEXT_CAPACITY,
            limits: Limits::default(),
            typing_delay_ms: DEFAULT_TYPING_DELAY_MS,
            color: true,
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            seed_file: None,
        }
    }
}

impl ChatConfig {
    /// Checks that every size is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("bucket count", self.bucket_count),
            ("context capacity", self.context_capacity),
            ("max input length", self.limits.max_input_len),
            ("max response length", self.limits.max_response_len),
        ];

        for (name, value) in checks {
            if value == 0 {
                return Err(Error::Config {
                    message: format!("{name} must be at least 1"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ChatConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bucket_count, 65_536);
        assert_eq!(config.context_capacity, 5);
        assert_eq!(config.limits.max_input_len, 1023);
    }

    #[test]
    fn test_zero_sizes_rejected() {
        let config = ChatConfig {
            context_capacity: 0,
            ..ChatConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("context capacity"));

        let config = ChatConfig {
            limits: Limits {
                max_input_len: 1,
                max_response_len: 0,
            },
            ..ChatConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
