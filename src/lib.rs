//! # chatbot-rs
//!
//! A command-line conversational agent that maps free-text input to canned
//! responses.
//!
//! ## Features
//!
//! - **Response table**: fixed-bucket hash table with sorted collision chains
//! - **Conversation context**: bounded ring of recent messages
//! - **Matching**: first-token-match lookup with context-aware framing
//! - **`SQLite` Storage**: optional persistent responses with fuzzy matching
//!   and a conversation log

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod matching;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use config::{ChatConfig, Limits};
pub use core::{ConversationContext, ResponseTable};

// Re-export matching API
pub use matching::{
    CONTEXT_PREFIX, DEFAULT_RESPONSE, Matcher, Responder, generate_response,
    get_contextual_response,
};

// Re-export storage types
pub use storage::{DEFAULT_DB_PATH, SqliteStorage, Storage};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
