//! Core data structures for the chatbot.
//!
//! The response table and the conversation context are pure in-memory
//! structures with no I/O dependencies.

pub mod defaults;
pub mod history;
pub mod table;

pub use defaults::BUILTIN_RESPONSES;
pub use history::{ConversationContext, DEFAULT_CONTEXT_CAPACITY};
pub use table::{DEFAULT_BUCKET_COUNT, ResponseTable};
