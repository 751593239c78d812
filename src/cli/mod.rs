//! CLI layer for the chatbot.
//!
//! Provides the command-line interface using clap: the interactive session
//! plus commands for managing the response database.

pub mod commands;
pub mod output;
pub mod parser;
pub mod session;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{ChatArgs, Cli, Commands, SourceArgs};
pub use session::{Backend, Session};
