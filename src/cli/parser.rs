//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::config::{
    ChatConfig, DEFAULT_LOG_FILE, DEFAULT_MAX_INPUT_LEN, DEFAULT_MAX_RESPONSE_LEN,
    DEFAULT_TYPING_DELAY_MS, Limits,
};
use crate::core::{DEFAULT_BUCKET_COUNT, DEFAULT_CONTEXT_CAPACITY};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Chatbot: a command-line conversational agent.
///
/// Matches free-text input against a table of canned responses. Runs an
/// interactive chat when no subcommand is given.
#[derive(Parser, Debug)]
#[command(name = "chatbot")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the chatbot database file.
    ///
    /// Defaults to `chatbot.db` in the current directory.
    #[arg(short, long, env = "CHATBOT_DB_PATH", global = true)]
    pub db_path: Option<PathBuf>,

    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute (defaults to `chat`).
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat(ChatArgs),

    /// Answer a single input and exit.
    Ask {
        /// Input text (multiple words are joined with spaces).
        #[arg(required = true, num_args = 1..)]
        input: Vec<String>,

        /// Response source options.
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Initialize the chatbot database.
    ///
    /// Creates the database file and schema if they don't exist.
    Init {
        /// Force re-initialization (destroys existing data).
        #[arg(short, long)]
        force: bool,
    },

    /// Load a seed file (`pattern|response` lines or JSON) into the database.
    Seed {
        /// Path to the seed file.
        file: PathBuf,
    },

    /// Add one pattern/response pair to the database.
    Add {
        /// Pattern to match.
        pattern: String,

        /// Response to give.
        response: String,

        /// Optional context label.
        #[arg(short, long)]
        context: Option<String>,
    },

    /// List stored pattern/response rows.
    List,

    /// Show logged conversations from the database.
    History {
        /// Maximum number of turns to show.
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show database status.
    Status,

    /// Delete all responses and conversations.
    Reset {
        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Where responses come from and how much text is considered.
///
/// Shared by `chat` and `ask`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SourceArgs {
    /// Answer from the database instead of the in-memory table.
    #[arg(short, long, conflicts_with = "seed")]
    pub persistent: bool,

    /// Seed file merged into the in-memory table.
    #[arg(short, long, env = "CHATBOT_SEED_FILE")]
    pub seed: Option<PathBuf>,

    /// Bucket count of the in-memory table.
    #[arg(long, env = "CHATBOT_BUCKETS", default_value_t = DEFAULT_BUCKET_COUNT)]
    pub buckets: usize,

    /// Maximum input bytes considered for matching.
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_LEN)]
    pub max_input: usize,

    /// Maximum response bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_RESPONSE_LEN)]
    pub max_response: usize,
}

impl Default for SourceArgs {
    fn default() -> Self {
        Self {
            persistent: false,
            seed: None,
            buckets: DEFAULT_BUCKET_COUNT,
            max_input: DEFAULT_MAX_INPUT_LEN,
            max_response: DEFAULT_MAX_RESPONSE_LEN,
        }
    }
}

impl SourceArgs {
    /// Builds a configuration for a single non-interactive answer.
    ///
    /// No transcript is written and colors are off.
    #[must_use]
    pub fn to_config(&self) -> ChatConfig {
        ChatConfig {
            bucket_count: self.buckets,
            limits: Limits {
                max_input_len: self.max_input,
                max_response_len: self.max_response,
            },
            typing_delay_ms: 0,
            color: false,
            log_file: None,
            seed_file: self.seed.clone(),
            ..ChatConfig::default()
        }
    }
}

/// Options of the interactive session.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ChatArgs {
    /// Response source options.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of recent messages kept as context.
    #[arg(long, default_value_t = DEFAULT_CONTEXT_CAPACITY)]
    pub context_size: usize,

    /// Delay between printed characters in milliseconds (0 disables).
    #[arg(long, default_value_t = DEFAULT_TYPING_DELAY_MS)]
    pub typing_delay_ms: u64,

    /// Disable ANSI colors.
    #[arg(long)]
    pub no_color: bool,

    /// Transcript log file.
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Disable the transcript log.
    #[arg(long)]
    pub no_log: bool,
}

impl Default for ChatArgs {
    fn default() -> Self {
        Self {
            source: SourceArgs::default(),
            context_size: DEFAULT_CONTEXT_CAPACITY,
            typing_delay_ms: DEFAULT_TYPING_DELAY_MS,
            no_color: false,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            no_log: false,
        }
    }
}

impl ChatArgs {
    /// Builds the session configuration.
    ///
    /// Colors are also disabled when `NO_COLOR` is set.
    #[must_use]
    pub fn to_config(&self) -> ChatConfig {
        ChatConfig {
            context_capacity: self.context_size,
            typing_delay_ms: self.typing_delay_ms,
            color: !self.no_color && std::env::var_os("NO_COLOR").is_none(),
            log_file: (!self.no_log).then(|| self.log_file.clone()),
            ..self.source.to_config()
        }
    }
}

impl Cli {
    /// Returns the database path, using the default if not specified.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::storage::DEFAULT_DB_PATH))
    }
}
