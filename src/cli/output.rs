//! Rendering of non-interactive command results.
//!
//! Every command returns its output as a string, either plain text for a
//! terminal or pretty-printed JSON for scripts.

use crate::storage::{ConversationRecord, ResponseRecord, StorageStats};
use serde::Serialize;
use std::fmt::Write;

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain lines.
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Maps a `--format` value; anything but `json` means text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Renders database counts and schema version.
#[must_use]
pub fn format_status(stats: &StorageStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str("Chatbot Status\n");
            output.push_str("==============\n\n");
            let _ = writeln!(output, "  Responses:     {}", stats.response_count);
            let _ = writeln!(output, "  Conversations: {}", stats.conversation_count);
            let _ = writeln!(output, "  Schema:        v{}", stats.schema_version);
            if let Some(size) = stats.db_size {
                let _ = writeln!(output, "  DB size:       {size} bytes");
            }
            output
        }
        OutputFormat::Json => format_json(stats),
    }
}

/// Formats logged conversation turns.
#[must_use]
pub fn format_history(records: &[ConversationRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if records.is_empty() {
                return "No conversations logged.\n".to_string();
            }
            let mut output = String::new();
            for record in records {
                let _ = writeln!(output, "[{}] User: {}", record.timestamp, record.user_input);
                let _ = writeln!(output, "[{}] Bot: {}", record.timestamp, record.bot_response);
                output.push('\n');
            }
            output
        }
        OutputFormat::Json => format_json(&records),
    }
}

/// Renders stored responses, one row per line.
#[must_use]
pub fn format_responses(records: &[ResponseRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if records.is_empty() {
                return "No responses stored.\n".to_string();
            }
            let mut output = String::new();
            for record in records {
                let _ = write!(
                    output,
                    "{:>4}  {} -> {}",
                    record.id, record.pattern, record.response
                );
                if let Some(context) = &record.context {
                    let _ = write!(output, "  [{context}]");
                }
                output.push('\n');
            }
            output
        }
        OutputFormat::Json => format_json(&records),
    }
}

/// Formats a one-shot answer.
#[must_use]
pub fn format_answer(input: &str, response: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{response}\n"),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Answer<'a> {
                input: &'a str,
                response: &'a str,
            }
            format_json(&Answer { input, response })
        }
    }
}

/// Formats a simple status message.
#[must_use]
pub fn format_message(message: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{message}\n"),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Message<'a> {
                message: &'a str,
            }
            format_json(&Message { message })
        }
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &crate::error::Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                error: String,
            }
            format_json(&ErrorOutput {
                error: error.to_string(),
            })
        }
    }
}

fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
