//! Interactive chat session.
//!
//! Reads one line per turn, resolves it against the active backend, prints
//! the reply, and records the exchange in the conversation context. The loop
//! ends on end of input, two consecutive blank lines, an exit keyword
//! (`exit`, `quit`, `bye`), or a line starting with `/exit`.

use crate::config::ChatConfig;
use crate::core::{ConversationContext, ResponseTable};
use crate::error::Result;
use crate::io::{Transcript, graphemes, load_seed_file, seed_table};
use crate::matching::{Matcher, Responder};
use crate::storage::{SqliteStorage, Storage};
use colored::{Color, Colorize};
use std::borrow::Cow;
use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

/// Keywords that end the session when typed alone (case-insensitive).
pub const EXIT_KEYWORDS: &[&str] = &["exit", "quit", "bye"];

/// ANSI sequence that clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Where responses come from.
pub enum Backend {
    /// In-memory response table.
    Memory(ResponseTable),
    /// `SQLite` store; turns are also logged to its conversation table.
    Sqlite(SqliteStorage),
}

impl Backend {
    /// Builds an in-memory backend with the built-in responses and, if
    /// configured, the seed file.
    ///
    /// A missing or unreadable seed file is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be created.
    pub fn memory(config: &ChatConfig) -> Result<Self> {
        let mut table = ResponseTable::new(config.bucket_count)?;
        table.load_builtins();

        if let Some(seed_file) = &config.seed_file {
            match load_seed_file(seed_file) {
                Ok(pairs) => {
                    seed_table(&mut table, &pairs);
                    tracing::info!(path = %seed_file.display(), pairs = pairs.len(), "loaded seed file");
                }
                Err(e) => {
                    tracing::warn!(path = %seed_file.display(), error = %e, "skipping seed file");
                }
            }
        }

        Ok(Self::Memory(table))
    }

    /// Opens the database backend, creating the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn sqlite(db_path: &std::path::Path) -> Result<Self> {
        let mut storage = SqliteStorage::open(db_path)?;
        storage.init()?;
        Ok(Self::Sqlite(storage))
    }

    /// Returns the backend as a responder.
    #[must_use]
    pub fn responder(&self) -> &dyn Responder {
        match self {
            Self::Memory(table) => table,
            Self::Sqlite(storage) => storage,
        }
    }

    fn log_turn(&mut self, input: &str, response: &str) {
        if let Self::Sqlite(storage) = self
            && let Err(e) = storage.log_conversation(input, response)
        {
            tracing::warn!(error = %e, "could not log conversation");
        }
    }
}

/// Whether the loop keeps going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// End the session.
    Exit,
}

/// One interactive conversation.
pub struct Session<W: Write> {
    backend: Backend,
    matcher: Matcher,
    context: ConversationContext,
    transcript: Option<Transcript>,
    typing_delay: Duration,
    color: bool,
    out: W,
}

impl<W: Write> Session<W> {
    /// Creates a session writing to `out`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the config is invalid.
    pub fn new(backend: Backend, config: &ChatConfig, out: W) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            backend,
            matcher: Matcher::new(config.limits),
            context: ConversationContext::new(config.context_capacity)?,
            transcript: config.log_file.clone().map(Transcript::new),
            typing_delay: Duration::from_millis(config.typing_delay_ms),
            color: config.color,
            out,
        })
    }

    /// Returns the conversation context.
    #[must_use]
    pub const fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// Consumes the session and returns the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs the session until input ends or the user exits.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        tracing::debug!(backend = self.backend.responder().name(), "session started");
        self.print_welcome()?;

        let mut buf = Vec::new();
        let mut blank_streak = 0;

        loop {
            self.print_prompt()?;

            let Some(line) = read_line(&mut input, &mut buf)? else {
                let farewell = self.paint("Goodbye!", Color::Cyan);
                writeln!(self.out, "\n{farewell}")?;
                break;
            };

            if line.trim().is_empty() {
                blank_streak += 1;
                if blank_streak >= 2 {
                    self.farewell()?;
                    break;
                }
                continue;
            }
            blank_streak = 0;

            if self.handle_line(&line)? == Flow::Exit {
                break;
            }
        }

        self.context.clear();
        tracing::debug!("session ended");
        Ok(())
    }

    /// Processes one non-blank line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let trimmed = line.trim();

        if is_exit_keyword(trimmed) || trimmed.starts_with("/exit") {
            self.farewell()?;
            return Ok(Flow::Exit);
        }

        if let Some(command) = trimmed.strip_prefix('/') {
            self.handle_command(command)?;
            return Ok(Flow::Continue);
        }

        let response = match self
            .matcher
            .resolve(self.backend.responder(), Some(&self.context), line)
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "lookup failed, using default response");
                self.matcher.miss(Some(&self.context))
            }
        };

        self.print_response(&response)?;

        self.context.push(line);
        self.context.push(&response);
        if let Some(transcript) = &self.transcript {
            transcript.record(line, &response);
        }
        self.backend.log_turn(line, &response);

        Ok(Flow::Continue)
    }

    fn handle_command(&mut self, command: &str) -> Result<()> {
        match command {
            "help" => self.print_help(),
            "clear" => {
                write!(self.out, "{CLEAR_SCREEN}")?;
                self.print_welcome()
            }
            "history" => self.print_history(),
            _ => {
                let hint = self.paint("/help", Color::Yellow);
                writeln!(self.out, "Unknown command. Type {hint} for available commands.")?;
                Ok(())
            }
        }
    }

    fn print_welcome(&mut self) -> Result<()> {
        let rule = self.paint("==================================", Color::Cyan);
        let title = self.paint("       Chatbot v1.0.0", Color::Green);
        let exit = self.paint("/exit", Color::Yellow);
        let enter = self.paint("Enter", Color::Yellow);
        let help = self.paint("/help", Color::Yellow);

        writeln!(self.out, "\n{rule}\n{title}\n{rule}")?;
        writeln!(self.out, "\nWelcome! I'm here to chat with you.")?;
        writeln!(self.out, "Commands:")?;
        writeln!(self.out, "  - Type {exit} to quit")?;
        writeln!(self.out, "  - Press {enter} twice to quit")?;
        writeln!(self.out, "  - Type {help} for more commands")?;
        writeln!(self.out, "  - Just type naturally to chat with me\n")?;
        Ok(())
    }

    fn print_help(&mut self) -> Result<()> {
        let heading = self.paint("Available Commands:", Color::Cyan);
        writeln!(self.out, "\n{heading}")?;
        for (name, description) in [
            ("/help", "Show this help message"),
            ("/exit", "Exit the chatbot"),
            ("/clear", "Clear the screen"),
            ("/history", "Show conversation history"),
        ] {
            let name = self.paint(&format!("{name:<9}"), Color::Yellow);
            writeln!(self.out, "  {name} - {description}")?;
        }
        Ok(())
    }

    fn print_history(&mut self) -> Result<()> {
        if self.context.is_empty() {
            writeln!(self.out, "No conversation history yet.")?;
            return Ok(());
        }

        let heading = format!(
            "Conversation history (last {} messages):",
            self.context.capacity()
        );
        let heading = self.paint(&heading, Color::Cyan);
        writeln!(self.out, "\n{heading}")?;
        for (i, message) in self.context.recent().iter().enumerate() {
            writeln!(self.out, "  {}. {message}", i + 1)?;
        }
        Ok(())
    }

    fn print_prompt(&mut self) -> Result<()> {
        let prompt = self.paint("➜ ", Color::Green);
        write!(self.out, "\n{prompt}")?;
        self.out.flush()?;
        Ok(())
    }

    fn print_response(&mut self, response: &str) -> Result<()> {
        let marker = self.paint("❯ ", Color::Blue);
        write!(self.out, "{marker}")?;

        if self.typing_delay.is_zero() {
            let text = self.paint(response, Color::Blue);
            write!(self.out, "{text}")?;
        } else {
            for grapheme in graphemes(response) {
                let text = self.paint(grapheme, Color::Blue);
                write!(self.out, "{text}")?;
                self.out.flush()?;
                thread::sleep(self.typing_delay);
            }
        }

        writeln!(self.out)?;
        Ok(())
    }

    fn farewell(&mut self) -> Result<()> {
        let text = self.paint("Goodbye! Have a great day!", Color::Cyan);
        writeln!(self.out, "\n{text}")?;
        Ok(())
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Reads one line without its terminator; `None` at end of input.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than ending the session.
fn read_line<R: BufRead>(input: &mut R, buf: &mut Vec<u8>) -> Result<Option<String>> {
    buf.clear();
    if input.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }

    let mut end = buf.len();
    if buf[..end].ends_with(b"\n") {
        end -= 1;
        if buf[..end].ends_with(b"\r") {
            end -= 1;
        }
    }

    let line = String::from_utf8_lossy(&buf[..end]);
    if matches!(line, Cow::Owned(_)) {
        tracing::warn!("input line was not valid UTF-8; invalid bytes replaced");
    }
    Ok(Some(line.into_owned()))
}

/// Returns `true` if `line` is one of [`EXIT_KEYWORDS`], ignoring case.
#[must_use]
pub fn is_exit_keyword(line: &str) -> bool {
    EXIT_KEYWORDS
        .iter()
        .any(|keyword| line.eq_ignore_ascii_case(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::matching::{CONTEXT_PREFIX, DEFAULT_RESPONSE};
    use test_case::test_case;

    fn quiet_config() -> ChatConfig {
        ChatConfig {
            typing_delay_ms: 0,
            color: false,
            log_file: None,
            bucket_count: 64,
            ..ChatConfig::default()
        }
    }

    fn run(input: &str) -> String {
        let config = quiet_config();
        let backend = Backend::memory(&config).unwrap();
        let mut session = Session::new(backend, &config, Vec::new()).unwrap();
        session.run(input.as_bytes()).unwrap();
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test_case("exit"; "lowercase exit")]
    #[test_case("QUIT"; "uppercase quit")]
    #[test_case("Bye"; "mixed case bye")]
    fn test_exit_keywords(word: &str) {
        assert!(is_exit_keyword(word));
    }

    #[test_case("exiting"; "prefix")]
    #[test_case("goodbye"; "suffix")]
    #[test_case(""; "empty")]
    fn test_not_exit_keywords(word: &str) {
        assert!(!is_exit_keyword(word));
    }

    #[test]
    fn test_reply_and_eof() {
        let output = run("hi\n");
        assert!(output.contains("Welcome! I'm here to chat with you."));
        assert!(output.contains("❯ Hello! How can I help you today?"));
        assert!(output.trim_end().ends_with("Goodbye!"));
    }

    #[test]
    fn test_exit_keyword_stops_reading() {
        let output = run("bye\nhi\n");
        assert!(output.contains("Goodbye! Have a great day!"));
        assert!(!output.contains("How can I help you"));
    }

    #[test]
    fn test_two_blank_lines_exit() {
        let output = run("\n\nhi\n");
        assert!(output.contains("Goodbye! Have a great day!"));
        assert!(!output.contains("How can I help you"));
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_session() {
        let config = quiet_config();
        let backend = Backend::memory(&config).unwrap();
        let mut session = Session::new(backend, &config, Vec::new()).unwrap();
        session.run(&b"caf\xe9\nhi\n"[..]).unwrap();

        let output = String::from_utf8(session.into_output()).unwrap();
        assert!(output.contains(&format!("❯ {DEFAULT_RESPONSE}")));
        assert!(output.contains("❯ Hello! How can I help you today?"));
    }

    #[test]
    fn test_read_line_strips_terminators() {
        let mut input = &b"hi\r\nbye\nlast"[..];
        let mut buf = Vec::new();
        assert_eq!(read_line(&mut input, &mut buf).unwrap().as_deref(), Some("hi"));
        assert_eq!(read_line(&mut input, &mut buf).unwrap().as_deref(), Some("bye"));
        assert_eq!(read_line(&mut input, &mut buf).unwrap().as_deref(), Some("last"));
        assert_eq!(read_line(&mut input, &mut buf).unwrap(), None);
    }

    #[test]
    fn test_single_blank_line_continues() {
        let output = run("\nhi\n");
        assert!(output.contains("How can I help you"));
    }

    #[test]
    fn test_slash_exit_prefix() {
        let output = run("/exit now\nhi\n");
        assert!(output.contains("Goodbye! Have a great day!"));
        assert!(!output.contains("How can I help you"));
    }

    #[test]
    fn test_context_reframes_after_question() {
        let output = run("what is this?\nhi\n");
        assert!(output.contains("❯ That's an interesting question! Let me think..."));
        assert!(output.contains("❯ Regarding your previous question, Hello!"));
    }

    #[test]
    fn test_help_history_and_unknown() {
        let output = run("/help\n/history\nhi\n/history\n/nope\n");
        assert!(output.contains("Available Commands:"));
        assert!(output.contains("No conversation history yet."));
        assert!(output.contains("  1. hi"));
        assert!(output.contains("  2. Hello! How can I help you today?"));
        assert!(output.contains("Unknown command."));
    }

    #[test]
    fn test_clear_reprints_banner() {
        let output = run("/clear\n");
        assert!(output.contains(CLEAR_SCREEN));
        assert_eq!(output.matches("Chatbot v1.0.0").count(), 2);
    }

    #[test]
    fn test_context_bounded() {
        let config = ChatConfig {
            context_capacity: 2,
            ..quiet_config()
        };
        let backend = Backend::memory(&config).unwrap();
        let mut session = Session::new(backend, &config, Vec::new()).unwrap();

        session.handle_line("why?").unwrap();
        assert!(session.context().contains_question());
        session.handle_line("xyzzy").unwrap();
        assert_eq!(session.context().len(), 2);
        let framed = format!("{CONTEXT_PREFIX}{DEFAULT_RESPONSE}");
        assert_eq!(session.context().recent(), vec!["xyzzy", framed.as_str()]);
    }

    #[test]
    fn test_transcript_written() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let log_path = temp_dir.path().join("chat.log");
        let config = ChatConfig {
            log_file: Some(log_path.clone()),
            ..quiet_config()
        };
        let backend = Backend::memory(&config).unwrap();
        let mut session = Session::new(backend, &config, Vec::new()).unwrap();
        session.run("hi\n".as_bytes()).unwrap();

        let log = std::fs::read_to_string(log_path).unwrap();
        assert!(log.contains("] User: hi\n"));
        assert!(log.contains("] Bot: Hello! How can I help you today?\n"));
    }

    #[test]
    fn test_missing_seed_file_is_not_fatal() {
        let config = ChatConfig {
            seed_file: Some("/nonexistent/seed.txt".into()),
            ..quiet_config()
        };
        let backend = Backend::memory(&config).unwrap();
        assert!(backend.responder().lookup("hi").unwrap().is_some());
    }

    #[test]
    fn test_invalid_bucket_count_is_fatal() {
        let config = ChatConfig {
            bucket_count: 0,
            ..quiet_config()
        };
        assert!(matches!(Backend::memory(&config), Err(Error::Table(_))));
    }

    #[test]
    fn test_sqlite_backend_logs_turns() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("chat.db");
        let config = quiet_config();

        let mut backend = Backend::sqlite(&db_path).unwrap();
        if let Backend::Sqlite(storage) = &mut backend {
            storage.add_response("weather", "Sunny today.", None).unwrap();
        }
        let mut session = Session::new(backend, &config, Vec::new()).unwrap();
        session.run("how is the WEATHER\n".as_bytes()).unwrap();

        let output = String::from_utf8(session.into_output()).unwrap();
        assert!(output.contains("❯ Sunny today."));

        let storage = SqliteStorage::open(&db_path).unwrap();
        assert_eq!(storage.recent_conversations(10).unwrap().len(), 1);
    }
}
