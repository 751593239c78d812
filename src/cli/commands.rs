//! Dispatch from parsed arguments to chat sessions and database commands.

use crate::cli::output::{
    OutputFormat, format_answer, format_history, format_message, format_responses, format_status,
};
use crate::cli::parser::{ChatArgs, Cli, Commands, SourceArgs};
use crate::config::ChatConfig;
use crate::cli::session::{Backend, Session};
use crate::error::{CommandError, IoError, Result, StorageError};
use crate::io::{load_seed_file, seed_storage};
use crate::matching::Matcher;
use crate::storage::{SqliteStorage, Storage};
use std::io;
use std::path::Path;

/// Runs the selected command and returns what should be printed.
///
/// `chat` (also the default with no subcommand) talks to stdin and stdout
/// itself and returns an empty string.
///
/// # Errors
///
/// Returns the first configuration, database, or file error encountered.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let db_path = cli.get_db_path();

    match &cli.command {
        None => cmd_chat(&db_path, &ChatArgs::default()),
        Some(Commands::Chat(args)) => cmd_chat(&db_path, args),
        Some(Commands::Ask { input, source }) => {
            cmd_ask(&db_path, &input.join(" "), source, format)
        }
        Some(Commands::Init { force }) => cmd_init(&db_path, *force, format),
        Some(Commands::Seed { file }) => cmd_seed(&db_path, file, format),
        Some(Commands::Add {
            pattern,
            response,
            context,
        }) => cmd_add(&db_path, pattern, response, context.as_deref(), format),
        Some(Commands::List) => cmd_list(&db_path, format),
        Some(Commands::History { limit }) => cmd_history(&db_path, *limit, format),
        Some(Commands::Status) => cmd_status(&db_path, format),
        Some(Commands::Reset { yes }) => cmd_reset(&db_path, *yes, format),
    }
}

/// Opens the database, refusing one that `init` never touched.
fn open_storage(db_path: &Path) -> Result<SqliteStorage> {
    let storage = SqliteStorage::open(db_path)?;

    if !storage.is_initialized()? {
        return Err(StorageError::NotInitialized.into());
    }

    Ok(storage)
}

/// Builds the response backend for `chat` and `ask`.
fn build_backend(db_path: &Path, source: &SourceArgs, config: &ChatConfig) -> Result<Backend> {
    if source.persistent {
        Backend::sqlite(db_path)
    } else {
        Backend::memory(config)
    }
}

fn cmd_chat(db_path: &Path, args: &ChatArgs) -> Result<String> {
    let config = args.to_config();
    config.validate()?;
    let backend = build_backend(db_path, &args.source, &config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(backend, &config, stdout.lock())?;
    session.run(stdin.lock())?;

    Ok(String::new())
}

fn cmd_ask(
    db_path: &Path,
    input: &str,
    source: &SourceArgs,
    format: OutputFormat,
) -> Result<String> {
    let config = source.to_config();
    config.validate()?;
    let backend = build_backend(db_path, source, &config)?;

    let matcher = Matcher::new(config.limits);
    let response = matcher.resolve(backend.responder(), None, input)?;

    Ok(format_answer(input, &response, format))
}

fn cmd_init(db_path: &Path, force: bool, format: OutputFormat) -> Result<String> {
    if db_path.exists() && !force {
        return Err(CommandError::DatabaseExists {
            path: db_path.display().to_string(),
        }
        .into());
    }

    if force && db_path.exists() {
        std::fs::remove_file(db_path).map_err(|e| IoError::WriteFailed {
            path: db_path.display().to_string(),
            reason: e.to_string(),
        })?;
    }

    let mut storage = SqliteStorage::open(db_path)?;
    storage.init()?;

    Ok(format_message(
        &format!("Initialized chatbot database at: {}", db_path.display()),
        format,
    ))
}

fn cmd_seed(db_path: &Path, file: &Path, format: OutputFormat) -> Result<String> {
    let mut storage = open_storage(db_path)?;
    let pairs = load_seed_file(file)?;
    let count = seed_storage(&mut storage, &pairs)?;
    tracing::info!(path = %file.display(), count, "seeded database");

    Ok(format_message(
        &format!("Seeded {count} responses from {}", file.display()),
        format,
    ))
}

fn cmd_add(
    db_path: &Path,
    pattern: &str,
    response: &str,
    context: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    if pattern.trim().is_empty() {
        return Err(CommandError::EmptyPattern.into());
    }

    let mut storage = open_storage(db_path)?;
    let id = storage.add_response(pattern, response, context)?;

    Ok(format_message(
        &format!("Added response {id} for pattern '{pattern}'"),
        format,
    ))
}

fn cmd_list(db_path: &Path, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let records = storage.list_responses()?;
    Ok(format_responses(&records, format))
}

fn cmd_history(db_path: &Path, limit: usize, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let records = storage.recent_conversations(limit)?;
    Ok(format_history(&records, format))
}

fn cmd_status(db_path: &Path, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let stats = storage.stats()?;
    Ok(format_status(&stats, format))
}

fn cmd_reset(db_path: &Path, yes: bool, format: OutputFormat) -> Result<String> {
    if !yes {
        return Err(CommandError::ConfirmationRequired.into());
    }

    let mut storage = open_storage(db_path)?;
    storage.reset()?;

    Ok(format_message("Chatbot database reset.", format))
}
