//! Seed data loading.
//!
//! Two file formats populate the response dictionary before a session:
//!
//! - **Lines**: one `pattern|response` pair per line.
//! - **JSON**: `{"categories": {"<name>": [{"patterns": [...], "response": "...",
//!   "context": "..."}]}}`, producing one pair per pattern.
//!
//! Files ending in `.json` are parsed as JSON; anything else as lines.

use crate::core::ResponseTable;
use crate::error::{IoError, Result};
use crate::io::read_file;
use crate::storage::Storage;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One pattern/response pair read from a seed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPair {
    /// Pattern (a single token for the in-memory table).
    pub pattern: String,
    /// Canned response.
    pub response: String,
    /// Optional context label (JSON format only).
    pub context: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeedDocument {
    categories: BTreeMap<String, Vec<QaPair>>,
}

#[derive(Debug, Deserialize)]
struct QaPair {
    #[serde(default)]
    patterns: Vec<String>,
    response: String,
    #[serde(default)]
    context: Option<String>,
}

/// Parses the line format.
///
/// Leading `|` characters are skipped; the pattern runs to the next `|` and
/// the response is the rest of the line. Lines without both parts are
/// ignored.
#[must_use]
pub fn parse_lines(content: &str) -> Vec<SeedPair> {
    content
        .lines()
        .filter_map(|line| {
            let (pattern, response) = line.trim_start_matches('|').split_once('|')?;
            if pattern.is_empty() || response.is_empty() {
                return None;
            }
            Some(SeedPair {
                pattern: pattern.to_string(),
                response: response.to_string(),
                context: None,
            })
        })
        .collect()
}

/// Parses the JSON categories format.
///
/// # Errors
///
/// Returns the `serde_json` error if the document does not match the format.
pub fn parse_json(content: &str) -> std::result::Result<Vec<SeedPair>, serde_json::Error> {
    let document: SeedDocument = serde_json::from_str(content)?;

    let mut pairs = Vec::new();
    for qa_pairs in document.categories.into_values() {
        for qa in qa_pairs {
            for pattern in qa.patterns {
                pairs.push(SeedPair {
                    pattern,
                    response: qa.response.clone(),
                    context: qa.context.clone(),
                });
            }
        }
    }
    Ok(pairs)
}

/// Reads and parses a seed file, choosing the format by extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn load_seed_file<P: AsRef<Path>>(path: P) -> Result<Vec<SeedPair>> {
    let path = path.as_ref();
    let content = read_file(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let pairs = if is_json {
        parse_json(&content).map_err(|e| IoError::ParseFailed {
            path: path.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?
    } else {
        parse_lines(&content)
    };

    tracing::debug!(path = %path.display(), pairs = pairs.len(), "parsed seed file");
    Ok(pairs)
}

/// Binds every pair into the table; later pairs overwrite earlier ones.
pub fn seed_table(table: &mut ResponseTable, pairs: &[SeedPair]) {
    table.extend(pairs.iter().map(|p| (&p.pattern, &p.response)));
}

/// Inserts every pair as a response row and returns the number inserted.
///
/// # Errors
///
/// Returns an error on the first failed insert.
pub fn seed_storage<S: Storage + ?Sized>(storage: &mut S, pairs: &[SeedPair]) -> Result<usize> {
    for pair in pairs {
        storage.add_response(&pair.pattern, &pair.response, pair.context.as_deref())?;
    }
    Ok(pairs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStorage;
    use tempfile::TempDir;

    const JSON_SEED: &str = r#"{
        "categories": {
            "greetings": [
                {"patterns": ["hi", "hello"], "response": "Hey!", "context": "greeting"}
            ],
            "tech": [
                {"patterns": ["rust"], "response": "Rust is fast."},
                {"response": "no patterns"}
            ]
        }
    }"#;

    #[test]
    fn test_parse_lines() {
        let pairs = parse_lines("hi|Hello!\nbad line\n|lead|Leading pipe\nempty|\nx|a|b\n");
        let got: Vec<_> = pairs
            .iter()
            .map(|p| (p.pattern.as_str(), p.response.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![("hi", "Hello!"), ("lead", "Leading pipe"), ("x", "a|b")]
        );
    }

    #[test]
    fn test_parse_lines_crlf() {
        let pairs = parse_lines("hi|Hello!\r\n");
        assert_eq!(pairs[0].response, "Hello!");
    }

    #[test]
    fn test_parse_json() {
        let pairs = parse_json(JSON_SEED).unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].pattern, "hi");
        assert_eq!(pairs[1].pattern, "hello");
        assert_eq!(pairs[1].context.as_deref(), Some("greeting"));
        assert_eq!(pairs[2].response, "Rust is fast.");
        assert_eq!(pairs[2].context, None);
    }

    #[test]
    fn test_parse_json_malformed() {
        assert!(parse_json("{\"categories\": 3}").is_err());
    }

    #[test]
    fn test_load_seed_file_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let json_path = temp_dir.path().join("qa_pairs.json");
        std::fs::write(&json_path, JSON_SEED).unwrap();
        assert_eq!(load_seed_file(&json_path).unwrap().len(), 3);

        let txt_path = temp_dir.path().join("responses.txt");
        std::fs::write(&txt_path, "hi|Hello!\n").unwrap();
        assert_eq!(load_seed_file(&txt_path).unwrap().len(), 1);

        let bad_path = temp_dir.path().join("broken.json");
        std::fs::write(&bad_path, "not json").unwrap();
        let err = load_seed_file(&bad_path).unwrap_err();
        assert!(err.to_string().contains("malformed seed file"));
    }

    #[test]
    fn test_seed_table_and_storage() {
        let pairs = parse_json(JSON_SEED).unwrap();

        let mut table = ResponseTable::new(32).unwrap();
        seed_table(&mut table, &pairs);
        assert_eq!(table.get("hello"), Some("Hey!"));

        let mut storage = SqliteStorage::in_memory().unwrap();
        storage.init().unwrap();
        assert_eq!(seed_storage(&mut storage, &pairs).unwrap(), 3);
        assert_eq!(storage.response_count().unwrap(), 3);
    }
}
