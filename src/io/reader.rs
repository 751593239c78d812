//! File reading utilities.

use crate::error::{IoError, Result};
use std::path::Path;

/// Maximum seed file size to read into memory (64MB).
const MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Reads a UTF-8 text file.
///
/// # Errors
///
/// Returns an error if the file is missing, too large, unreadable, or not
/// valid UTF-8.
///
/// # Examples
///
/// ```no_run
/// use chatbot_rs::io::read_file;
///
/// let content = read_file("chatbot_responses.txt").unwrap();
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    if !path_ref.exists() {
        return Err(IoError::FileNotFound { path: path_str }.into());
    }

    let size = std::fs::metadata(path_ref)
        .map_err(|e| IoError::ReadFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?
        .len();

    if size > MAX_FILE_SIZE {
        return Err(IoError::ReadFailed {
            path: path_str,
            reason: format!("file too large: {size} bytes (max: {MAX_FILE_SIZE} bytes)"),
        }
        .into());
    }

    let bytes = std::fs::read(path_ref).map_err(|e| IoError::ReadFailed {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| {
        IoError::ReadFailed {
            path: path_str,
            reason: format!("invalid UTF-8: {e}"),
        }
        .into()
    })
}
