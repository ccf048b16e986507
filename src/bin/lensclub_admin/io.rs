#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::PathBuf;

use lensclub_api_types::RecordId;

use crate::client::CliError;

/// Inline value or file contents; the file wins when both are given.
pub fn read_opt_value(
    val: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, CliError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
        return Ok(Some(data));
    }
    Ok(val)
}

pub fn record_id(raw: &str) -> Result<RecordId, CliError> {
    if raw.trim().is_empty() {
        return Err(CliError::InvalidInput("record id must not be empty".into()));
    }
    raw.parse::<RecordId>()
        .map_err(|never| match never {})
}
