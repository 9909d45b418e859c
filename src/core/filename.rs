// GuildLog - core/filename.rs
//
// Extraction of the guild name and export time from a log filename of the
// form `<GuildName>_<YYYY-MM-DD>_<HH-MM-SS>.csv`.
// Core layer: pure string handling, no I/O.

use crate::util::constants;
use crate::util::error::FilenameError;
use chrono::{DateTime, FixedOffset};
use regex::Regex;
use std::sync::OnceLock;

/// The two substrings recovered from a recognised filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameParts {
    /// Guild name with its word separator normalised.
    pub guild_name: String,
    /// Export time text, `YYYY-MM-DD_HH-MM-SS`.
    pub timestamp: String,
}

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // The greedy name group backtracks so the last two underscore-delimited
    // tokens always land in the timestamp group.
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\w+)_(\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2})\.csv$")
            .expect("filename pattern is valid")
    })
}

/// Returns true if `filename` follows the export naming convention.
pub fn is_log_filename(filename: &str) -> bool {
    pattern().is_match(filename)
}

/// Parse a base filename, keeping underscores in the guild name.
pub fn parse_filename(filename: &str) -> Result<FilenameParts, FilenameError> {
    parse_filename_with_separator(filename, constants::DEFAULT_NAME_SEPARATOR)
}

/// Parse a base filename, rewriting the underscores between guild name words
/// to `separator` (e.g. `" "` turns `Iron_Knights` into `Iron Knights`).
///
/// A non-matching filename is `FilenameError::NotRecognized`, which is
/// distinct from any successful extraction.
pub fn parse_filename_with_separator(
    filename: &str,
    separator: &str,
) -> Result<FilenameParts, FilenameError> {
    let caps = pattern()
        .captures(filename)
        .ok_or_else(|| FilenameError::NotRecognized {
            filename: filename.to_string(),
        })?;

    let raw_name = &caps[1];
    let guild_name = if separator == constants::DEFAULT_NAME_SEPARATOR {
        raw_name.to_string()
    } else {
        raw_name.replace(constants::DEFAULT_NAME_SEPARATOR, separator)
    };

    Ok(FilenameParts {
        guild_name,
        timestamp: caps[2].to_string(),
    })
}

/// Parse the export time from a filename timestamp plus the configured offset.
pub fn parse_export_time(
    timestamp: &str,
    offset: &str,
) -> Result<DateTime<FixedOffset>, FilenameError> {
    let text = format!("{timestamp}{offset}");
    DateTime::parse_from_str(&text, constants::FILENAME_TIMESTAMP_FORMAT).map_err(|source| {
        FilenameError::InvalidTimestamp {
            timestamp: timestamp.to_string(),
            offset: offset.to_string(),
            source,
        }
    })
}
