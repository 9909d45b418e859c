// GuildLog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every failure surfaces as an explicit result; the only recovered failure is
// `FilenameError`, which selects the content-based timeframe fallback.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all GuildLog operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum GuildLogError {
    /// Settings loading or validation failed.
    Config(ConfigError),

    /// A record or timestamp could not be parsed.
    Parse(ParseError),

    /// A source file or directory could not be read.
    Source(SourceError),

    /// Writing an export failed.
    Export(ExportError),
}

impl fmt::Display for GuildLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Source(e) => write!(f, "Source error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for GuildLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Source(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to settings file loading.
#[derive(Debug)]
pub enum ConfigError {
    /// The settings file does not exist.
    NotFound { path: PathBuf },

    /// A non-blank, non-comment line has no `=` delimiter.
    MalformedLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    /// A required key is absent.
    MissingKey { path: PathBuf, key: &'static str },

    /// A value failed validation.
    InvalidValue {
        key: &'static str,
        value: String,
        expected: String,
    },

    /// I/O error reading the settings file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Settings file '{}' could not be found", path.display())
            }
            Self::MalformedLine {
                path,
                line_number,
                line,
            } => write!(
                f,
                "'{}' line {line_number}: expected key=value, got '{line}'",
                path.display()
            ),
            Self::MissingKey { path, key } => {
                write!(f, "'{}': missing required key '{key}'", path.display())
            }
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "'{key}' = '{value}' is invalid. Expected: {expected}"),
            Self::Io { path, source } => {
                write!(f, "Settings I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for GuildLogError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors related to turning raw records into entries.
#[derive(Debug)]
pub enum ParseError {
    /// A record timestamp (or the configured offset appended to it) does not
    /// match the expected grammar.
    MalformedTimestamp {
        /// Source file, when the record came from one.
        file: Option<PathBuf>,
        /// 1-based record number (header excluded), when known.
        record: Option<u64>,
        /// The raw timestamp text from the record.
        raw: String,
        /// The configured offset that was appended before parsing.
        offset: String,
        source: chrono::ParseError,
    },

    /// A row does not fit the four-column record schema.
    InvalidRecord {
        file: Option<PathBuf>,
        record: u64,
        source: csv::Error,
    },

    /// The header row is missing or is not `Timestamp,Category,Name,Message`.
    UnexpectedHeader {
        file: Option<PathBuf>,
        found: Vec<String>,
    },

    /// No entries and no recognised filename, so no timeframe can be derived.
    EmptyLog { file: Option<PathBuf> },
}

impl ParseError {
    /// Attach file and record context to a timestamp error raised by an entry.
    pub fn at(self, file: Option<PathBuf>, record_number: u64) -> Self {
        match self {
            Self::MalformedTimestamp {
                raw,
                offset,
                source,
                ..
            } => Self::MalformedTimestamp {
                file,
                record: Some(record_number),
                raw,
                offset,
                source,
            },
            other => other,
        }
    }
}

fn describe(file: &Option<PathBuf>) -> String {
    file.as_ref()
        .map(|p| format!("'{}'", p.display()))
        .unwrap_or_else(|| "<records>".to_string())
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTimestamp {
                file,
                record,
                raw,
                offset,
                source,
            } => {
                write!(f, "{}", describe(file))?;
                if let Some(n) = record {
                    write!(f, " record {n}")?;
                }
                write!(
                    f,
                    ": cannot parse timestamp '{raw}' with offset '{offset}': {source}"
                )
            }
            Self::InvalidRecord {
                file,
                record,
                source,
            } => write!(f, "{} record {record}: {source}", describe(file)),
            Self::UnexpectedHeader { file, found } if found.is_empty() => {
                write!(f, "{}: missing header row", describe(file))
            }
            Self::UnexpectedHeader { file, found } => write!(
                f,
                "{}: unexpected header '{}'",
                describe(file),
                found.join(",")
            ),
            Self::EmptyLog { file } => write!(
                f,
                "{}: no entries and no recognised filename to derive a timeframe from",
                describe(file)
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedTimestamp { source, .. } => Some(source),
            Self::InvalidRecord { source, .. } => Some(source),
            Self::UnexpectedHeader { .. } | Self::EmptyLog { .. } => None,
        }
    }
}

impl From<ParseError> for GuildLogError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Filename errors
// ---------------------------------------------------------------------------

/// Reasons a log filename could not provide an export time.
///
/// Never fatal: any of these selects the content-based timeframe.
#[derive(Debug)]
pub enum FilenameError {
    /// The log has no source path (built from records in memory).
    NoSource,

    /// The filename does not follow `<Guild>_<YYYY-MM-DD>_<HH-MM-SS>.csv`.
    NotRecognized { filename: String },

    /// The timestamp portion matched the pattern but is not a real instant,
    /// or the configured offset is invalid.
    InvalidTimestamp {
        timestamp: String,
        offset: String,
        source: chrono::ParseError,
    },
}

impl fmt::Display for FilenameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSource => write!(f, "log has no source filename"),
            Self::NotRecognized { filename } => {
                write!(f, "filename '{filename}' does not match the export pattern")
            }
            Self::InvalidTimestamp {
                timestamp,
                offset,
                source,
            } => write!(
                f,
                "filename timestamp '{timestamp}' with offset '{offset}' is invalid: {source}"
            ),
        }
    }
}

impl std::error::Error for FilenameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidTimestamp { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Source errors
// ---------------------------------------------------------------------------

/// Errors opening source files, listing directories, or creating outputs.
#[derive(Debug)]
pub enum SourceError {
    /// A file is missing or cannot be opened.
    Unreadable { path: PathBuf, source: io::Error },

    /// A directory scan was requested on something that is not a directory.
    NotADirectory { path: PathBuf },

    /// Directory listing failed part-way.
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// The output file already exists and overwriting was not allowed.
    OutputExists { path: PathBuf },

    /// The output file could not be created.
    Create { path: PathBuf, source: io::Error },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { path, source } => {
                write!(f, "'{}' could not be read: {source}", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "'{}' is not a directory", path.display())
            }
            Self::Traversal { path, source } => {
                write!(f, "Error listing '{}': {source}", path.display())
            }
            Self::OutputExists { path } => write!(
                f,
                "'{}' already exists. Pass --force to overwrite it.",
                path.display()
            ),
            Self::Create { path, source } => {
                write!(f, "'{}' could not be created: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } => Some(source),
            Self::Traversal { source, .. } => Some(source),
            Self::Create { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<SourceError> for GuildLogError {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The excel timestamp format could not render an entry time.
    TimestampFormat { format: String },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TimestampFormat { format } => {
                write!(f, "Timestamp format '{format}' could not be rendered")
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::TimestampFormat { .. } => None,
        }
    }
}

impl From<ExportError> for GuildLogError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for GuildLog results.
pub type Result<T> = std::result::Result<T, GuildLogError>;
