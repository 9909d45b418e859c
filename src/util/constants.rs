// GuildLog - util/constants.rs
//
// Single source of truth for named constants, formats, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "GuildLog";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "GuildLog";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Log export format (fixed by the game client)
// =============================================================================

/// Column header of every exported log, in output order.
pub const LOG_HEADER: [&str; 4] = ["Timestamp", "Category", "Name", "Message"];

/// chrono format of a record timestamp with the configured offset appended.
/// Example: `01/08/23 11:00:00 PM+0000`.
pub const ENTRY_TIMESTAMP_FORMAT: &str = "%m/%d/%y %I:%M:%S %p%z";

/// chrono format of the export time embedded in a log filename, with the
/// configured offset appended. Example: `2023-01-08_12-00-00+0000`.
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S%z";

/// Length of the trailing window covered by one export, ending at the
/// export time. Observed client behaviour, not a documented protocol value.
pub const EXPORT_WINDOW_DAYS: i64 = 10;

/// Separator between words of a guild name inside log filenames.
pub const DEFAULT_NAME_SEPARATOR: &str = "_";

// =============================================================================
// Settings
// =============================================================================

/// Default settings file name, looked up in the working directory first and
/// then in the platform config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.csv";

/// Delimiter between key and value on each settings line.
pub const SETTINGS_DELIMITER: char = '=';

/// Prefix marking a settings line as a comment.
pub const SETTINGS_COMMENT_PREFIX: char = '#';

/// Settings key holding the UTC offset appended to raw timestamps.
pub const KEY_INPUT_TIMEZONE: &str = "input_timezone";

/// Settings key holding the strftime format used for the excel Timestamp column.
pub const KEY_EXCEL_TIMESTAMP: &str = "excel_timestamp";

/// Settings key holding the separator used when displaying guild names.
pub const KEY_NAME_SEPARATOR: &str = "name_separator";

/// Settings key holding the default log level.
pub const KEY_LOG_LEVEL: &str = "log_level";

/// Log levels accepted from the settings file.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Logging
// =============================================================================

/// Default log level when no override is specified.
pub const DEFAULT_LOG_LEVEL: &str = "info";
