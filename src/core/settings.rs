// GuildLog - core/settings.rs
//
// The configuration value threaded through Entry, Log, and Guild
// construction. Loading from disk lives in platform::config; this type is
// pure data so core code never reaches for ambient state.

use crate::util::constants;
use std::collections::BTreeMap;

/// Key-value settings plus typed accessors for the keys the core uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// UTC offset text appended to raw timestamps, e.g. `+0000`.
    pub input_timezone: String,

    /// strftime format for the Timestamp column of excel exports.
    pub excel_timestamp: String,

    /// Separator used when displaying guild names recovered from filenames.
    pub name_separator: String,

    /// Every key-value pair read from the settings source, verbatim.
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Build settings in code. Values are not validated here, so a bad
    /// offset surfaces at entry construction as `MalformedTimestamp`.
    pub fn new(input_timezone: impl Into<String>, excel_timestamp: impl Into<String>) -> Self {
        let input_timezone = input_timezone.into();
        let excel_timestamp = excel_timestamp.into();
        let mut values = BTreeMap::new();
        values.insert(
            constants::KEY_INPUT_TIMEZONE.to_string(),
            input_timezone.clone(),
        );
        values.insert(
            constants::KEY_EXCEL_TIMESTAMP.to_string(),
            excel_timestamp.clone(),
        );
        Self {
            input_timezone,
            excel_timestamp,
            name_separator: constants::DEFAULT_NAME_SEPARATOR.to_string(),
            values,
        }
    }

    /// Replace the guild-name display separator.
    pub fn with_name_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        self.values.insert(
            constants::KEY_NAME_SEPARATOR.to_string(),
            separator.clone(),
        );
        self.name_separator = separator;
        self
    }

    /// Build settings from a full key-value map. The typed fields are taken
    /// from the map; the caller has already checked the required keys exist.
    pub(crate) fn from_values(
        input_timezone: String,
        excel_timestamp: String,
        values: BTreeMap<String, String>,
    ) -> Self {
        let name_separator = values
            .get(constants::KEY_NAME_SEPARATOR)
            .cloned()
            .unwrap_or_else(|| constants::DEFAULT_NAME_SEPARATOR.to_string());
        Self {
            input_timezone,
            excel_timestamp,
            name_separator,
            values,
        }
    }

    /// Look up any key from the settings source.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Optional log level from the settings source.
    pub fn log_level(&self) -> Option<&str> {
        self.get(constants::KEY_LOG_LEVEL)
    }
}
