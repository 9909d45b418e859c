// GuildLog - platform/config.rs
//
// Platform directory resolution and settings file loading with startup
// validation.
//
// The settings file is line-oriented `key=value`. A missing file is an
// explicit `ConfigError::NotFound`; there is no silent fallback to defaults.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::settings::Settings;
use crate::util::constants;
use crate::util::error::ConfigError;
use chrono::format::{Item, StrftimeItems};
use chrono::DateTime;
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Resolved platform paths for GuildLog configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/guildlog/ or %APPDATA%\GuildLog\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

/// Pick the settings file to load.
///
/// Priority: explicit path > `settings.csv` in the working directory >
/// `settings.csv` in the platform config directory. When neither default
/// exists the working-directory path is returned so the resulting
/// `NotFound` error names the most obvious location.
pub fn resolve_settings_path(explicit: Option<&Path>, paths: &PlatformPaths) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let local = PathBuf::from(constants::SETTINGS_FILE_NAME);
    if local.is_file() {
        return local;
    }
    let platform = paths.config_dir.join(constants::SETTINGS_FILE_NAME);
    if platform.is_file() {
        return platform;
    }
    local
}

/// Load and validate a settings file.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let settings = parse_settings(&content, path)?;
    tracing::info!(path = %path.display(), "Loaded settings");
    Ok(settings)
}

/// Parse settings text. `path` is used for error messages only.
///
/// Blank lines and lines starting with `#` are ignored. Each other line is
/// split on its first `=`. The key is trimmed; the value is kept verbatim so
/// a separator such as a single space survives. Later duplicates win.
pub fn parse_settings(content: &str, path: &Path) -> Result<Settings, ConfigError> {
    let mut values = BTreeMap::new();

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(constants::SETTINGS_COMMENT_PREFIX) {
            continue;
        }
        let (key, value) = line
            .split_once(constants::SETTINGS_DELIMITER)
            .ok_or_else(|| ConfigError::MalformedLine {
                path: path.to_path_buf(),
                line_number: idx + 1,
                line: line.to_string(),
            })?;

        let key = key.trim().to_string();
        if values.insert(key.clone(), value.to_string()).is_some() {
            tracing::debug!(key = %key, "Duplicate settings key; later value wins");
        }
    }

    let input_timezone = required(&values, constants::KEY_INPUT_TIMEZONE, path)?;
    validate_offset(&input_timezone)?;

    let excel_timestamp = required(&values, constants::KEY_EXCEL_TIMESTAMP, path)?;
    validate_strftime(&excel_timestamp)?;

    if let Some(level) = values.get(constants::KEY_LOG_LEVEL) {
        if !constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                key: constants::KEY_LOG_LEVEL,
                value: level.clone(),
                expected: constants::VALID_LOG_LEVELS.join(", "),
            });
        }
    }

    Ok(Settings::from_values(input_timezone, excel_timestamp, values))
}

fn required(
    values: &BTreeMap<String, String>,
    key: &'static str,
    path: &Path,
) -> Result<String, ConfigError> {
    values.get(key).cloned().ok_or_else(|| ConfigError::MissingKey {
        path: path.to_path_buf(),
        key,
    })
}

/// The offset must be accepted by chrono's `%z`, the same way entry parsing
/// will consume it.
fn validate_offset(offset: &str) -> Result<(), ConfigError> {
    let probe = format!("2000-01-01 00:00:00{offset}");
    DateTime::parse_from_str(&probe, "%Y-%m-%d %H:%M:%S%z")
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidValue {
            key: constants::KEY_INPUT_TIMEZONE,
            value: offset.to_string(),
            expected: format!("a UTC offset such as +0000 or -0500 ({e})"),
        })
}

fn validate_strftime(format: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidValue {
            key: constants::KEY_EXCEL_TIMESTAMP,
            value: format.to_string(),
            expected: "a chrono strftime format such as %Y-%m-%d %H:%M:%S".to_string(),
        });
    }
    Ok(())
}
