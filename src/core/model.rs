// GuildLog - core/model.rs
//
// Record and entry types. Pure data definitions with no I/O.

use crate::core::settings::Settings;
use crate::util::constants;
use crate::util::error::ParseError;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// =============================================================================
// Raw record (one row of an exported log)
// =============================================================================

/// The four raw fields of one exported row, exactly as read.
///
/// Field names map to the `Timestamp,Category,Name,Message` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Message")]
    pub message: String,
}

impl RawRecord {
    pub fn new(
        timestamp: impl Into<String>,
        category: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            category: category.into(),
            name: name.into(),
            message: message.into(),
        }
    }

    /// Fields in header order.
    pub fn fields(&self) -> [&str; 4] {
        [&self.timestamp, &self.category, &self.name, &self.message]
    }
}

// =============================================================================
// Entry (normalised record)
// =============================================================================

/// A normalised log record: the raw fields plus the absolute instant derived
/// from the timestamp and the configured input timezone.
///
/// Immutable once built; the raw fields are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    #[serde(flatten)]
    record: RawRecord,

    /// Derived instant, serialised as RFC 3339.
    time: DateTime<FixedOffset>,
}

impl Entry {
    /// Build an entry from a raw record.
    ///
    /// The timestamp is parsed as `MM/DD/YY HH:MM:SS AM` followed directly by
    /// the configured offset (e.g. `+0000`). Fails with `MalformedTimestamp`
    /// if either part does not fit that grammar.
    pub fn from_record(record: RawRecord, settings: &Settings) -> Result<Self, ParseError> {
        let time = parse_entry_time(&record.timestamp, &settings.input_timezone)?;
        Ok(Self { record, time })
    }

    /// Convenience constructor from the four raw fields.
    pub fn new(
        timestamp: impl Into<String>,
        category: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
        settings: &Settings,
    ) -> Result<Self, ParseError> {
        Self::from_record(
            RawRecord::new(timestamp, category, name, message),
            settings,
        )
    }

    /// The raw fields, unchanged from construction.
    pub fn record(&self) -> &RawRecord {
        &self.record
    }

    pub fn timestamp(&self) -> &str {
        &self.record.timestamp
    }

    pub fn category(&self) -> &str {
        &self.record.category
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn message(&self) -> &str {
        &self.record.message
    }

    pub fn time(&self) -> DateTime<FixedOffset> {
        self.time
    }
}

/// Parse a raw record timestamp with the configured offset appended.
///
/// Two-digit years follow chrono: `00`-`69` are 2000-2069, `70`-`99` are
/// 1970-1999.
pub fn parse_entry_time(raw: &str, offset: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    let text = format!("{raw}{offset}");
    DateTime::parse_from_str(&text, constants::ENTRY_TIMESTAMP_FORMAT).map_err(|source| {
        ParseError::MalformedTimestamp {
            file: None,
            record: None,
            raw: raw.to_string(),
            offset: offset.to_string(),
            source,
        }
    })
}
