// GuildLog - core/export.rs
//
// Tabular and JSON export of entries.
// Core layer: writes to any Write trait object.
//
// Column order is fixed: Timestamp, Category, Name, Message.

use crate::core::model::Entry;
use crate::core::settings::Settings;
use crate::util::constants::LOG_HEADER;
use crate::util::error::ExportError;
use csv::{QuoteStyle, WriterBuilder};
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

/// Supported output layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Tab-delimited, unquoted, Timestamp rendered with `excel_timestamp`.
    Excel,
    /// Comma-delimited with every field quoted, like the game's own export.
    Log,
    /// Pretty-printed JSON array of entries.
    Json,
}

impl ExportFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "excel",
            ExportFormat::Log => "log",
            ExportFormat::Json => "json",
        }
    }
}

/// Write `entries` in the requested format. Returns the number of rows written.
pub fn export<'a, I, W>(
    format: ExportFormat,
    entries: I,
    writer: W,
    export_path: &Path,
    settings: &Settings,
) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a Entry>,
    W: Write,
{
    match format {
        ExportFormat::Excel => {
            export_excel(entries, writer, export_path, &settings.excel_timestamp)
        }
        ExportFormat::Log => export_log(entries, writer, export_path),
        ExportFormat::Json => export_json(entries, writer, export_path),
    }
}

/// Export entries as tab-separated values for spreadsheet import.
///
/// Fields are written without quoting or escaping. A tab or newline inside a
/// field therefore produces a malformed row; callers must ensure messages are
/// free of both. This is a known limitation of the format and is not
/// corrected here.
pub fn export_excel<'a, I, W>(
    entries: I,
    writer: W,
    export_path: &Path,
    timestamp_format: &str,
) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a Entry>,
    W: Write,
{
    let mut csv_writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    csv_writer.write_record(LOG_HEADER).map_err(csv_err)?;

    let mut count = 0;
    let mut ts = String::new();
    for entry in entries {
        ts.clear();
        write!(ts, "{}", entry.time().format(timestamp_format)).map_err(|_| {
            ExportError::TimestampFormat {
                format: timestamp_format.to_string(),
            }
        })?;

        csv_writer
            .write_record([ts.as_str(), entry.category(), entry.name(), entry.message()])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export entries in the game's own layout: comma-delimited, every field
/// quoted, raw field text unchanged.
pub fn export_log<'a, I, W>(
    entries: I,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a Entry>,
    W: Write,
{
    let mut csv_writer = WriterBuilder::new()
        .delimiter(b',')
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    csv_writer.write_record(LOG_HEADER).map_err(csv_err)?;

    let mut count = 0;
    for entry in entries {
        csv_writer
            .write_record(entry.record().fields())
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export entries as a JSON array of objects (raw fields plus `time`).
pub fn export_json<'a, I, W>(
    entries: I,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a Entry>,
    W: Write,
{
    let entries: Vec<&Entry> = entries.into_iter().collect();
    serde_json::to_writer_pretty(&mut writer, &entries).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| ExportError::Io {
            path: export_path.to_path_buf(),
            source: e,
        })?;
    Ok(entries.len())
}
