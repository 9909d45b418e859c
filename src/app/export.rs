// GuildLog - app/export.rs
//
// The `export` command: load a guild and write all its entries in one
// output format, to a file or to stdout.

use crate::app::load::load_guild;
use crate::core::export::ExportFormat;
use crate::core::records::HasEntries;
use crate::core::settings::Settings;
use crate::platform::fs::create_output;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Everything the export command needs besides settings.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// One directory, or one or more log files.
    pub inputs: Vec<PathBuf>,
    pub format: ExportFormat,
    /// Destination file; `None` writes to the supplied stdout writer.
    pub output: Option<PathBuf>,
    /// Replace an existing output file.
    pub overwrite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub logs: usize,
    pub rows: usize,
}

/// Run an export. `stdout` is only written to when no output file is given.
pub fn run_export<W: Write>(
    request: &ExportRequest,
    settings: &Settings,
    stdout: W,
) -> crate::util::error::Result<ExportSummary> {
    let guild = load_guild(&request.inputs, settings)?;

    let rows = match &request.output {
        Some(path) => {
            let writer = create_output(path, request.overwrite)?;
            guild.dump(request.format, writer, path, settings)?
        }
        None => guild.dump(request.format, stdout, Path::new("<stdout>"), settings)?,
    };

    let destination = request
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdout>".to_string());
    tracing::info!(
        logs = guild.len(),
        rows,
        format = request.format.label(),
        output = %destination,
        "Export complete"
    );

    Ok(ExportSummary {
        logs: guild.len(),
        rows,
    })
}
