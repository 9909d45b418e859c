// GuildLog - app/inspect.rs
//
// The `inspect` command: one summary line per log with its derived
// timeframe, optionally checking whether an instant falls inside it.

use crate::app::load::load_guild;
use crate::core::guild::Guild;
use crate::core::log::TimeframeSource;
use crate::core::model::parse_entry_time;
use crate::core::settings::Settings;
use crate::core::timeframe::Timeframe;
use chrono::{DateTime, Duration, FixedOffset};
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

/// Summary of one log for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSummary {
    pub source: Option<PathBuf>,
    pub guild_name: Option<String>,
    pub entries: usize,
    pub timeframe: Timeframe,
    pub derived_from: TimeframeSource,
    /// Whether the requested instant falls inside `timeframe`.
    pub contains_at: Option<bool>,
}

impl fmt::Display for LogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<records>".to_string());
        write!(
            f,
            "{source}\t{}\t{} entries\t{} ({}, {})",
            self.guild_name.as_deref().unwrap_or("-"),
            self.entries,
            self.timeframe,
            self.derived_from.label(),
            format_span(self.timeframe.duration())
        )?;
        if let Some(hit) = self.contains_at {
            write!(f, "\t{}", if hit { "contains" } else { "outside" })?;
        }
        Ok(())
    }
}

/// `<days>d <hours>h <minutes>m`, e.g. `10d 00h 00m`.
fn format_span(span: Duration) -> String {
    let minutes = span.num_minutes();
    format!(
        "{}d {:02}h {:02}m",
        minutes / (24 * 60),
        minutes / 60 % 24,
        minutes % 60
    )
}

/// Parse an `--at` instant written like a log timestamp
/// (`MM/DD/YY HH:MM:SS AM`) in the configured input timezone.
pub fn parse_instant(
    raw: &str,
    settings: &Settings,
) -> crate::util::error::Result<DateTime<FixedOffset>> {
    Ok(parse_entry_time(raw, &settings.input_timezone)?)
}

pub fn summarise(guild: &Guild, at: Option<DateTime<FixedOffset>>) -> Vec<LogSummary> {
    guild
        .logs()
        .iter()
        .map(|log| LogSummary {
            source: log.source().map(|p| p.to_path_buf()),
            guild_name: log.guild_name().map(str::to_string),
            entries: log.len(),
            timeframe: log.timeframe(),
            derived_from: log.timeframe_source(),
            contains_at: at.map(|t| log.timeframe().contains(t)),
        })
        .collect()
}

/// Load the inputs and write one summary line per log.
pub fn run_inspect<W: Write>(
    inputs: &[PathBuf],
    at: Option<&str>,
    settings: &Settings,
    mut out: W,
) -> crate::util::error::Result<Vec<LogSummary>> {
    let at = at.map(|raw| parse_instant(raw, settings)).transpose()?;
    let guild = load_guild(inputs, settings)?;
    let summaries = summarise(&guild, at);

    write_summaries(&summaries, &mut out).map_err(|source| {
        crate::util::error::ExportError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        }
    })?;
    Ok(summaries)
}

fn write_summaries<W: Write>(summaries: &[LogSummary], out: &mut W) -> io::Result<()> {
    for summary in summaries {
        writeln!(out, "{summary}")?;
    }
    out.flush()
}
