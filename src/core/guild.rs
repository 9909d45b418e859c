// GuildLog - core/guild.rs
//
// A guild's collection of logs. Purely a container: no deduplication,
// merging, or re-sorting across logs.

use crate::core::discovery;
use crate::core::log::Log;
use crate::core::model::Entry;
use crate::core::records::HasEntries;
use crate::core::settings::Settings;
use chrono::{DateTime, FixedOffset};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Guild {
    logs: Vec<Log>,
}

impl Guild {
    pub fn new(logs: Vec<Log>) -> Self {
        Self { logs }
    }

    /// Load one log per path, in the given order.
    ///
    /// All-or-nothing: the first unreadable or unparseable file aborts the
    /// whole batch and no guild is returned.
    pub fn from_files<P: AsRef<Path>>(
        paths: &[P],
        settings: &Settings,
    ) -> crate::util::error::Result<Self> {
        let logs = paths
            .iter()
            .map(|p| Log::from_path(p.as_ref(), settings))
            .collect::<crate::util::error::Result<Vec<_>>>()?;

        tracing::info!(logs = logs.len(), "Guild loaded");
        Ok(Self { logs })
    }

    /// Load every export file directly inside `dir`.
    ///
    /// Files whose names do not match `<Guild>_<YYYY-MM-DD>_<HH-MM-SS>.csv`
    /// are skipped silently (logged at debug only). The matching files are
    /// then loaded as by `from_files`, in file-name order.
    pub fn from_directory(dir: &Path, settings: &Settings) -> crate::util::error::Result<Self> {
        let found = discovery::discover_logs(dir)?;
        for name in &found.skipped {
            tracing::debug!(dir = %dir.display(), file = %name, "Skipping non-export file");
        }
        Self::from_files(&found.files, settings)
    }

    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Logs whose timeframe contains `instant`, in guild order.
    pub fn logs_at(&self, instant: DateTime<FixedOffset>) -> impl Iterator<Item = &Log> + '_ {
        self.logs
            .iter()
            .filter(move |log| log.timeframe().contains(instant))
    }
}

impl HasEntries for Guild {
    fn entries(&self) -> Box<dyn Iterator<Item = &Entry> + '_> {
        Box::new(self.logs.iter().flat_map(|log| log.entry_slice().iter()))
    }

    fn entry_count(&self) -> usize {
        self.logs.iter().map(Log::len).sum()
    }
}
