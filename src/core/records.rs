// GuildLog - core/records.rs
//
// Shared capability for anything that holds entries. Log implements it over
// its own entries, Guild over the union of its logs' entries, so both get the
// same record listing and dump operations without a common base type.

use crate::core::export::{self, ExportFormat};
use crate::core::model::{Entry, RawRecord};
use crate::core::settings::Settings;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Read access to an ordered sequence of entries, plus exports over it.
pub trait HasEntries {
    /// Entries in storage order (file order; for a guild, log order then
    /// entry order). Never re-sorted by time.
    fn entries(&self) -> Box<dyn Iterator<Item = &Entry> + '_>;

    /// Raw records, one per entry, fields unchanged.
    fn records(&self) -> Box<dyn Iterator<Item = &RawRecord> + '_> {
        Box::new(self.entries().map(Entry::record))
    }

    /// Eagerly collected copy of `records()`.
    fn record_list(&self) -> Vec<RawRecord> {
        self.records().cloned().collect()
    }

    fn entry_count(&self) -> usize {
        self.entries().count()
    }

    /// Tab-delimited export for spreadsheets. See `export::export_excel` for
    /// the tab/newline limitation.
    fn dump_excel<W: Write>(
        &self,
        writer: W,
        export_path: &Path,
        settings: &Settings,
    ) -> Result<usize, ExportError>
    where
        Self: Sized,
    {
        export::export(ExportFormat::Excel, self.entries(), writer, export_path, settings)
    }

    /// Comma-delimited, fully quoted export in the game's own layout.
    fn dump_log<W: Write>(&self, writer: W, export_path: &Path) -> Result<usize, ExportError>
    where
        Self: Sized,
    {
        export::export_log(self.entries(), writer, export_path)
    }

    fn dump_json<W: Write>(&self, writer: W, export_path: &Path) -> Result<usize, ExportError>
    where
        Self: Sized,
    {
        export::export_json(self.entries(), writer, export_path)
    }

    fn dump<W: Write>(
        &self,
        format: ExportFormat,
        writer: W,
        export_path: &Path,
        settings: &Settings,
    ) -> Result<usize, ExportError>
    where
        Self: Sized,
    {
        export::export(format, self.entries(), writer, export_path, settings)
    }
}
