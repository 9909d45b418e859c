// GuildLog - core/log.rs
//
// One exported log: its entries in file order plus the window of time the
// export covers.
//
// Timeframe derivation is a two-step attempt:
//   1. Filename: `<Guild>_<YYYY-MM-DD>_<HH-MM-SS>.csv` gives the export time,
//      which ends a fixed trailing window of EXPORT_WINDOW_DAYS.
//   2. Content: otherwise the first and last entries in file order bound the
//      window. Exports are newest-first, so the last entry is the start.
// Step 2 is an explicit branch on step 1's result, never a caught failure.

use crate::core::filename::{self, FilenameParts};
use crate::core::model::{Entry, RawRecord};
use crate::core::records::HasEntries;
use crate::core::settings::Settings;
use crate::core::timeframe::Timeframe;
use crate::util::constants;
use crate::util::error::{FilenameError, GuildLogError, ParseError, SourceError};
use chrono::Duration;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Which derivation produced a log's timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeframeSource {
    /// Export time from the filename, minus the fixed export window.
    Filename,
    /// First and last entries in file order.
    Content,
}

impl TimeframeSource {
    pub fn label(&self) -> &'static str {
        match self {
            TimeframeSource::Filename => "filename",
            TimeframeSource::Content => "content",
        }
    }
}

/// An ordered collection of entries with a derived validity timeframe.
#[derive(Debug, Clone)]
pub struct Log {
    entries: Vec<Entry>,
    source: Option<PathBuf>,
    guild_name: Option<String>,
    timeframe: Timeframe,
    timeframe_source: TimeframeSource,
}

impl Log {
    /// Build a log from records already in memory. There is no source
    /// filename, so the timeframe always comes from the entries.
    ///
    /// Fails if any record has a malformed timestamp, or if there are no
    /// records at all.
    pub fn from_records<I>(records: I, settings: &Settings) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let entries = records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| {
                Entry::from_record(record, settings).map_err(|e| e.at(None, idx as u64 + 1))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::build(entries, None, settings)
    }

    /// Read records from `reader` (header row `Timestamp,Category,Name,Message`)
    /// and build a log. `source` is used for timeframe derivation and error
    /// context only; nothing is opened here.
    ///
    /// A read failure at any point is `SourceError::Unreadable`, never a
    /// shorter log. A missing or different header row is rejected.
    pub fn from_reader<R: Read>(
        reader: R,
        source: Option<&Path>,
        settings: &Settings,
    ) -> crate::util::error::Result<Self> {
        let file = source.map(Path::to_path_buf);
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let header = csv_reader
            .headers()
            .map_err(|e| read_error(e, &file, 0))?;
        if !header.iter().eq(constants::LOG_HEADER) {
            return Err(ParseError::UnexpectedHeader {
                file,
                found: header.iter().map(str::to_string).collect(),
            }
            .into());
        }

        let mut entries = Vec::new();
        for (idx, result) in csv_reader.deserialize::<RawRecord>().enumerate() {
            let record_number = idx as u64 + 1;
            let record = result.map_err(|e| read_error(e, &file, record_number))?;
            let entry = Entry::from_record(record, settings)
                .map_err(|e| e.at(file.clone(), record_number))?;
            entries.push(entry);
        }

        Ok(Self::build(entries, file, settings)?)
    }

    /// Open and read an exported log file.
    pub fn from_path(path: &Path, settings: &Settings) -> crate::util::error::Result<Self> {
        tracing::debug!(path = %path.display(), "Reading log");
        let file = File::open(path).map_err(|source| SourceError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let log = Self::from_reader(BufReader::new(file), Some(path), settings)?;

        tracing::debug!(
            path = %path.display(),
            entries = log.len(),
            timeframe = %log.timeframe,
            derived_from = log.timeframe_source.label(),
            "Log loaded"
        );
        Ok(log)
    }

    fn build(
        entries: Vec<Entry>,
        source: Option<PathBuf>,
        settings: &Settings,
    ) -> Result<Self, ParseError> {
        let (guild_name, timeframe, timeframe_source) =
            match timeframe_from_filename(source.as_deref(), settings) {
                Ok((parts, timeframe)) => {
                    (Some(parts.guild_name), timeframe, TimeframeSource::Filename)
                }
                Err(reason) => {
                    tracing::debug!(
                        reason = %reason,
                        "No export time from filename; using entry bounds"
                    );
                    let timeframe = timeframe_from_entries(&entries, source.as_deref())
                        .ok_or_else(|| ParseError::EmptyLog {
                            file: source.clone(),
                        })?;
                    (None, timeframe, TimeframeSource::Content)
                }
            };

        Ok(Self {
            entries,
            source,
            guild_name,
            timeframe,
            timeframe_source,
        })
    }

    /// Path the log was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Guild name recovered from a recognised filename, with the configured
    /// separator between words.
    pub fn guild_name(&self) -> Option<&str> {
        self.guild_name.as_deref()
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn timeframe_source(&self) -> TimeframeSource {
        self.timeframe_source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_slice(&self) -> &[Entry] {
        &self.entries
    }
}

impl HasEntries for Log {
    fn entries(&self) -> Box<dyn Iterator<Item = &Entry> + '_> {
        Box::new(self.entries.iter())
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Split csv failures into I/O (the source itself) and record shape.
fn read_error(err: csv::Error, file: &Option<PathBuf>, record: u64) -> GuildLogError {
    if !err.is_io_error() {
        return ParseError::InvalidRecord {
            file: file.clone(),
            record,
            source: err,
        }
        .into();
    }
    let source = match err.into_kind() {
        csv::ErrorKind::Io(source) => source,
        other => io::Error::other(format!("{other:?}")),
    };
    SourceError::Unreadable {
        path: file.clone().unwrap_or_else(|| PathBuf::from("<reader>")),
        source,
    }
    .into()
}

/// Step 1: the export window ending at the time embedded in the filename.
fn timeframe_from_filename(
    source: Option<&Path>,
    settings: &Settings,
) -> Result<(FilenameParts, Timeframe), FilenameError> {
    let path = source.ok_or(FilenameError::NoSource)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let parts = filename::parse_filename_with_separator(&name, &settings.name_separator)?;
    let export_time = filename::parse_export_time(&parts.timestamp, &settings.input_timezone)?;
    let timeframe =
        Timeframe::from_delta(export_time, -Duration::days(constants::EXPORT_WINDOW_DAYS));
    Ok((parts, timeframe))
}

/// Step 2: the first and last entries in file order, without sorting.
///
/// Newest-first order is assumed but not enforced. A file that looks
/// oldest-first is reported; the timeframe is still normalised.
fn timeframe_from_entries(entries: &[Entry], source: Option<&Path>) -> Option<Timeframe> {
    let first = entries.first()?;
    let last = entries.last()?;

    if first.time() < last.time() {
        tracing::warn!(
            file = %source.map(|p| p.display().to_string()).unwrap_or_default(),
            first = %first.time(),
            last = %last.time(),
            "Entries look oldest-first; content timeframe assumes newest-first exports"
        );
    }

    Some(Timeframe::new(last.time(), first.time()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    fn settings() -> Settings {
        Settings::new("+0000", "%Y-%m-%d %H:%M:%S")
    }

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    const TWO_ROWS: &str = "\
Timestamp,Category,Name,Message
\"01/08/23 11:00:00 PM\",\"Chat\",\"Krakob\",\"newest\"
\"01/01/23 09:00:00 AM\",\"Membership\",\"Zeddy\",\"oldest\"
";

    #[test]
    fn test_timeframe_from_filename() {
        let log = Log::from_reader(
            TWO_ROWS.as_bytes(),
            Some(Path::new("MyGuild_2023-01-08_12-00-00.csv")),
            &settings(),
        )
        .unwrap();

        assert_eq!(log.timeframe_source(), TimeframeSource::Filename);
        assert_eq!(log.timeframe().start(), at("2022-12-29T12:00:00+00:00"));
        assert_eq!(log.timeframe().end(), at("2023-01-08T12:00:00+00:00"));
        assert_eq!(log.guild_name(), Some("MyGuild"));
    }

    #[test]
    fn test_timeframe_from_filename_uses_only_base_name() {
        let log = Log::from_reader(
            TWO_ROWS.as_bytes(),
            Some(Path::new("exports/Iron_Knights_2023-01-08_12-00-00.csv")),
            &settings().with_name_separator(" "),
        )
        .unwrap();
        assert_eq!(log.timeframe_source(), TimeframeSource::Filename);
        assert_eq!(log.guild_name(), Some("Iron Knights"));
    }

    #[test]
    fn test_unrecognised_filename_falls_back_to_entries() {
        let log = Log::from_reader(
            TWO_ROWS.as_bytes(),
            Some(Path::new("garbage.csv")),
            &settings(),
        )
        .unwrap();

        assert_eq!(log.timeframe_source(), TimeframeSource::Content);
        assert_eq!(log.timeframe().start(), at("2023-01-01T09:00:00+00:00"));
        assert_eq!(log.timeframe().end(), at("2023-01-08T23:00:00+00:00"));
        assert_eq!(log.guild_name(), None);
    }

    #[test]
    fn test_impossible_filename_date_falls_back_to_entries() {
        let log = Log::from_reader(
            TWO_ROWS.as_bytes(),
            Some(Path::new("MyGuild_2023-02-30_12-00-00.csv")),
            &settings(),
        )
        .unwrap();
        assert_eq!(log.timeframe_source(), TimeframeSource::Content);
    }

    #[test]
    fn test_oldest_first_file_still_normalises() {
        let content = "\
Timestamp,Category,Name,Message
01/01/23 09:00:00 AM,Chat,a,oldest
01/08/23 11:00:00 PM,Chat,b,newest
";
        let log = Log::from_reader(content.as_bytes(), None, &settings()).unwrap();
        assert_eq!(log.timeframe().start(), at("2023-01-01T09:00:00+00:00"));
        assert_eq!(log.timeframe().end(), at("2023-01-08T23:00:00+00:00"));
    }

    #[test]
    fn test_fallback_uses_file_order_not_sorted_bounds() {
        // The middle row is outside the first/last bounds and is ignored.
        let content = "\
Timestamp,Category,Name,Message
01/05/23 10:00:00 AM,Chat,a,first
01/20/23 10:00:00 AM,Chat,b,middle
01/03/23 10:00:00 AM,Chat,c,last
";
        let log = Log::from_reader(content.as_bytes(), None, &settings()).unwrap();
        assert_eq!(log.timeframe().start(), at("2023-01-03T10:00:00+00:00"));
        assert_eq!(log.timeframe().end(), at("2023-01-05T10:00:00+00:00"));
        assert!(!log.timeframe().contains(log.entry_slice()[1].time()));
    }

    #[test]
    fn test_single_entry_gives_degenerate_timeframe() {
        let records = vec![RawRecord::new("01/08/23 11:00:00 PM", "Chat", "a", "b")];
        let log = Log::from_records(records, &settings()).unwrap();
        assert_eq!(log.timeframe().start(), log.timeframe().end());
    }

    #[test]
    fn test_empty_log_without_filename_is_an_error() {
        let content = "Timestamp,Category,Name,Message\n";
        let result = Log::from_reader(content.as_bytes(), Some(Path::new("x.csv")), &settings());
        assert!(matches!(
            result,
            Err(GuildLogError::Parse(ParseError::EmptyLog { .. }))
        ));
    }

    #[test]
    fn test_empty_log_with_filename_is_fine() {
        let content = "Timestamp,Category,Name,Message\n";
        let log = Log::from_reader(
            content.as_bytes(),
            Some(Path::new("G_2023-01-08_12-00-00.csv")),
            &settings(),
        )
        .unwrap();
        assert!(log.is_empty());
        assert_eq!(log.timeframe_source(), TimeframeSource::Filename);
    }

    #[test]
    fn test_malformed_timestamp_aborts_with_context() {
        let content = "\
Timestamp,Category,Name,Message
01/08/23 11:00:00 PM,Chat,a,ok
yesterday,Chat,b,bad
";
        let result = Log::from_reader(content.as_bytes(), Some(Path::new("f.csv")), &settings());
        match result {
            Err(GuildLogError::Parse(ParseError::MalformedTimestamp {
                file, record, raw, ..
            })) => {
                assert_eq!(file, Some(PathBuf::from("f.csv")));
                assert_eq!(record, Some(2));
                assert_eq!(raw, "yesterday");
            }
            other => panic!("expected MalformedTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_short_row_is_invalid_record() {
        let content = "\
Timestamp,Category,Name,Message
01/08/23 11:00:00 PM,Chat
";
        let result = Log::from_reader(content.as_bytes(), None, &settings());
        assert!(matches!(
            result,
            Err(GuildLogError::Parse(ParseError::InvalidRecord {
                record: 1,
                ..
            }))
        ));
    }

    #[test]
    fn test_from_records_rejects_malformed_timestamp() {
        let records = vec![
            RawRecord::new("01/08/23 11:00:00 PM", "Chat", "a", "b"),
            RawRecord::new("not a time", "Chat", "a", "b"),
        ];
        let result = Log::from_records(records, &settings());
        assert!(matches!(
            result,
            Err(ParseError::MalformedTimestamp {
                record: Some(2),
                ..
            })
        ));
    }

    #[test]
    fn test_records_preserve_order_and_text() {
        let log = Log::from_reader(TWO_ROWS.as_bytes(), None, &settings()).unwrap();
        let records = log.record_list();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            RawRecord::new("01/08/23 11:00:00 PM", "Chat", "Krakob", "newest")
        );
        assert_eq!(
            records[1],
            RawRecord::new("01/01/23 09:00:00 AM", "Membership", "Zeddy", "oldest")
        );
        assert_eq!(log.entry_count(), 2);
    }

    #[test]
    fn test_dump_log_reproduces_input() {
        let log = Log::from_reader(TWO_ROWS.as_bytes(), None, &settings()).unwrap();
        let mut buf = Vec::new();
        log.dump_log(&mut buf, Path::new("out.csv")).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let expected: Vec<_> = TWO_ROWS.lines().collect();
        let actual: Vec<_> = output.lines().collect();
        assert_eq!(&actual[1..], &expected[1..]);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device unavailable"))
        }
    }

    #[test]
    fn test_read_failure_before_header_is_unreadable() {
        let result = Log::from_reader(
            FailingReader,
            Some(Path::new("G_2023-01-08_12-00-00.csv")),
            &settings(),
        );
        match result {
            Err(GuildLogError::Source(SourceError::Unreadable { path, .. })) => {
                assert_eq!(path, PathBuf::from("G_2023-01-08_12-00-00.csv"));
            }
            other => panic!("expected Unreadable, got {other:?}"),
        }
    }

    #[test]
    fn test_read_failure_after_rows_is_unreadable() {
        let reader = TWO_ROWS.as_bytes().chain(FailingReader);
        let result = Log::from_reader(
            reader,
            Some(Path::new("G_2023-01-08_12-00-00.csv")),
            &settings(),
        );
        assert!(
            matches!(
                result,
                Err(GuildLogError::Source(SourceError::Unreadable { .. }))
            ),
            "expected Unreadable, got {result:?}"
        );
    }

    #[test]
    fn test_wrong_header_is_rejected() {
        let result = Log::from_reader(
            "Time,Cat,Who,Text\n".as_bytes(),
            Some(Path::new("G_2023-01-08_12-00-00.csv")),
            &settings(),
        );
        match result {
            Err(GuildLogError::Parse(ParseError::UnexpectedHeader { found, .. })) => {
                assert_eq!(found, vec!["Time", "Cat", "Who", "Text"]);
            }
            other => panic!("expected UnexpectedHeader, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let result = Log::from_reader(
            "".as_bytes(),
            Some(Path::new("G_2023-01-08_12-00-00.csv")),
            &settings(),
        );
        assert!(matches!(
            result,
            Err(GuildLogError::Parse(ParseError::UnexpectedHeader { .. }))
        ));
    }

    #[test]
    fn test_directory_with_export_name_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("G_2023-01-08_12-00-00.csv");
        std::fs::create_dir(&path).unwrap();

        let result = Log::from_path(&path, &settings());
        assert!(
            matches!(
                result,
                Err(GuildLogError::Source(SourceError::Unreadable { .. }))
            ),
            "expected Unreadable, got {result:?}"
        );
    }
}
