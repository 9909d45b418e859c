// GuildLog - tests/e2e_guild.rs
//
// End-to-end tests for loading, timeframe derivation, and export.
//
// These tests exercise the real filesystem, the real settings loader, real
// csv reading, and real chrono timestamp parsing. No mocks, no stubs.

use chrono::{DateTime, FixedOffset};
use guildlog::app::export::{run_export, ExportRequest};
use guildlog::core::export::ExportFormat;
use guildlog::core::guild::Guild;
use guildlog::core::log::{Log, TimeframeSource};
use guildlog::core::model::{Entry, RawRecord};
use guildlog::core::records::HasEntries;
use guildlog::core::settings::Settings;
use guildlog::platform::config::load_settings;
use guildlog::util::error::{ConfigError, GuildLogError, SourceError};
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn settings() -> Settings {
    load_settings(&fixture("settings.csv")).expect("fixture settings load")
}

fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

const LOG_CONTENT: &str = "Timestamp,Category,Name,Message\n\"01/08/23 11:00:00 AM\",\"Chat\",\"a\",\"b\"\n";

// =============================================================================
// Settings
// =============================================================================

#[test]
fn e2e_fixture_settings_load() {
    let s = settings();
    assert_eq!(s.input_timezone, "+0000");
    assert_eq!(s.excel_timestamp, "%Y-%m-%d %H:%M:%S");
    assert_eq!(s.name_separator, " ");
}

#[test]
fn e2e_missing_settings_is_not_found() {
    let result = load_settings(&fixture("no-such-settings.csv"));
    assert!(
        matches!(result, Err(ConfigError::NotFound { .. })),
        "expected NotFound, got {result:?}"
    );
}

// =============================================================================
// Log timeframe derivation
// =============================================================================

/// `MyGuild_2023-01-08_12-00-00.csv` at +0000 covers the ten days before
/// export.
#[test]
fn e2e_filename_timeframe() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("MyGuild_2023-01-08_12-00-00.csv");
    fs::write(&path, LOG_CONTENT).unwrap();

    let log = Log::from_path(&path, &settings()).unwrap();
    assert_eq!(log.timeframe_source(), TimeframeSource::Filename);
    assert_eq!(log.timeframe().start(), at("2022-12-29T12:00:00+00:00"));
    assert_eq!(log.timeframe().end(), at("2023-01-08T12:00:00+00:00"));
    assert_eq!(log.guild_name(), Some("MyGuild"));
}

/// `garbage.csv` has no export time, so the first and last rows bound it.
#[test]
fn e2e_content_fallback_timeframe() {
    let log = Log::from_path(&fixture("garbage.csv"), &settings()).unwrap();
    assert_eq!(log.timeframe_source(), TimeframeSource::Content);
    assert_eq!(log.timeframe().start(), at("2023-01-01T09:00:00+00:00"));
    assert_eq!(log.timeframe().end(), at("2023-01-08T23:00:00+00:00"));
}

#[test]
fn e2e_entries_fall_inside_filename_timeframe() {
    let log = Log::from_path(
        &fixture("guild/Iron_Knights_2023-01-08_12-00-00.csv"),
        &settings(),
    )
    .unwrap();
    assert_eq!(log.guild_name(), Some("Iron Knights"));
    assert_eq!(log.len(), 4);
    for entry in log.entries() {
        assert!(
            log.timeframe().contains(entry.time()),
            "{} outside {}",
            entry.time(),
            log.timeframe()
        );
    }
}

#[test]
fn e2e_missing_file_is_unreadable() {
    let result = Log::from_path(&fixture("Nope_2023-01-01_00-00-00.csv"), &settings());
    assert!(
        matches!(
            result,
            Err(GuildLogError::Source(SourceError::Unreadable { .. }))
        ),
        "expected Unreadable, got {result:?}"
    );
}

// =============================================================================
// Guild
// =============================================================================

#[test]
fn e2e_directory_scan_skips_non_exports() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A_2023-01-01_00-00-00.csv"), LOG_CONTENT).unwrap();
    fs::write(dir.path().join("readme.txt"), "not a log").unwrap();
    fs::write(dir.path().join("B_2023-01-02_00-00-00.csv"), LOG_CONTENT).unwrap();

    let guild = Guild::from_directory(dir.path(), &settings()).unwrap();
    assert_eq!(guild.len(), 2);

    let names: Vec<_> = guild
        .logs()
        .iter()
        .map(|l| l.source().unwrap().file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["A_2023-01-01_00-00-00.csv", "B_2023-01-02_00-00-00.csv"]
    );
}

#[test]
fn e2e_fixture_guild_flattens_in_log_order() {
    let guild = Guild::from_directory(&fixture("guild"), &settings()).unwrap();
    assert_eq!(guild.len(), 2);
    assert_eq!(guild.entry_count(), 6);

    let messages: Vec<_> = guild.records().map(|r| r.message.as_str()).collect();
    assert_eq!(messages.first(), Some(&"Anyone up for a Vana run?"));
    assert_eq!(messages.last(), Some(&"Nomad has left the guild."));

    let instant = at("2023-01-12T00:00:00+00:00");
    let covering: Vec<_> = guild.logs_at(instant).collect();
    assert_eq!(covering.len(), 1);
    assert_eq!(
        covering[0].source().unwrap().file_name().unwrap(),
        "Iron_Knights_2023-01-15_08-30-00.csv"
    );
}

#[test]
fn e2e_directory_with_bad_log_fails_whole_batch() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A_2023-01-01_00-00-00.csv"), LOG_CONTENT).unwrap();
    fs::write(
        dir.path().join("B_2023-01-02_00-00-00.csv"),
        "Timestamp,Category,Name,Message\nsoon,Chat,a,b\n",
    )
    .unwrap();

    let result = Guild::from_directory(dir.path(), &settings());
    assert!(
        matches!(result, Err(GuildLogError::Parse(_))),
        "expected a parse error, got {result:?}"
    );
}

// =============================================================================
// Round-trip and export
// =============================================================================

#[test]
fn e2e_record_round_trip() {
    let record = RawRecord::new(
        "01/07/23 09:15:42 PM",
        "Membership",
        "Zeddy",
        "Zeddy has joined the guild.",
    );
    let entry = Entry::from_record(record.clone(), &settings()).unwrap();
    assert_eq!(entry.record(), &record);
}

#[test]
fn e2e_log_export_matches_source_rows() {
    let source = fixture("guild/Iron_Knights_2023-01-15_08-30-00.csv");
    let log = Log::from_path(&source, &settings()).unwrap();

    let mut buf = Vec::new();
    log.dump_log(&mut buf, Path::new("out.csv")).unwrap();

    let original = fs::read_to_string(&source).unwrap();
    let exported = String::from_utf8(buf).unwrap();
    let original_rows: Vec<_> = original.lines().skip(1).collect();
    let exported_rows: Vec<_> = exported.lines().skip(1).collect();
    assert_eq!(exported_rows, original_rows);
}

#[test]
fn e2e_export_directory_to_excel_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("excel.tsv");

    let request = ExportRequest {
        inputs: vec![fixture("guild")],
        format: ExportFormat::Excel,
        output: Some(output.clone()),
        overwrite: false,
    };
    let summary = run_export(&request, &settings(), std::io::sink()).unwrap();
    assert_eq!(summary.logs, 2);
    assert_eq!(summary.rows, 6);

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = written.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "Timestamp\tCategory\tName\tMessage");
    assert_eq!(
        lines[1],
        "2023-01-08 11:00:00\tChat\tKrakob\tAnyone up for a Vana run?"
    );
}

#[test]
fn e2e_export_json() {
    let mut buf = Vec::new();
    let request = ExportRequest {
        inputs: vec![fixture("garbage.csv")],
        format: ExportFormat::Json,
        output: None,
        overwrite: false,
    };
    run_export(&request, &settings(), &mut buf).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Message"], "last one out");
}

#[test]
fn e2e_directory_given_as_file_fails_batch() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("A_2023-01-01_00-00-00.csv");
    fs::write(&good, LOG_CONTENT).unwrap();
    let not_a_file = dir.path().join("B_2023-01-02_00-00-00.csv");
    fs::create_dir(&not_a_file).unwrap();

    let result = Guild::from_files(&[good, not_a_file], &settings());
    assert!(
        matches!(
            result,
            Err(GuildLogError::Source(SourceError::Unreadable { .. }))
        ),
        "expected Unreadable, got {result:?}"
    );
}

#[cfg(unix)]
#[test]
fn e2e_symlinked_export_is_loaded() {
    use std::os::unix::fs::symlink;

    let store = tempfile::tempdir().unwrap();
    let target = store.path().join("real.dat");
    fs::write(&target, LOG_CONTENT).unwrap();

    let dir = tempfile::tempdir().unwrap();
    symlink(&target, dir.path().join("G_2023-01-01_00-00-00.csv")).unwrap();

    let guild = Guild::from_directory(dir.path(), &settings()).unwrap();
    assert_eq!(guild.len(), 1);
    assert_eq!(guild.entry_count(), 1);
    assert_eq!(guild.logs()[0].guild_name(), Some("G"));
}

#[cfg(unix)]
#[test]
fn e2e_dangling_symlinked_export_fails_batch() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A_2023-01-01_00-00-00.csv"), LOG_CONTENT).unwrap();
    symlink(
        dir.path().join("gone.dat"),
        dir.path().join("B_2023-01-02_00-00-00.csv"),
    )
    .unwrap();

    let result = Guild::from_directory(dir.path(), &settings());
    assert!(
        matches!(
            result,
            Err(GuildLogError::Source(SourceError::Unreadable { .. }))
        ),
        "expected Unreadable, got {result:?}"
    );
}
