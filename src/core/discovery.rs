// GuildLog - core/discovery.rs
//
// Non-recursive listing of exported log files in a directory.
//
// Uses `walkdir` for the listing and reads only directory entries, never file
// contents. Files whose names do not follow the export pattern are skipped
// without being reported as errors; they are counted and logged at debug.
// Symlinks are listed by where they point, not followed into subdirectories.

use crate::core::filename;
use crate::util::error::SourceError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of listing one directory.
#[derive(Debug, Clone, Default)]
pub struct Discovered {
    /// Matching log files, sorted by file name.
    pub files: Vec<PathBuf>,
    /// Names of regular files that did not match the export pattern.
    pub skipped: Vec<String>,
}

/// List the export files directly inside `root`, sorted by file name.
///
/// Subdirectories are not descended into. Returns `Err` if `root` cannot be
/// read or is not a directory, or if listing fails part-way.
pub fn discover_logs(root: &Path) -> Result<Discovered, SourceError> {
    let meta = std::fs::metadata(root).map_err(|source| SourceError::Unreadable {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(SourceError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    let mut discovered = Discovered::default();
    for entry in walker {
        let entry = entry.map_err(|source| SourceError::Traversal {
            path: root.to_path_buf(),
            source,
        })?;
        if !is_file_like(&entry) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if filename::is_log_filename(&name) {
            discovered.files.push(entry.into_path());
        } else {
            discovered.skipped.push(name);
        }
    }

    tracing::debug!(
        root = %root.display(),
        found = discovered.files.len(),
        skipped = discovered.skipped.len(),
        "Directory listed"
    );

    Ok(discovered)
}

/// Regular files, plus symlinks that do not resolve to a directory. A
/// dangling link is kept so that loading it reports the failure.
fn is_file_like(entry: &walkdir::DirEntry) -> bool {
    if entry.path_is_symlink() {
        !entry.path().is_dir()
    } else {
        entry.file_type().is_file()
    }
}
