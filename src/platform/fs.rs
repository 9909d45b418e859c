// GuildLog - platform/fs.rs
//
// Output file creation with overwrite protection.

use crate::util::error::SourceError;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::Path;

/// Create `path` for writing.
///
/// Without `overwrite`, an existing file is left untouched and
/// `SourceError::OutputExists` is returned. The check and the creation are a
/// single `create_new` open, so a file appearing in between is not clobbered.
pub fn create_output(path: &Path, overwrite: bool) -> Result<BufWriter<File>, SourceError> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let file = options.open(path).map_err(|source| {
        if source.kind() == io::ErrorKind::AlreadyExists {
            SourceError::OutputExists {
                path: path.to_path_buf(),
            }
        } else {
            SourceError::Create {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    tracing::debug!(path = %path.display(), overwrite, "Output file opened");
    Ok(BufWriter::new(file))
}
