// GuildLog - app/load.rs
//
// Turns CLI input paths into a Guild: a single directory is scanned,
// anything else is treated as an ordered list of log files.

use crate::core::guild::Guild;
use crate::core::settings::Settings;
use std::path::PathBuf;

/// Load the guild described by `inputs`.
pub fn load_guild(inputs: &[PathBuf], settings: &Settings) -> crate::util::error::Result<Guild> {
    match inputs {
        [single] if single.is_dir() => {
            tracing::debug!(dir = %single.display(), "Loading guild from directory");
            Guild::from_directory(single, settings)
        }
        files => {
            tracing::debug!(files = files.len(), "Loading guild from file list");
            Guild::from_files(files, settings)
        }
    }
}
