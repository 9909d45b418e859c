// GuildLog - platform/mod.rs
//
// Platform abstraction layer: settings file, platform directories, output
// files.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
