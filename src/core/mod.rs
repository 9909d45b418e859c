// GuildLog - core/mod.rs
//
// Core business logic layer: records, entries, logs, guilds, timeframes,
// and exports.
// Must NOT depend on: platform or app.

pub mod discovery;
pub mod export;
pub mod filename;
pub mod guild;
pub mod log;
pub mod model;
pub mod records;
pub mod settings;
pub mod timeframe;
