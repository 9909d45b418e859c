// GuildLog - app/mod.rs
//
// Application layer: orchestration of the CLI commands.
// Dependencies: core and platform layers.

pub mod export;
pub mod inspect;
pub mod load;
