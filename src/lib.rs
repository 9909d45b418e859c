// GuildLog - lib.rs
//
// Library entry point. The binary in `main.rs` is a thin CLI over these
// modules; everything is exposed for integration testing and programmatic use.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
