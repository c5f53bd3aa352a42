// LogBoundary - platform/mod.rs
//
// Platform abstraction layer: file I/O and configuration.
// Must NOT depend on: core, app.

pub mod config;
pub mod fs;
