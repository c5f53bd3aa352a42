// LogBoundary - lib.rs
//
// Library entry point, exposing all modules for integration testing
// and programmatic use. The CLI lives in `main.rs`.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
