// LogBoundary - core/mod.rs
//
// Core business logic layer: discovery, extraction, rendering, reports.
// Must NOT depend on: platform or app.

pub mod discovery;
pub mod model;
pub mod parser;
pub mod report;
pub mod rewrite;
