// LogBoundary - app/mod.rs
//
// Application layer: orchestration of a conversion run.
// Dependencies: core, platform.

pub mod convert;
