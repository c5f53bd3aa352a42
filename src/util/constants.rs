// LogBoundary - util/constants.rs
//
// Single source of truth for all named constants and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogBoundary";

/// Application identifier used for the platform config directory.
pub const APP_ID: &str = "LogBoundary";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Conversion
// =============================================================================

/// Traversal root used when neither the CLI nor config.toml names one.
/// Relative to the working directory.
pub const DEFAULT_ROOT: &str = "logs/conversations";

/// File-name suffix that selects a file for conversion.
pub const LOG_FILE_SUFFIX: &str = ".log";

/// Literal marker line written before every record in the new format.
/// The trailing space is part of the format.
pub const BOUNDARY_MARKER: &str = "#=====< MESSAGE BOUNDARY >=====# ";

/// Header of a legacy record: `[<timestamp>] <sender>: `.
///
/// The sender is any run of characters other than `:` and newline, so a
/// header never spans lines.
pub const LEGACY_HEADER_PATTERN: &str =
    r"\[(?P<timestamp>[0-9\-: ]+)\] (?P<sender>[^:\n]+): ";

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Console narration goes to stdout regardless, so
/// diagnostics stay quiet unless asked for.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Reports
// =============================================================================

/// Extension that selects CSV output for `--report`; anything else is JSON.
pub const CSV_REPORT_EXTENSION: &str = "csv";
