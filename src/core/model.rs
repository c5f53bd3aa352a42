// LogBoundary - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers.

use crate::util::error::ConversionError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Message record
// =============================================================================

/// One logical message extracted from a legacy log file.
///
/// `body` is kept exactly as it appeared between the header and the next
/// record (including trailing newlines); writers use `trimmed_body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    /// Timestamp text between the brackets, verbatim.
    pub timestamp: String,

    /// Sender label, verbatim (no trimming).
    pub sender: String,

    /// Raw body text, possibly spanning several lines.
    pub body: String,
}

impl MessageRecord {
    pub fn new(
        timestamp: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// Body with leading and trailing whitespace removed.
    pub fn trimmed_body(&self) -> &str {
        self.body.trim()
    }
}

// =============================================================================
// Per-file outcome
// =============================================================================

/// What happened to a single discovered file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file was rewritten with `records` boundary-marked records.
    /// `records == 0` means the file is now empty.
    Converted { records: usize },

    /// Dry run: extraction found `records` records; nothing was written.
    DryRun { records: usize },

    /// Reading or writing the file failed.
    Failed { error: ConversionError },
}

impl FileOutcome {
    /// Number of records extracted, if extraction ran.
    pub fn records(&self) -> Option<usize> {
        match self {
            Self::Converted { records } | Self::DryRun { records } => Some(*records),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Short label used in console output and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Converted { .. } => "converted",
            Self::DryRun { .. } => "dry-run",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Outcome of one file, tagged with its path.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

// =============================================================================
// Run summary
// =============================================================================

/// Aggregated result of a whole conversion run.
#[derive(Debug)]
pub struct ConversionSummary {
    /// Wall-clock start of the run.
    pub started_at: DateTime<Utc>,

    /// Traversal root the run was pointed at.
    pub root: PathBuf,

    /// True when no file was written.
    pub dry_run: bool,

    /// One report per discovered file, in traversal order.
    pub files: Vec<FileReport>,

    /// Non-fatal traversal problems (inaccessible entries).
    pub warnings: Vec<String>,

    /// Total elapsed time.
    pub duration: Duration,
}

impl ConversionSummary {
    /// Files that were rewritten (or would have been, in a dry run).
    pub fn converted(&self) -> usize {
        self.files.iter().filter(|f| !f.outcome.is_failure()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_failure()).count()
    }

    /// Total records across all successfully processed files.
    pub fn total_records(&self) -> usize {
        self.files.iter().filter_map(|f| f.outcome.records()).sum()
    }

    /// Files where no record was recognised, i.e. files that end up (or
    /// would end up) empty.
    pub fn empty_outputs(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome.records() == Some(0))
            .count()
    }
}

// =============================================================================
// Progress messages
// =============================================================================

/// Progress events emitted by the batch driver, one stream per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionProgress {
    /// Processing of `path` is about to begin.
    FileStarted { path: PathBuf },

    /// `path` was processed successfully.
    FileConverted {
        path: PathBuf,
        records: usize,
        dry_run: bool,
    },

    /// `path` could not be converted; `error` is the display text.
    FileFailed { path: PathBuf, error: String },

    /// Non-fatal traversal warning.
    Warning { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn report(path: &str, outcome: FileOutcome) -> FileReport {
        FileReport {
            path: PathBuf::from(path),
            outcome,
        }
    }

    #[test]
    fn test_trimmed_body_strips_surrounding_whitespace_only() {
        let rec = MessageRecord::new("2024-01-01 10:00:00", "Alice", "  Line one\nLine two \n\n");
        assert_eq!(rec.trimmed_body(), "Line one\nLine two");
    }

    #[test]
    fn test_summary_counters() {
        let summary = ConversionSummary {
            started_at: Utc::now(),
            root: PathBuf::from("logs"),
            dry_run: false,
            files: vec![
                report("a.log", FileOutcome::Converted { records: 3 }),
                report("b.log", FileOutcome::Converted { records: 0 }),
                report(
                    "c.log",
                    FileOutcome::Failed {
                        error: ConversionError::Read {
                            path: PathBuf::from("c.log"),
                            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                        },
                    },
                ),
            ],
            warnings: Vec::new(),
            duration: Duration::ZERO,
        };

        assert_eq!(summary.converted(), 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.total_records(), 3);
        assert_eq!(summary.empty_outputs(), 1);
    }
}
