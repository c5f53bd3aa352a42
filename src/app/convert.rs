// LogBoundary - app/convert.rs
//
// Batch conversion driver. Walks the root, then for each log file:
// read → extract → render → overwrite, strictly one file at a time.
//
//   - All per-file errors are non-fatal; the batch continues to the next file.
//   - Each outcome is a value in the returned summary, not a log line only.
//   - Progress is pushed to a caller-supplied callback (console narration in
//     the binary, a Vec in tests).
//   - No retry: a failed read or write is reported once and left as is.

use crate::core::discovery;
use crate::core::model::{ConversionProgress, ConversionSummary, FileOutcome, FileReport};
use crate::core::parser::MessageExtractor;
use crate::core::rewrite;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{ConversionError, DiscoveryError};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Options for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory tree to convert.
    pub root: PathBuf,

    /// Extract and report, but leave every file untouched.
    pub dry_run: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from(constants::DEFAULT_ROOT),
            dry_run: false,
        }
    }
}

/// Convert every log file under `options.root`.
///
/// `on_progress` receives `FileStarted` before each file and exactly one of
/// `FileConverted` / `FileFailed` after it, plus `Warning` for entries the
/// walk could not access. It runs on the caller's thread.
///
/// # Fatal errors
/// Returns `Err` only if the root cannot be walked at all.
pub fn run_conversion<F>(
    options: &ConvertOptions,
    extractor: &MessageExtractor,
    mut on_progress: F,
) -> Result<ConversionSummary, DiscoveryError>
where
    F: FnMut(&ConversionProgress),
{
    let started_at = Utc::now();
    let start = Instant::now();

    let log_files = discovery::discover_log_files(&options.root)?;

    tracing::info!(
        root = %options.root.display(),
        dry_run = options.dry_run,
        "Conversion started"
    );

    let mut files: Vec<FileReport> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    for item in log_files {
        let path = match item {
            Ok(p) => p,
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(warning = %message, "Traversal warning");
                on_progress(&ConversionProgress::Warning {
                    message: message.clone(),
                });
                warnings.push(message);
                continue;
            }
        };

        on_progress(&ConversionProgress::FileStarted { path: path.clone() });

        let outcome = match convert_file(&path, extractor, options.dry_run) {
            Ok(records) => {
                on_progress(&ConversionProgress::FileConverted {
                    path: path.clone(),
                    records,
                    dry_run: options.dry_run,
                });
                if options.dry_run {
                    FileOutcome::DryRun { records }
                } else {
                    FileOutcome::Converted { records }
                }
            }
            Err(error) => {
                tracing::warn!(file = %path.display(), error = %error, "Conversion failed");
                on_progress(&ConversionProgress::FileFailed {
                    path: path.clone(),
                    error: error.to_string(),
                });
                FileOutcome::Failed { error }
            }
        };

        files.push(FileReport { path, outcome });
    }

    let summary = ConversionSummary {
        started_at,
        root: options.root.clone(),
        dry_run: options.dry_run,
        files,
        warnings,
        duration: start.elapsed(),
    };

    tracing::info!(
        files = summary.files.len(),
        converted = summary.converted(),
        failed = summary.failed(),
        emptied = summary.empty_outputs(),
        records = summary.total_records(),
        "Conversion complete"
    );

    Ok(summary)
}

/// Convert a single file in place and return the number of records written.
///
/// With `dry_run` the file is read and parsed but not written.
pub fn convert_file(
    path: &Path,
    extractor: &MessageExtractor,
    dry_run: bool,
) -> Result<usize, ConversionError> {
    let content = fs::read_utf8(path)?;
    let records = extractor.extract(&content);

    if records.is_empty() && !content.trim().is_empty() {
        // Unrecognised content is not an error, but the rewrite empties it.
        tracing::warn!(
            file = %path.display(),
            bytes = content.len(),
            "No legacy records recognised; output will be empty"
        );
    } else {
        tracing::debug!(file = %path.display(), records = records.len(), "Records extracted");
    }

    if dry_run {
        return Ok(records.len());
    }

    fs::overwrite(path, &rewrite::render_records(&records))?;
    Ok(records.len())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::constants::BOUNDARY_MARKER;
    use std::fs as stdfs;
    use tempfile::TempDir;

    const LEGACY: &str = "[2024-01-01 10:00:00] Alice: Hello there\n[2024-01-01 10:00:05] Bob: Hi!\n";

    fn options(dir: &TempDir) -> ConvertOptions {
        ConvertOptions {
            root: dir.path().to_path_buf(),
            dry_run: false,
        }
    }

    #[test]
    fn test_converts_nested_files_and_skips_other_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("alice").join("2024");
        stdfs::create_dir_all(&nested).unwrap();
        stdfs::write(dir.path().join("a.log"), LEGACY).unwrap();
        stdfs::write(nested.join("b.log"), LEGACY).unwrap();
        stdfs::write(dir.path().join("keep.txt"), LEGACY).unwrap();

        let summary = run_conversion(&options(&dir), &MessageExtractor::new(), |_| {}).unwrap();

        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.converted(), 2);
        assert_eq!(summary.total_records(), 4);

        let converted = stdfs::read_to_string(nested.join("b.log")).unwrap();
        assert_eq!(converted.matches(BOUNDARY_MARKER).count(), 2);
        assert_eq!(
            stdfs::read_to_string(dir.path().join("keep.txt")).unwrap(),
            LEGACY,
            "non-.log files must be untouched"
        );
    }

    #[test]
    fn test_failure_is_isolated_per_file() {
        let dir = tempfile::tempdir().unwrap();
        stdfs::write(dir.path().join("good.log"), LEGACY).unwrap();
        stdfs::write(dir.path().join("bad.log"), b"[1] A: \xff\xfe\n").unwrap();

        let summary = run_conversion(&options(&dir), &MessageExtractor::new(), |_| {}).unwrap();

        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.converted(), 1);

        let bad = summary
            .files
            .iter()
            .find(|f| f.path.ends_with("bad.log"))
            .unwrap();
        assert!(matches!(
            bad.outcome,
            FileOutcome::Failed {
                error: ConversionError::InvalidEncoding { .. }
            }
        ));
        // A failed read leaves the bytes as they were.
        assert_eq!(
            stdfs::read(dir.path().join("bad.log")).unwrap(),
            b"[1] A: \xff\xfe\n"
        );
        assert!(stdfs::read_to_string(dir.path().join("good.log"))
            .unwrap()
            .starts_with(BOUNDARY_MARKER));
    }

    #[test]
    fn test_progress_events_bracket_each_file() {
        let dir = tempfile::tempdir().unwrap();
        stdfs::write(dir.path().join("good.log"), LEGACY).unwrap();
        stdfs::write(dir.path().join("bad.log"), b"\xff").unwrap();

        let mut events = Vec::new();
        run_conversion(&options(&dir), &MessageExtractor::new(), |p| {
            events.push(p.clone())
        })
        .unwrap();

        assert_eq!(events.len(), 4);
        for pair in events.chunks(2) {
            let ConversionProgress::FileStarted { path } = &pair[0] else {
                panic!("expected FileStarted, got {:?}", pair[0]);
            };
            match &pair[1] {
                ConversionProgress::FileConverted { path: p, records, dry_run } => {
                    assert_eq!(p, path);
                    assert_eq!(*records, 2);
                    assert!(!dry_run);
                }
                ConversionProgress::FileFailed { path: p, error } => {
                    assert_eq!(p, path);
                    assert!(error.contains("bad.log"), "got: {error}");
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
    }

    #[test]
    fn test_dry_run_leaves_files_untouched() {
        let dir = tempfile::tempdir().unwrap();
        stdfs::write(dir.path().join("a.log"), LEGACY).unwrap();

        let opts = ConvertOptions {
            dry_run: true,
            ..options(&dir)
        };
        let summary = run_conversion(&opts, &MessageExtractor::new(), |_| {}).unwrap();

        assert!(summary.dry_run);
        assert!(matches!(
            summary.files[0].outcome,
            FileOutcome::DryRun { records: 2 }
        ));
        assert_eq!(stdfs::read_to_string(dir.path().join("a.log")).unwrap(), LEGACY);
    }

    #[test]
    fn test_empty_and_unrecognised_files_become_empty() {
        let dir = tempfile::tempdir().unwrap();
        stdfs::write(dir.path().join("empty.log"), "").unwrap();
        stdfs::write(dir.path().join("prose.log"), "no records in here\n").unwrap();

        let summary = run_conversion(&options(&dir), &MessageExtractor::new(), |_| {}).unwrap();

        assert_eq!(summary.failed(), 0);
        assert_eq!(summary.empty_outputs(), 2);
        assert_eq!(stdfs::read_to_string(dir.path().join("empty.log")).unwrap(), "");
        assert_eq!(stdfs::read_to_string(dir.path().join("prose.log")).unwrap(), "");
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let opts = ConvertOptions {
            root: PathBuf::from("/nonexistent/logboundary/root"),
            dry_run: false,
        };
        let result = run_conversion(&opts, &MessageExtractor::new(), |_| {});
        assert!(matches!(result, Err(DiscoveryError::RootNotFound { .. })));
    }

    #[test]
    fn test_convert_file_reports_record_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.log");
        stdfs::write(&path, LEGACY).unwrap();
        assert_eq!(convert_file(&path, &MessageExtractor::new(), false).unwrap(), 2);
    }
}
