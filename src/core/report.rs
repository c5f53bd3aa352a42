// LogBoundary - core/report.rs
//
// CSV and JSON reports of a conversion run.
// Core layer: writes to any Write trait object; the caller opens the file.

use crate::core::model::{ConversionSummary, FileOutcome, FileReport};
use crate::util::constants;
use crate::util::error::ReportError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Output format of a run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
}

impl ReportFormat {
    /// `.csv` (case-insensitive) selects CSV; everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(constants::CSV_REPORT_EXTENSION) => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// One row per processed file.
#[derive(Debug, Serialize)]
struct FileRow {
    path: String,
    status: &'static str,
    records: Option<usize>,
    error_kind: Option<&'static str>,
    error: Option<String>,
}

impl From<&FileReport> for FileRow {
    fn from(report: &FileReport) -> Self {
        let (error_kind, error) = match &report.outcome {
            FileOutcome::Failed { error } => (Some(error.kind()), Some(error.to_string())),
            _ => (None, None),
        };
        Self {
            path: report.path.display().to_string(),
            status: report.outcome.label(),
            records: report.outcome.records(),
            error_kind,
            error,
        }
    }
}

#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    started_at: DateTime<Utc>,
    root: String,
    dry_run: bool,
    duration_ms: u128,
    files_converted: usize,
    files_failed: usize,
    files_emptied: usize,
    total_records: usize,
    warnings: &'a [String],
    files: Vec<FileRow>,
}

/// Write `summary` as pretty-printed JSON. Returns the number of file rows.
pub fn write_json_report<W: Write>(
    summary: &ConversionSummary,
    mut writer: W,
    report_path: &Path,
) -> Result<usize, ReportError> {
    let doc = ReportDocument {
        started_at: summary.started_at,
        root: summary.root.display().to_string(),
        dry_run: summary.dry_run,
        duration_ms: summary.duration.as_millis(),
        files_converted: summary.converted(),
        files_failed: summary.failed(),
        files_emptied: summary.empty_outputs(),
        total_records: summary.total_records(),
        warnings: &summary.warnings,
        files: summary.files.iter().map(FileRow::from).collect(),
    };

    serde_json::to_writer_pretty(&mut writer, &doc).map_err(|e| ReportError::Json {
        path: report_path.to_path_buf(),
        source: e,
    })?;
    writeln!(writer).map_err(|e| ReportError::Io {
        path: report_path.to_path_buf(),
        source: e,
    })?;

    Ok(doc.files.len())
}

/// Write one CSV row per file: path, status, records, error_kind, error.
/// Returns the number of rows written (excluding the header).
pub fn write_csv_report<W: Write>(
    summary: &ConversionSummary,
    writer: W,
    report_path: &Path,
) -> Result<usize, ReportError> {
    let csv_err = |e: csv::Error| ReportError::Csv {
        path: report_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["path", "status", "records", "error_kind", "error"])
        .map_err(csv_err)?;

    let mut count = 0;
    for report in &summary.files {
        let row = FileRow::from(report);
        let records = row.records.map(|n| n.to_string()).unwrap_or_default();
        csv_writer
            .write_record([
                row.path.as_str(),
                row.status,
                records.as_str(),
                row.error_kind.unwrap_or(""),
                row.error.as_deref().unwrap_or(""),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ReportError::Io {
        path: report_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Write the report in the given format.
pub fn write_report<W: Write>(
    summary: &ConversionSummary,
    format: ReportFormat,
    writer: W,
    report_path: &Path,
) -> Result<usize, ReportError> {
    match format {
        ReportFormat::Json => write_json_report(summary, writer, report_path),
        ReportFormat::Csv => write_csv_report(summary, writer, report_path),
    }
}
