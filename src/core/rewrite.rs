// LogBoundary - core/rewrite.rs
//
// New-format rendering: one boundary marker line followed by the
// reconstructed record line, per record.

use crate::core::model::MessageRecord;
use crate::util::constants::BOUNDARY_MARKER;
use std::fmt::Write;

/// Render one record as `[<timestamp>] <sender>: <trimmed body>` without a
/// trailing newline.
pub fn record_line(record: &MessageRecord) -> String {
    format!(
        "[{}] {}: {}",
        record.timestamp,
        record.sender,
        record.trimmed_body()
    )
}

/// Render the full replacement content for a file.
///
/// Records are emitted in the given order with no merging or
/// deduplication. An empty slice renders to an empty string.
pub fn render_records(records: &[MessageRecord]) -> String {
    let mut out = String::new();
    for record in records {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{BOUNDARY_MARKER}");
        let _ = writeln!(out, "{}", record_line(record));
    }
    out
}
