// LogBoundary - core/parser.rs
//
// Legacy record extraction.
// Core layer: works on an in-memory string, never touches the filesystem.
//
// A legacy file is a flat run of `[<timestamp>] <sender>: <body>` records
// with no separator. The body of one record runs until the next header
// line or end of file, so extraction is a two-step process: locate every
// header that counts as a record boundary, then slice the text between
// consecutive boundaries.

use crate::core::model::MessageRecord;
use crate::util::constants;
use regex::Regex;

/// Extracts legacy-format message records from file content.
///
/// Owns the compiled header pattern; build one per run and reuse it for
/// every file.
#[derive(Debug, Clone)]
pub struct MessageExtractor {
    header: Regex,
}

/// A position in the content where the previous record's body stops.
#[derive(Debug)]
enum Boundary<'a> {
    /// A legacy record header.
    Legacy {
        cut: usize,
        timestamp: &'a str,
        sender: &'a str,
        body_start: usize,
    },

    /// A header that already sits under a boundary marker line. Not a
    /// record; `cut` is the start of the marker line.
    Marked { cut: usize },
}

impl Boundary<'_> {
    fn cut(&self) -> usize {
        match self {
            Self::Legacy { cut, .. } | Self::Marked { cut } => *cut,
        }
    }
}

impl MessageExtractor {
    pub fn new() -> Self {
        // The pattern is a compile-time constant exercised by the tests
        // below, so a failure here is a programming error.
        let header = Regex::new(constants::LEGACY_HEADER_PATTERN)
            .expect("LEGACY_HEADER_PATTERN must be a valid regex");
        Self { header }
    }

    /// Extract all legacy records from `content`, in file order.
    ///
    /// Returns an empty vec for empty or unrecognised content; that is not
    /// an error.
    pub fn extract(&self, content: &str) -> Vec<MessageRecord> {
        let boundaries = self.find_boundaries(content);
        let mut records = Vec::with_capacity(boundaries.len());

        for (idx, boundary) in boundaries.iter().enumerate() {
            let Boundary::Legacy {
                timestamp,
                sender,
                body_start,
                ..
            } = boundary
            else {
                continue;
            };

            let body_end = boundaries
                .get(idx + 1)
                .map_or(content.len(), Boundary::cut)
                .max(*body_start);

            records.push(MessageRecord::new(
                *timestamp,
                *sender,
                &content[*body_start..body_end],
            ));
        }

        tracing::trace!(
            boundaries = boundaries.len(),
            records = records.len(),
            "Extraction complete"
        );
        records
    }

    /// Locate every header that starts a record (or an already-marked
    /// record), in content order.
    ///
    /// The first header may sit anywhere; any text in front of it is not
    /// part of a record. Later headers must be the first thing on their
    /// line apart from spaces and tabs, otherwise they are body text.
    fn find_boundaries<'a>(&self, content: &'a str) -> Vec<Boundary<'a>> {
        let mut boundaries: Vec<Boundary<'a>> = Vec::new();

        for caps in self.header.captures_iter(content) {
            let (Some(whole), Some(timestamp), Some(sender)) =
                (caps.get(0), caps.name("timestamp"), caps.name("sender"))
            else {
                continue;
            };

            let start = whole.start();
            let line_start = line_start_of(content, start);
            let at_line_start = content[line_start..start]
                .chars()
                .all(|c| c == ' ' || c == '\t');

            if !at_line_start && !boundaries.is_empty() {
                continue;
            }

            if let Some(marker_start) = preceding_marker_line(content, line_start) {
                boundaries.push(Boundary::Marked { cut: marker_start });
                continue;
            }

            boundaries.push(Boundary::Legacy {
                cut: if at_line_start { line_start } else { start },
                timestamp: timestamp.as_str(),
                sender: sender.as_str(),
                body_start: whole.end(),
            });
        }

        boundaries
    }
}

impl Default for MessageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offset of the start of the line containing `pos`.
fn line_start_of(content: &str, pos: usize) -> usize {
    content[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// If the line before the one starting at `line_start` is a boundary
/// marker, return that marker line's start offset.
fn preceding_marker_line(content: &str, line_start: usize) -> Option<usize> {
    if line_start == 0 {
        return None;
    }
    let prev_end = line_start - 1;
    let prev_start = line_start_of(content, prev_end);
    let prev_line = &content[prev_start..prev_end];
    (prev_line.trim() == constants::BOUNDARY_MARKER.trim()).then_some(prev_start)
}

// =============================================================================
// Tests
// =============================================================================
