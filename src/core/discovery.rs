// LogBoundary - core/discovery.rs
//
// Recursive directory traversal and log file discovery.
//
// Architecture note: this module uses `walkdir` for directory traversal as an
// OS abstraction. It reads only directory entries, never file contents --
// that is owned by the app layer (app::convert).
//
//   - The root is validated up front; only an invalid root is fatal.
//   - Per-entry access errors are yielded as `Err` items so the caller can
//     record them and keep iterating.
//   - The walk is lazy: nothing past the root check happens until the
//     iterator is advanced.

use crate::util::constants::LOG_FILE_SUFFIX;
use crate::util::error::DiscoveryError;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Lazy iterator over log files beneath a root, in `walkdir` order.
pub struct LogFiles {
    walker: walkdir::IntoIter,
}

impl Iterator for LogFiles {
    type Item = Result<PathBuf, DiscoveryError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(e) => e,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    tracing::debug!(path = %path.display(), error = %e, "Discovery warning");
                    return Some(Err(DiscoveryError::Traversal { path, source: e }));
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            if !is_log_file_name(entry.file_name()) {
                tracing::trace!(file = %entry.path().display(), "Skipped: not a log file");
                continue;
            }

            return Some(Ok(entry.into_path()));
        }
    }
}

/// Start a recursive walk of `root` for files ending in `.log`.
///
/// # Fatal errors
/// Returns `Err` only if the root itself is unusable (`RootNotFound`,
/// `NotADirectory`, `PermissionDenied`).
///
/// # Non-fatal errors
/// Entries that cannot be read during the walk come out of the iterator
/// as `Err(DiscoveryError::Traversal)`; iteration continues past them.
pub fn discover_log_files(root: &Path) -> Result<LogFiles, DiscoveryError> {
    // `fs::metadata` rather than `Path::is_dir()`: the latter maps every
    // error to `false` and loses the PermissionDenied distinction.
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(DiscoveryError::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(DiscoveryError::PermissionDenied {
                path: root.to_path_buf(),
                source: e,
            });
        }
        Err(_) => {
            return Err(DiscoveryError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
    }

    tracing::debug!(root = %root.display(), suffix = LOG_FILE_SUFFIX, "Discovery starting");

    let walker = walkdir::WalkDir::new(root).follow_links(false).into_iter();
    Ok(LogFiles { walker })
}

/// Returns true if a file name selects the file for conversion.
pub fn is_log_file_name(name: &OsStr) -> bool {
    name.to_string_lossy().ends_with(LOG_FILE_SUFFIX)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_temp_tree() -> TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();

        fs::write(root.join("top.log"), "[2024-01-01 12:00:00] A: hi\n").expect("write top.log");
        fs::write(root.join("notes.txt"), "not a log\n").expect("write notes.txt");
        fs::write(root.join("archive.log.gz"), "binary").expect("write .gz");

        let deep = root.join("2024").join("01").join("chat");
        fs::create_dir_all(&deep).expect("mkdir deep");
        fs::write(deep.join("deep.log"), "[2024-01-01 12:00:01] B: yo\n").expect("write deep.log");

        // Directory whose name looks like a log file.
        fs::create_dir(root.join("folder.log")).expect("mkdir folder.log");

        dir
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_discovers_log_files_at_any_depth() {
        let dir = make_temp_tree();
        let files: Vec<PathBuf> = discover_log_files(dir.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(names(&files), vec!["deep.log", "top.log"]);
    }

    #[test]
    fn test_discovered_paths_are_under_root() {
        let dir = make_temp_tree();
        for path in discover_log_files(dir.path()).unwrap() {
            let path = path.unwrap();
            assert!(path.starts_with(dir.path()), "{} outside root", path.display());
        }
    }

    #[test]
    fn test_empty_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(discover_log_files(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_root_not_found() {
        let result = discover_log_files(Path::new("/nonexistent/path/logboundary"));
        assert!(matches!(result, Err(DiscoveryError::RootNotFound { .. })));
    }

    #[test]
    fn test_root_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not_a_dir.log");
        fs::write(&file, "content").unwrap();
        let result = discover_log_files(&file);
        assert!(matches!(result, Err(DiscoveryError::NotADirectory { .. })));
    }

    #[test]
    fn test_suffix_match() {
        assert!(is_log_file_name(OsStr::new("chat.log")));
        assert!(is_log_file_name(OsStr::new("a.b.log")));
        assert!(!is_log_file_name(OsStr::new("chat.log.1")));
        assert!(!is_log_file_name(OsStr::new("chat.LOG")));
        assert!(!is_log_file_name(OsStr::new("catalog")));
    }
}
