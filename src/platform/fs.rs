// LogBoundary - platform/fs.rs
//
// Whole-file read and overwrite with scoped handles.
//
// Each call opens, uses, and drops its own handle, so a file is never held
// open between the read and the write of a conversion. The overwrite is not
// transactional: a failure after truncation leaves the file short or empty.

use crate::util::error::ConversionError;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Read the full content of a file as strict UTF-8.
///
/// Invalid UTF-8 is an error rather than a lossy conversion: rewriting a
/// lossily decoded file would silently corrupt it.
pub fn read_utf8(path: &Path) -> Result<String, ConversionError> {
    let read_err = |source| ConversionError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut bytes = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut bytes))
        .map_err(read_err)?;

    String::from_utf8(bytes).map_err(|source| ConversionError::InvalidEncoding {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace the full content of `path` with `content`.
///
/// The file is truncated on open; an empty `content` leaves an empty file.
pub fn overwrite(path: &Path, content: &str) -> Result<(), ConversionError> {
    let write_err = |source| ConversionError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_err)?;
    file.write_all(content.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_read_utf8_roundtrips_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.log");
        fs::write(&path, "[1] A: héllo\n").unwrap();
        assert_eq!(read_utf8(&path).unwrap(), "[1] A: héllo\n");
    }

    #[test]
    fn test_read_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_utf8(&dir.path().join("missing.log")).unwrap_err();
        assert!(matches!(err, ConversionError::Read { .. }), "got {err:?}");
    }

    #[test]
    fn test_read_invalid_utf8_is_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.log");
        fs::write(&path, b"[1] A: caf\xe9\n").unwrap();
        let err = read_utf8(&path).unwrap_err();
        assert!(
            matches!(err, ConversionError::InvalidEncoding { .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_overwrite_replaces_not_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.log");
        fs::write(&path, "a much longer original content\n").unwrap();

        overwrite(&path, "short\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short\n");

        overwrite(&path, "").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_overwrite_into_missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = overwrite(&dir.path().join("nope").join("a.log"), "x").unwrap_err();
        assert!(matches!(err, ConversionError::Write { .. }), "got {err:?}");
    }
}
