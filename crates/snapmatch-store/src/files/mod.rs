//! Snapshot file primitives

mod atomic;

pub use atomic::atomic_write;

use crate::errors::{io_error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a snapshot file, `None` if it does not exist
pub fn read_text(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error("read_snapshot", path, e)),
    }
}

/// Delete a file if present. Returns `true` if something was deleted.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_error("remove_mismatch", path, e)),
    }
}

/// Write snapshot text followed by a single newline
pub fn write_snapshot_text(path: &Path, text: &str) -> Result<()> {
    let mut content = String::with_capacity(text.len() + 1);
    content.push_str(text);
    content.push('\n');
    atomic_write(path, content.as_bytes())
}

/// Drop the single trailing newline added on write
pub fn strip_trailing_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(read_text(&temp_dir.path().join("absent.txt")).unwrap(), None);
    }

    #[test]
    fn test_write_appends_newline() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snap.txt");

        write_snapshot_text(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_remove_if_exists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snap.txt.actual");

        assert!(!remove_if_exists(&path).unwrap());
        fs::write(&path, "x").unwrap();
        assert!(remove_if_exists(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_strip_trailing_newline_only_once() {
        assert_eq!(strip_trailing_newline("a\n"), "a");
        assert_eq!(strip_trailing_newline("a\r\n"), "a");
        assert_eq!(strip_trailing_newline("a\n\n"), "a\n");
        assert_eq!(strip_trailing_newline("a"), "a");
    }
}
