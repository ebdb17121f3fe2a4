//! Atomic file replacement
//!
//! Content goes to a sibling temp file which is then renamed over the
//! target, so a reader never observes a half-written snapshot.

use crate::errors::{io_error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `content` to `target`, creating the parent directory if needed
///
/// Every call gets its own uniquely named temp file, so concurrent writers
/// of the same target in one process never collide on the temp path. The
/// last rename wins.
pub fn atomic_write(target: &Path, content: &[u8]) -> Result<()> {
    let parent = match target.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| io_error("create_snapshot_dir", parent, e))?;
            parent
        }
        None => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| io_error("create_snapshot_temp", parent, e))?;
    temp.write_all(content)
        .map_err(|e| io_error("write_snapshot_temp", temp.path(), e))?;

    // A failed persist drops the temp file, which removes it
    temp.persist(target)
        .map_err(|e| io_error("rename_snapshot_temp", target, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("Orders.txt");

        atomic_write(&target, b"first").unwrap();
        atomic_write(&target, b"second").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"second");
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("_snapshots").join("nested").join("a.txt");

        atomic_write(&target, b"nested").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"nested");
    }

    #[test]
    fn test_no_tmp_files_after_write() {
        let temp_dir = TempDir::new().unwrap();
        atomic_write(&temp_dir.path().join("a.txt"), b"clean").unwrap();

        let leftovers = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "a.txt")
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_concurrent_writers_of_one_target_all_succeed() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("Shared.txt");

        for _ in 0..50 {
            let errors: Vec<_> = std::thread::scope(|scope| {
                let handles: Vec<_> = (0..4)
                    .map(|i| {
                        let target = &target;
                        scope.spawn(move || atomic_write(target, format!("writer {}", i).as_bytes()))
                    })
                    .collect();
                handles
                    .into_iter()
                    .filter_map(|h| h.join().unwrap().err())
                    .collect()
            });
            assert!(errors.is_empty(), "concurrent writes failed: {:?}", errors);
        }

        let content = fs::read_to_string(&target).unwrap();
        assert!(content.starts_with("writer "));
    }
}
