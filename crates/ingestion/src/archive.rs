//! ZIP extraction into a project directory.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use crate::error::{IngestionError, Result};

/// Extract every entry of `archive_path` into `dest`, overwriting files
/// that already exist. Returns the number of files written.
///
/// Entries whose names would resolve outside `dest` (absolute paths or
/// `..` components) abort the extraction.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let mut written = 0;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        // None for absolute names or names with `..` that climb out of dest
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| IngestionError::UnsafeEntry(entry.name().to_string()))?;
        let target = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        written += 1;
    }

    debug!(
        archive = %archive_path.display(),
        dest = %dest.display(),
        files = written,
        "Extracted archive"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::zip_archive;

    #[test]
    fn test_extract_nested_entries() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("all.zip");
        fs::write(
            &zip_path,
            zip_archive(&[("a/b/c.txt", b"deep"), ("top.txt", b"top")]),
        )
        .unwrap();

        let count = extract_archive(&zip_path, dir.path()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(fs::read(dir.path().join("a/b/c.txt")).unwrap(), b"deep");
        assert_eq!(fs::read(dir.path().join("top.txt")).unwrap(), b"top");
    }

    #[test]
    fn test_existing_files_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("all.zip");
        fs::write(dir.path().join("top.txt"), b"old contents that are longer").unwrap();
        fs::write(&zip_path, zip_archive(&[("top.txt", b"new")])).unwrap();

        extract_archive(&zip_path, dir.path()).unwrap();
        assert_eq!(fs::read(dir.path().join("top.txt")).unwrap(), b"new");
    }

    #[test]
    fn test_escaping_entry_rejected() {
        let parent = tempfile::tempdir().unwrap();
        let dest = parent.path().join("project");
        fs::create_dir_all(&dest).unwrap();
        let zip_path = dest.join("all.zip");
        fs::write(&zip_path, zip_archive(&[("../escaped.txt", b"x")])).unwrap();

        let err = extract_archive(&zip_path, &dest).unwrap_err();
        assert!(matches!(err, IngestionError::UnsafeEntry(_)));
        assert!(!parent.path().join("escaped.txt").exists());
    }

    #[test]
    fn test_not_a_zip() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("all.zip");
        fs::write(&zip_path, b"plain text").unwrap();

        let err = extract_archive(&zip_path, dir.path()).unwrap_err();
        assert!(matches!(err, IngestionError::Archive(_)));
    }
}
