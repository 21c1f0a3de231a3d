//! Rotating file writer for span export.
//!
//! Lines are appended to one file. Once the file grows past a size limit it is
//! shifted to `<file>.1`, older backups move up one slot (`.1` to `.2`, ...)
//! and the oldest beyond the retention count is removed.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default size limit before rotation (10 MB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated backups kept.
pub const DEFAULT_MAX_BACKUPS: usize = 3;

/// Thread-safe, size-rotated line writer.
///
/// The file is opened lazily on the first write, so construction never fails.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, DEFAULT_MAX_BYTES, DEFAULT_MAX_BACKUPS)
    }

    /// Creates a writer rotating after `max_bytes` and keeping `max_backups`
    /// rotated files.
    #[must_use]
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            writer: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Appends `line` plus a newline, rotating first when the file is full.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be rotated, opened or written, or when the
    /// lock was poisoned by a panicking writer.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::other(format!("mutex poisoned: {e}")))?;

        let full = fs::metadata(&self.file_path).is_ok_and(|meta| meta.len() >= self.max_bytes);
        if full {
            *writer = None;
            self.rotate()?;
        }

        let file = match writer.as_mut() {
            Some(file) => file,
            None => writer.insert(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            ),
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn backup_path(&self, slot: usize) -> PathBuf {
        let mut name = OsString::from(self.file_path.as_os_str());
        name.push(format!(".{slot}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.max_backups == 0 {
            return fs::remove_file(&self.file_path);
        }

        let oldest = self.backup_path(self.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for slot in (1..self.max_backups).rev() {
            let from = self.backup_path(slot);
            if from.exists() {
                fs::rename(&from, self.backup_path(slot + 1))?;
            }
        }
        fs::rename(&self.file_path, self.backup_path(1))
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::new(dir.path().join("spans.json"));
        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        let contents = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_and_keeps_bounded_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.json");
        let writer = FileWriter::with_limits(path.clone(), 4, 2);

        for line in ["first", "second", "third", "fourth"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "fourth\n");
        assert_eq!(fs::read_to_string(dir.path().join("spans.json.1")).unwrap(), "third\n");
        assert_eq!(fs::read_to_string(dir.path().join("spans.json.2")).unwrap(), "second\n");
        assert!(!dir.path().join("spans.json.3").exists());
    }

    #[test]
    fn zero_backups_truncates_instead() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.json");
        let writer = FileWriter::with_limits(path.clone(), 1, 0);

        writer.write_line("old").unwrap();
        writer.write_line("new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        assert!(!dir.path().join("spans.json.1").exists());
    }
}
