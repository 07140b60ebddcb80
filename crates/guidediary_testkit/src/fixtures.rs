//! Test fixtures: entries and diary files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use guidediary_codec::{encode, Entry, Timestamp, Trailer};
use tempfile::TempDir;

/// Builds an entry, panicking on an invalid date or unencodable text.
pub fn entry(year: u32, month: u32, day: u32, hour: u32, text: &str) -> Entry {
    let timestamp = Timestamp::new(year, month, day, hour).expect("Invalid fixture timestamp");
    Entry::from_text(timestamp, text).expect("Invalid fixture text")
}

/// A temporary directory of diary files, removed on drop.
pub struct DiaryDir {
    temp_dir: TempDir,
}

impl DiaryDir {
    /// Creates an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// The directory path.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of a file in the directory (which need not exist).
    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Writes entries as a diary file with the given trailer convention.
    pub fn write_diary(&self, name: &str, entries: &[Entry], trailer: Trailer) -> PathBuf {
        self.write_bytes(name, &encode(entries, trailer))
    }

    /// Writes arbitrary bytes to a file.
    pub fn write_bytes(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.file(name);
        fs::write(&path, bytes).expect("Failed to write fixture file");
        path
    }
}

impl Default for DiaryDir {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidediary_codec::decode_detect;

    #[test]
    fn write_and_read_back() {
        let dir = DiaryDir::new();
        let entries = vec![entry(2020, 2, 29, 12, "Leap day")];
        let path = dir.write_diary("leap.gcal", &entries, Trailer::Truncated);
        assert_eq!(path.parent(), Some(dir.path()));
        let bytes = fs::read(path).unwrap();
        assert_eq!(decode_detect(&bytes).unwrap(), entries);
    }
}
