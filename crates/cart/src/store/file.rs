//! File-backed record storage: one JSON file per key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{RecordStorage, StorageKey};

/// Stores each record as `<dir>/<key>.json`.
///
/// Writes land in a sibling `.tmp` file first and are renamed into place, so
/// a crash mid-write leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the record files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &StorageKey) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl RecordStorage for FileStorage {
    fn read(&self, key: &StorageKey) -> std::io::Result<Option<String>> {
        match fs::read_to_string(self.record_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &StorageKey, value: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.record_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)
    }

    fn remove(&self, key: &StorageKey) -> std::io::Result<()> {
        match fs::remove_file(self.record_path(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
