//! In-memory record storage for tests and embedding.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{RecordStorage, StorageKey};

/// Record storage backed by a `HashMap`, lost when dropped.
///
/// Single-threaded like the page it stands in for; share it between stores
/// by reference or through an `Rc`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStorage for MemoryStorage {
    fn read(&self, key: &StorageKey) -> std::io::Result<Option<String>> {
        Ok(self.records.borrow().get(key.as_str()).cloned())
    }

    fn write(&self, key: &StorageKey, value: &str) -> std::io::Result<()> {
        self.records
            .borrow_mut()
            .insert(key.as_str().to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> std::io::Result<()> {
        self.records.borrow_mut().remove(key.as_str());
        Ok(())
    }
}
