//! Durable key-value persistence of the cart.
//!
//! The cart lives as one JSON record under a versioned [`StorageKey`]. The
//! store keeps no in-memory copy: every call reads or writes the whole
//! record, so concurrent writers are last-writer-wins.
//!
//! Loading never fails. A missing record, an unreadable backend or a record
//! that does not parse all yield an empty [`Cart`].

mod file;
mod memory;

use std::rc::Rc;

use museum_cart_core::Cart;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur when writing the cart record.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cart could not be encoded.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A storage key contains characters that cannot name a record.
    #[error("Invalid storage key {0:?}: use letters, digits, '-' or '_'")]
    InvalidKey(String),
}

/// Name of the persisted cart record.
///
/// Keys carry a schema version so a future record layout can be stored next
/// to the old one instead of overwriting it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Record namespace used by the shop pages.
    pub const NAMESPACE: &'static str = "museumCart";

    /// Current schema version of the record.
    pub const VERSION: u32 = 1;

    /// Build `{namespace}V{version}`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] if `namespace` is empty or holds
    /// characters outside `[A-Za-z0-9_-]`.
    pub fn versioned(namespace: &str, version: u32) -> Result<Self, StoreError> {
        Self::parse(&format!("{namespace}V{version}"))
    }

    /// Accept an already-versioned record name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] if `name` is empty or holds
    /// characters outside `[A-Za-z0-9_-]`.
    pub fn parse(name: &str) -> Result<Self, StoreError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(name.to_owned()))
        } else {
            Err(StoreError::InvalidKey(name.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StorageKey {
    fn default() -> Self {
        Self(format!("{}V{}", Self::NAMESPACE, Self::VERSION))
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A synchronous string record store, shaped like browser local storage.
pub trait RecordStorage {
    /// Read a record; `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backend cannot be read.
    fn read(&self, key: &StorageKey) -> std::io::Result<Option<String>>;

    /// Replace a record.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backend cannot be written.
    fn write(&self, key: &StorageKey, value: &str) -> std::io::Result<()>;

    /// Delete a record. Deleting a missing record succeeds.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backend cannot be written.
    fn remove(&self, key: &StorageKey) -> std::io::Result<()>;
}

impl<S: RecordStorage + ?Sized> RecordStorage for &S {
    fn read(&self, key: &StorageKey) -> std::io::Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &StorageKey, value: &str) -> std::io::Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &StorageKey) -> std::io::Result<()> {
        (**self).remove(key)
    }
}

impl<S: RecordStorage + ?Sized> RecordStorage for Rc<S> {
    fn read(&self, key: &StorageKey) -> std::io::Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &StorageKey, value: &str) -> std::io::Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &StorageKey) -> std::io::Result<()> {
        (**self).remove(key)
    }
}

/// The cart's single source of truth.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    storage: S,
    key: StorageKey,
}

impl<S: RecordStorage> CartStore<S> {
    /// Create a store over `storage` using the default record key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, StorageKey::default())
    }

    /// Create a store over `storage` using a custom record key.
    pub const fn with_key(storage: S, key: StorageKey) -> Self {
        Self { storage, key }
    }

    /// The record key this store reads and writes.
    pub const fn key(&self) -> &StorageKey {
        &self.key
    }

    /// The underlying storage backend.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the cart, falling back to an empty cart on any failure.
    pub fn load(&self) -> Cart {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, "Failed to read cart record: {e}");
                return Cart::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, "Discarding malformed cart record: {e}");
            Cart::new()
        })
    }

    /// Overwrite the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be encoded or written.
    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        let raw = serde_json::to_string(cart)?;
        self.storage.write(&self.key, &raw)?;
        tracing::debug!(key = %self.key, lines = cart.len(), "Saved cart");
        Ok(())
    }

    /// Delete the persisted record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot delete the record.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove(&self.key)?;
        tracing::debug!(key = %self.key, "Cleared cart record");
        Ok(())
    }
}
