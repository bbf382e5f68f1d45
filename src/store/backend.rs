//! Persistence backends for the place store
//!
//! The store persists the whole collection as one JSON payload under a
//! single logical key. That contract is captured by [`StorageBackend`]
//! so the production sled backend can be swapped for an in-memory one in
//! tests without touching store logic.

use super::error::StoreError;
use sled::{Db, Tree};
use std::path::Path;
use std::sync::Mutex;

/// Key under which the serialized collection is stored
const PLACES_KEY: &[u8] = b"places";

/// Single-key storage contract used by the place store
///
/// `read` returns `Ok(None)` when nothing has been written yet; `write`
/// replaces the payload wholesale. There are no partial updates.
pub trait StorageBackend {
    /// Read the persisted payload, if any
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read or the stored
    /// payload is not valid UTF-8.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the persisted payload
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend write fails.
    fn write(&self, payload: &str) -> Result<(), StoreError>;
}

// Allows tests to keep a handle on a shared backend while the store owns
// another.
impl<B: StorageBackend + ?Sized> StorageBackend for std::sync::Arc<B> {
    fn read(&self) -> Result<Option<String>, StoreError> {
        (**self).read()
    }

    fn write(&self, payload: &str) -> Result<(), StoreError> {
        (**self).write(payload)
    }
}

/// sled-backed storage
///
/// Uses one tree with one key; every write replaces the serialized
/// collection and flushes, so each mutation is atomic with respect to
/// the store's observable content.
pub struct SledBackend {
    db: Db,
    places: Tree,
}

impl SledBackend {
    /// Open or create a backend at the specified path
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or the tree
    /// cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let places = db.open_tree("places")?;
        Ok(Self { db, places })
    }
}

impl StorageBackend for SledBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match self.places.get(PLACES_KEY)? {
            Some(value) => {
                let text =
                    String::from_utf8(value.to_vec()).map_err(|_| StoreError::InvalidPayload)?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn write(&self, payload: &str) -> Result<(), StoreError> {
        self.places.insert(PLACES_KEY, payload.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }
}

impl Drop for SledBackend {
    fn drop(&mut self) {
        // Best-effort flush on drop. Errors are ignored since we can't
        // propagate them from Drop.
        let _ = self.db.flush();
    }
}

/// In-memory storage for tests
///
/// Holds the payload behind a mutex so the backend can be shared between
/// a store under test and the assertions inspecting what was persisted.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    payload: Mutex<Option<String>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-seeded with a payload, as if a previous run
    /// had persisted it
    #[must_use]
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Some(payload.into())),
        }
    }

    /// The currently persisted payload, if any
    #[must_use]
    pub fn payload(&self) -> Option<String> {
        self.payload.lock().map(|guard| guard.clone()).unwrap_or(None)
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.payload())
    }

    fn write(&self, payload: &str) -> Result<(), StoreError> {
        if let Ok(mut guard) = self.payload.lock() {
            *guard = Some(payload.to_string());
        }
        Ok(())
    }
}
