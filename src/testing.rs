//! Testing utilities for pinmark
//!
//! Helper constructors for stores and records used across unit and
//! integration tests. Only available when compiled with `cfg(test)`.

use crate::store::{MemoryBackend, PlaceStore};
use crate::{now_timestamp, Place};
use std::sync::Arc;

/// Open a store over a shared in-memory backend
///
/// Returns the store and a second handle to its backend, so tests can
/// inspect exactly what was persisted (or reopen a fresh store from it).
#[must_use]
pub fn memory_store() -> (PlaceStore, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let store = PlaceStore::open(Box::new(Arc::clone(&backend)));
    (store, backend)
}

/// Build a place record with the given id, title and coordinates
///
/// Remaining fields are empty/default; `created_at` is set to now.
#[must_use]
pub fn place(id: &str, title: &str, lat: f64, lng: f64) -> Place {
    Place {
        id: id.to_string(),
        title: title.to_string(),
        url: String::new(),
        photo: String::new(),
        note: String::new(),
        open_new_tab: true,
        lat,
        lng,
        created_at: now_timestamp(),
        updated_at: None,
    }
}

/// Build a place record with a note, for filter tests
#[must_use]
pub fn place_with_note(id: &str, title: &str, note: &str) -> Place {
    let mut p = place(id, title, 10.0, 20.0);
    p.note = note.to_string();
    p
}
