//! Place store - the canonical collection and its persistence
//!
//! The store is the sole owner of the collection of saved places. Every
//! mutating operation applies the change in memory and then synchronously
//! serializes the entire collection to the storage backend, so the
//! persisted payload always matches the observable collection.
//!
//! On startup the store loads from the backend; a missing key, corrupt
//! JSON or a non-array payload silently initializes an empty collection.
//! An empty collection is itself a valid state, so nothing is reported.

use crate::{fresh_id, now_timestamp, Place, PlaceDraft};

pub mod backend;
pub mod error;

pub use backend::{MemoryBackend, SledBackend, StorageBackend};
pub use error::StoreError;

/// Owner of the canonical place collection
///
/// All other components hold at most a read snapshot of the collection
/// or a single selected id; nothing outside the store mutates records.
pub struct PlaceStore {
    backend: Box<dyn StorageBackend>,
    places: Vec<Place>,
}

impl PlaceStore {
    /// Open a store on the given backend, loading any persisted collection
    ///
    /// A backend with no payload, an unreadable backend, an unparsable
    /// payload, or a payload that is not a JSON array all yield an empty
    /// collection; opening never fails.
    pub fn open(backend: Box<dyn StorageBackend>) -> Self {
        let places = match backend.read() {
            Ok(Some(payload)) => serde_json::from_str::<Vec<Place>>(&payload).unwrap_or_default(),
            Ok(None) | Err(_) => Vec::new(),
        };
        Self { backend, places }
    }

    /// Add a new place from the given draft
    ///
    /// Assigns a fresh unique id and the current timestamp, appends the
    /// record and persists. Field validity (non-empty title, finite
    /// coordinates) is the caller's responsibility; the form and import
    /// paths validate upstream.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting the collection fails.
    pub fn add(&mut self, draft: PlaceDraft) -> Result<Place, StoreError> {
        let place = Place {
            id: fresh_id(),
            title: draft.title,
            url: draft.url,
            photo: draft.photo,
            note: draft.note,
            open_new_tab: draft.open_new_tab,
            lat: draft.lat,
            lng: draft.lng,
            created_at: now_timestamp(),
            updated_at: None,
        };
        self.places.push(place.clone());
        self.persist()?;
        Ok(place)
    }

    /// Merge the draft into the record with the given id
    ///
    /// Preserves id and `created_at`, refreshes `updated_at`, persists.
    /// An unknown id is a no-op, not an error.
    ///
    /// # Returns
    /// `true` if a record was updated, `false` if the id was unknown.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting the collection fails.
    pub fn update(&mut self, id: &str, draft: PlaceDraft) -> Result<bool, StoreError> {
        let Some(place) = self.places.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };

        place.title = draft.title;
        place.url = draft.url;
        place.photo = draft.photo;
        place.note = draft.note;
        place.open_new_tab = draft.open_new_tab;
        place.lat = draft.lat;
        place.lng = draft.lng;
        place.updated_at = Some(now_timestamp());

        self.persist()?;
        Ok(true)
    }

    /// Remove the record with the given id, if present
    ///
    /// # Returns
    /// Whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting the collection fails.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.places.len();
        self.places.retain(|p| p.id != id);
        if self.places.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Discard the current collection and install the given one
    ///
    /// Used by import in replace mode.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting the collection fails.
    pub fn replace_all(&mut self, places: Vec<Place>) -> Result<(), StoreError> {
        self.places = places;
        self.persist()
    }

    /// Append the given records to the current collection
    ///
    /// Used by import in append mode.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting the collection fails.
    pub fn append_all(&mut self, places: Vec<Place>) -> Result<(), StoreError> {
        self.places.extend(places);
        self.persist()
    }

    /// Remove every record from the collection
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting the collection fails.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.places.clear();
        self.persist()
    }

    /// Read-only snapshot of the full collection, in storage order
    #[must_use]
    pub fn list(&self) -> &[Place] {
        &self.places
    }

    /// Look up a record by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    /// Check whether a record with the given id exists
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of records in the collection
    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Serialize the entire collection and write it to the backend
    ///
    /// Always writes the whole collection, never a partial update, so
    /// each operation is atomic with respect to the persisted content.
    fn persist(&self) -> Result<(), StoreError> {
        let payload = serde_json::to_string_pretty(&self.places)?;
        self.backend.write(&payload)
    }
}
