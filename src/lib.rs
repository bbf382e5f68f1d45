//! Pinmark - a personal geo-bookmarking tool
//!
//! This library provides the place store and cross-view synchronization
//! core for recording named map locations (with optional link, photo and
//! note) and browsing them via synchronized map, list and preview
//! surfaces backed by a single source of truth.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cli;
pub mod codec;
pub mod config;
pub mod filter;
pub mod output;
pub mod selection;
pub mod session;
pub mod store;
pub mod view;
pub mod weblink;

#[cfg(test)]
pub mod testing;

/// Maximum length of a place title, in characters.
pub const TITLE_MAX_LEN: usize = 80;
/// Maximum length of a place note, in characters.
pub const NOTE_MAX_LEN: usize = 500;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum PinmarkError {
    /// Place store error
    #[error("Store error: {0}")]
    StoreError(#[from] store::StoreError),
    /// Import/export codec error
    #[error("Import error: {0}")]
    CodecError(#[from] codec::CodecError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A single saved map location - the sole entity of the data model
///
/// Serialized with camelCase field names so that exported files and the
/// persisted collection match the interchange format field-for-field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Unique within the collection, immutable once assigned
    pub id: String,
    /// Non-empty, at most [`TITLE_MAX_LEN`] characters
    pub title: String,
    /// Absolute URL or empty string ("no link")
    #[serde(default)]
    pub url: String,
    /// Raw user input; normalized only at render time
    #[serde(default)]
    pub photo: String,
    /// At most [`NOTE_MAX_LEN`] characters
    #[serde(default)]
    pub note: String,
    /// Whether the link opens in a new tab/window
    #[serde(default = "default_open_new_tab")]
    pub open_new_tab: bool,
    /// Latitude, always finite
    pub lat: f64,
    /// Longitude, always finite
    pub lng: f64,
    /// ISO 8601, set once at creation
    pub created_at: String,
    /// ISO 8601, refreshed on every edit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

const fn default_open_new_tab() -> bool {
    true
}

/// User-editable fields of a place, excluding id and creation timestamp
///
/// Used both by the add path (the store assigns id and `created_at`) and
/// by the edit path (id and `created_at` are preserved from the existing
/// record).
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceDraft {
    pub title: String,
    pub url: String,
    pub photo: String,
    pub note: String,
    pub open_new_tab: bool,
    pub lat: f64,
    pub lng: f64,
}

impl PlaceDraft {
    /// Create a draft with the given title and coordinates, empty
    /// link/photo/note and `open_new_tab` defaulted to true
    #[must_use]
    pub fn new(title: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            title: title.into(),
            url: String::new(),
            photo: String::new(),
            note: String::new(),
            open_new_tab: true,
            lat,
            lng,
        }
    }

    /// Set the link URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the photo URL
    #[must_use]
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = photo.into();
        self
    }

    /// Set the note text
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Set whether the link opens in a new tab
    #[must_use]
    pub const fn with_open_new_tab(mut self, open_new_tab: bool) -> Self {
        self.open_new_tab = open_new_tab;
        self
    }
}

impl Place {
    /// Draft view of the record's editable fields
    #[must_use]
    pub fn to_draft(&self) -> PlaceDraft {
        PlaceDraft {
            title: self.title.clone(),
            url: self.url.clone(),
            photo: self.photo.clone(),
            note: self.note.clone(),
            open_new_tab: self.open_new_tab,
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Generate a fresh place id
///
/// Ids are prefixed UUIDv4s; uniqueness within a collection follows from
/// UUID uniqueness without the store having to scan existing ids.
#[must_use]
pub fn fresh_id() -> String {
    format!("p_{}", uuid::Uuid::new_v4().simple())
}

/// Current timestamp in ISO 8601 form, as stored in `created_at`/`updated_at`
#[must_use]
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
