//! Filter engine - derives the filtered view from a text query
//!
//! A pure function of (collection, query). There is no fuzzy matching
//! and no ranking; the result is a subsequence of the input in its
//! original order.

use crate::Place;

/// Filter the collection by a free-text query
///
/// An empty or whitespace-only query returns the full collection
/// unchanged. A non-empty query is matched case-insensitively as a
/// substring against title OR note; a record is included if either
/// field contains it.
#[must_use]
pub fn by_query(places: &[Place], query: &str) -> Vec<Place> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return places.to_vec();
    }

    places
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle) || p.note.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
