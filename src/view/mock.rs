//! Recording surfaces for testing
//!
//! Each mock records the calls it receives so tests can assert that all
//! three surfaces observed the same snapshot, without any real
//! rendering. Mirrors the structure of the terminal adapter.

use super::traits::{ListSurface, MapSurface, PreviewSurface};
use super::types::{ListCard, Marker, PreviewDetail};
use std::collections::HashSet;

/// Mock map surface that records markers, popups and camera moves
#[derive(Debug, Default)]
pub struct MockMap {
    /// Markers from the most recent rebuild or in-place update
    pub markers: Vec<Marker>,
    /// Ids of markers whose popup is open
    pub open_popups: HashSet<String>,
    /// Number of full rebuilds performed
    pub rebuild_count: usize,
    /// Ids updated in place, in order
    pub in_place_updates: Vec<String>,
    /// Recorded `fly_to` targets
    pub flights: Vec<(f64, f64, u8)>,
}

impl MockMap {
    /// Create an empty mock map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The marker with the given id, if present
    #[must_use]
    pub fn marker(&self, id: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }
}

impl MapSurface for MockMap {
    fn rebuild(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
        // Fresh markers have no open popups.
        self.open_popups.clear();
        self.rebuild_count += 1;
    }

    fn update_marker(&mut self, marker: Marker) -> bool {
        let Some(existing) = self.markers.iter_mut().find(|m| m.id == marker.id) else {
            return false;
        };
        self.in_place_updates.push(marker.id.clone());
        *existing = marker;
        true
    }

    fn is_popup_open(&self, id: &str) -> bool {
        self.open_popups.contains(id)
    }

    fn open_popup(&mut self, id: &str) {
        if self.markers.iter().any(|m| m.id == id) {
            self.open_popups.insert(id.to_string());
        }
    }

    fn fly_to(&mut self, lat: f64, lng: f64, zoom: u8) {
        self.flights.push((lat, lng, zoom));
    }
}

/// Mock list surface that records cards and highlights
#[derive(Debug, Default)]
pub struct MockList {
    /// Cards from the most recent render, in display order
    pub cards: Vec<ListCard>,
    /// Currently highlighted card id
    pub highlighted: Option<String>,
    /// Number of renders performed
    pub render_count: usize,
}

impl MockList {
    /// Create an empty mock list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of the rendered cards, in display order
    #[must_use]
    pub fn card_ids(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.id.as_str()).collect()
    }
}

impl ListSurface for MockList {
    fn render(&mut self, cards: Vec<ListCard>) {
        self.cards = cards;
        self.render_count += 1;
    }

    fn highlight(&mut self, id: Option<&str>) {
        self.highlighted = id.map(str::to_string);
    }
}

/// Mock preview surface that records the last shown detail
#[derive(Debug, Default)]
pub struct MockPreview {
    /// Detail currently shown; `None` when hidden
    pub shown: Option<PreviewDetail>,
}

impl MockPreview {
    /// Create a hidden mock preview
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreviewSurface for MockPreview {
    fn show(&mut self, detail: PreviewDetail) {
        self.shown = Some(detail);
    }

    fn hide(&mut self) {
        self.shown = None;
    }
}
