//! Surface contracts for the three presentation surfaces
//!
//! The map, list and preview surfaces are external collaborators: the
//! synchronizer drives them through these traits and never assumes how
//! they draw. A terminal adapter and a recording mock ship with the
//! crate; a real map frontend would implement the same contracts.

use super::types::{ListCard, Marker, PreviewDetail};
use std::cell::RefCell;
use std::rc::Rc;

/// The map surface: markers with bound popup/tooltip content
pub trait MapSurface {
    /// Discard all markers and create fresh ones for the given set
    ///
    /// Rebuilding drops every prior marker together with its bindings,
    /// so no stale content or event wiring can survive a collection
    /// change. Popups open before the rebuild are closed by it.
    fn rebuild(&mut self, markers: Vec<Marker>);

    /// Update one marker's position and bound content in place
    ///
    /// The marker keeps its identity; an open popup stays open and shows
    /// the new content. Returns `false` when no marker with that id
    /// exists (the caller falls back to a rebuild).
    fn update_marker(&mut self, marker: Marker) -> bool;

    /// Whether the marker with the given id currently shows its popup
    fn is_popup_open(&self, id: &str) -> bool;

    /// Open the popup of the marker with the given id, if present
    fn open_popup(&mut self, id: &str);

    /// Animated pan/zoom to a coordinate
    fn fly_to(&mut self, lat: f64, lng: f64, zoom: u8);
}

/// The list surface: one card per record in the filtered view
pub trait ListSurface {
    /// Replace all cards with the given set, already in display order
    fn render(&mut self, cards: Vec<ListCard>);

    /// Highlight the card with the given id; `None` clears the highlight
    fn highlight(&mut self, id: Option<&str>);
}

/// The preview surface: full detail of the selected record
pub trait PreviewSurface {
    /// Show the given detail
    fn show(&mut self, detail: PreviewDetail);

    /// Hide the preview entirely
    fn hide(&mut self);
}

// Forwarding impls so a caller can keep a handle on a surface while the
// synchronizer owns another (used by the mocks in tests).

impl<S: MapSurface> MapSurface for Rc<RefCell<S>> {
    fn rebuild(&mut self, markers: Vec<Marker>) {
        self.borrow_mut().rebuild(markers);
    }

    fn update_marker(&mut self, marker: Marker) -> bool {
        self.borrow_mut().update_marker(marker)
    }

    fn is_popup_open(&self, id: &str) -> bool {
        self.borrow().is_popup_open(id)
    }

    fn open_popup(&mut self, id: &str) {
        self.borrow_mut().open_popup(id);
    }

    fn fly_to(&mut self, lat: f64, lng: f64, zoom: u8) {
        self.borrow_mut().fly_to(lat, lng, zoom);
    }
}

impl<S: ListSurface> ListSurface for Rc<RefCell<S>> {
    fn render(&mut self, cards: Vec<ListCard>) {
        self.borrow_mut().render(cards);
    }

    fn highlight(&mut self, id: Option<&str>) {
        self.borrow_mut().highlight(id);
    }
}

impl<S: PreviewSurface> PreviewSurface for Rc<RefCell<S>> {
    fn show(&mut self, detail: PreviewDetail) {
        self.borrow_mut().show(detail);
    }

    fn hide(&mut self) {
        self.borrow_mut().hide();
    }
}
