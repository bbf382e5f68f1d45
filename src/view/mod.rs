//! View synchronizer - one source of truth, three consistent surfaces
//!
//! Given the full collection, the filtered view and the selection, the
//! synchronizer brings the map, list and preview surfaces into a single
//! consistent snapshot: markers exactly for the filtered view, cards in
//! `createdAt`-descending order, preview showing the selected record or
//! hidden. Every store mutation, query change and selection change must
//! be followed by a sync so no surface lags another.
//!
//! The rendering strategy is clear-and-recreate on every change, which
//! is fine at personal-collection sizes. The one exception is an edit to
//! a record whose popup is open: that marker is updated in place so the
//! popup survives the edit session.

use crate::selection::Selection;
use crate::Place;

pub mod mock;
pub mod term;
pub mod traits;
pub mod types;

pub use traits::{ListSurface, MapSurface, PreviewSurface};
pub use types::{card_for, detail_for, marker_for, ListCard, Marker, PreviewDetail, FOCUS_ZOOM};

/// Drives the three presentation surfaces from one state snapshot
pub struct ViewSynchronizer {
    map: Box<dyn MapSurface>,
    list: Box<dyn ListSurface>,
    preview: Box<dyn PreviewSurface>,
}

impl ViewSynchronizer {
    /// Create a synchronizer over the given surfaces
    #[must_use]
    pub fn new(
        map: Box<dyn MapSurface>,
        list: Box<dyn ListSurface>,
        preview: Box<dyn PreviewSurface>,
    ) -> Self {
        Self { map, list, preview }
    }

    /// Bring all three surfaces to the given snapshot
    ///
    /// Rebuilds the markers for the filtered view, renders the cards in
    /// display order, highlights and previews the selection. The
    /// selection is resolved against the full collection, not the
    /// filtered view, so a selected record hidden by the query keeps
    /// its preview.
    pub fn sync(&mut self, collection: &[Place], filtered: &[Place], selection: &Selection) {
        self.map
            .rebuild(filtered.iter().map(marker_for).collect());
        self.list.render(cards_in_display_order(filtered));
        self.sync_selection(collection, selection);
    }

    /// Re-sync after an edit to an existing record
    ///
    /// When the edited record's marker currently shows its popup, the
    /// marker is updated in place (position and bound content) and the
    /// popup stays open; otherwise this is an ordinary full sync. The
    /// list and preview surfaces re-render either way.
    pub fn sync_after_edit(
        &mut self,
        collection: &[Place],
        filtered: &[Place],
        selection: &Selection,
        edited_id: &str,
    ) {
        let edited = filtered.iter().find(|p| p.id == edited_id);
        let in_place = match edited {
            Some(place) if self.map.is_popup_open(edited_id) => {
                self.map.update_marker(marker_for(place))
            }
            _ => false,
        };

        if in_place {
            self.list.render(cards_in_display_order(filtered));
            self.sync_selection(collection, selection);
        } else {
            self.sync(collection, filtered, selection);
        }
    }

    /// Fly the map to a place and open its popup
    pub fn focus(&mut self, place: &Place) {
        self.map.fly_to(place.lat, place.lng, FOCUS_ZOOM);
        self.map.open_popup(&place.id);
    }

    /// Open the popup for the given id, if its marker is displayed
    pub fn open_popup(&mut self, id: &str) {
        self.map.open_popup(id);
    }

    fn sync_selection(&mut self, collection: &[Place], selection: &Selection) {
        let selected = selection
            .selected_id()
            .and_then(|id| collection.iter().find(|p| p.id == id));
        match selected {
            Some(place) => {
                self.list.highlight(Some(&place.id));
                self.preview.show(detail_for(place));
            }
            None => {
                self.list.highlight(None);
                self.preview.hide();
            }
        }
    }
}

/// Cards for the filtered view, ordered by `createdAt` descending
fn cards_in_display_order(filtered: &[Place]) -> Vec<ListCard> {
    let mut ordered: Vec<&Place> = filtered.iter().collect();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    ordered.into_iter().map(card_for).collect()
}
