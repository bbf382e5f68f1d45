//! Session controller - explicit state, message-passing style
//!
//! The session threads the mutable state of an interactive run (the
//! store, the active query, the selection and the add-mode flag) through
//! one controller instead of scattering it across globals. Every
//! mutation goes through a session method, and every method ends by
//! re-synchronizing the three surfaces from the current snapshot, so no
//! surface can lag another.
//!
//! Destructive operations (`remove`, `clear_all`) assume the caller has
//! already obtained user confirmation; a declined confirmation simply
//! means the method is never called and no state changes.

use crate::codec::{self, ImportMode};
use crate::filter;
use crate::selection::Selection;
use crate::store::PlaceStore;
use crate::view::ViewSynchronizer;
use crate::weblink::sanitize;
use crate::{Place, PlaceDraft, PinmarkError, NOTE_MAX_LEN, TITLE_MAX_LEN};

type Result<T> = std::result::Result<T, PinmarkError>;

/// One interactive run over a store and a set of surfaces
pub struct Session {
    store: PlaceStore,
    views: ViewSynchronizer,
    query: String,
    selection: Selection,
    add_mode: bool,
}

impl Session {
    /// Create a session; surfaces are synchronized on first use
    #[must_use]
    pub fn new(store: PlaceStore, views: ViewSynchronizer) -> Self {
        Self {
            store,
            views,
            query: String::new(),
            selection: Selection::new(),
            add_mode: false,
        }
    }

    /// Initial render: sync all surfaces and select the first place
    pub fn start(&mut self) {
        if let Some(first) = self.store.list().first() {
            let id = first.id.clone();
            self.selection.select(&id, self.store.list());
        }
        self.resync();
    }

    /// Read-only snapshot of the full collection
    #[must_use]
    pub fn places(&self) -> &[Place] {
        self.store.list()
    }

    /// The current filtered view
    #[must_use]
    pub fn filtered(&self) -> Vec<Place> {
        filter::by_query(self.store.list(), &self.query)
    }

    /// The currently selected record, if any
    #[must_use]
    pub fn selected(&self) -> Option<&Place> {
        self.selection
            .selected_id()
            .and_then(|id| self.store.get(id))
    }

    /// Change the active query and re-render the filtered view
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.resync();
    }

    /// Select a place; no-op when the id is not in the full collection
    pub fn select(&mut self, id: &str) -> bool {
        let changed = self.selection.select(id, self.store.list());
        if changed {
            self.resync();
        }
        changed
    }

    /// Select a place, fly the map to it and open its popup
    pub fn focus(&mut self, id: &str) -> bool {
        if !self.select(id) {
            return false;
        }
        if let Some(place) = self.store.get(id) {
            let place = place.clone();
            self.views.focus(&place);
        }
        true
    }

    /// Submit the place form: add a new record or edit an existing one
    ///
    /// Validates what the form is responsible for (non-empty title,
    /// finite coordinates), truncates title and note to their limits and
    /// sanitizes the link. For an edit, the marker of a record whose
    /// popup is open is updated in place; either way the edited record
    /// ends up selected with its popup shown. For an add, the map flies
    /// to the new place.
    ///
    /// # Errors
    ///
    /// Returns `PinmarkError::InvalidInput` for an empty title or
    /// non-finite coordinates, or a store error if persisting fails.
    pub fn submit(&mut self, draft: PlaceDraft, edit_id: Option<&str>) -> Result<Place> {
        let draft = validate_draft(draft)?;

        match edit_id {
            Some(id) => {
                if !self.store.update(id, draft)? {
                    return Err(PinmarkError::InvalidInput(format!("no place with id {id}")));
                }
                self.add_mode = false;
                self.selection.select(id, self.store.list());
                let filtered = self.filtered();
                self.views
                    .sync_after_edit(self.store.list(), &filtered, &self.selection, id);
                self.views.open_popup(id);
                // update() returned true, so the record exists.
                self.store
                    .get(id)
                    .cloned()
                    .ok_or_else(|| PinmarkError::InvalidInput(format!("no place with id {id}")))
            }
            None => {
                let place = self.store.add(draft)?;
                self.add_mode = false;
                self.selection.select(&place.id, self.store.list());
                self.resync();
                self.views.focus(&place);
                Ok(place)
            }
        }
    }

    /// Remove a place (confirmation already given by the caller)
    ///
    /// # Returns
    /// Whether a record was removed; an unknown id reports `false`.
    ///
    /// # Errors
    ///
    /// Returns a store error if persisting fails.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let removed = self.store.remove(id)?;
        if removed {
            self.selection.prune(self.store.list());
            self.resync();
        }
        Ok(removed)
    }

    /// Remove every place (confirmation already given by the caller)
    ///
    /// # Errors
    ///
    /// Returns a store error if persisting fails.
    pub fn clear_all(&mut self) -> Result<()> {
        self.store.clear()?;
        self.selection.clear();
        self.resync();
        Ok(())
    }

    /// Export the full canonical collection as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns a codec error if serialization fails.
    pub fn export(&self) -> Result<String> {
        Ok(codec::export_json(self.store.list())?)
    }

    /// Import externally supplied JSON text
    ///
    /// Validation failures leave the store untouched. On success the
    /// accepted records replace or extend the collection per `mode`.
    ///
    /// # Returns
    /// The number of records accepted.
    ///
    /// # Errors
    ///
    /// Returns a codec error for invalid payloads or a store error if
    /// persisting fails.
    pub fn import(&mut self, text: &str, mode: ImportMode) -> Result<usize> {
        let places = codec::import(text)?;
        let count = places.len();
        match mode {
            ImportMode::Replace => self.store.replace_all(places)?,
            ImportMode::Append => self.store.append_all(places)?,
        }
        self.selection.prune(self.store.list());
        self.resync();
        Ok(count)
    }

    /// Toggle or set the add-mode flag
    pub fn set_add_mode(&mut self, on: bool) {
        self.add_mode = on;
    }

    /// Whether add mode is active
    #[must_use]
    pub const fn add_mode(&self) -> bool {
        self.add_mode
    }

    /// A map click: in add mode, yields the coordinates to prefill the
    /// add form with; otherwise ignored
    #[must_use]
    pub fn map_click(&self, lat: f64, lng: f64) -> Option<(f64, f64)> {
        if self.add_mode {
            Some((lat, lng))
        } else {
            None
        }
    }

    /// Re-render all three surfaces from the current snapshot
    fn resync(&mut self) {
        let filtered = self.filtered();
        self.views
            .sync(self.store.list(), &filtered, &self.selection);
    }
}

/// Form-path validation: required title, finite coordinates, limits
fn validate_draft(mut draft: PlaceDraft) -> Result<PlaceDraft> {
    draft.title = draft.title.trim().to_string();
    if draft.title.is_empty() {
        return Err(PinmarkError::InvalidInput("title must not be empty".into()));
    }
    if !draft.lat.is_finite() || !draft.lng.is_finite() {
        return Err(PinmarkError::InvalidInput(
            "coordinates must be finite numbers".into(),
        ));
    }
    draft.title = draft.title.chars().take(TITLE_MAX_LEN).collect();
    draft.note = draft.note.chars().take(NOTE_MAX_LEN).collect();
    draft.url = sanitize(&draft.url);
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::memory_store;
    use crate::view::mock::{MockList, MockMap, MockPreview};
    use crate::view::traits::MapSurface;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Rig {
        session: Session,
        map: Rc<RefCell<MockMap>>,
        list: Rc<RefCell<MockList>>,
        preview: Rc<RefCell<MockPreview>>,
    }

    fn rig() -> Rig {
        let (store, _backend) = memory_store();
        let map = Rc::new(RefCell::new(MockMap::new()));
        let list = Rc::new(RefCell::new(MockList::new()));
        let preview = Rc::new(RefCell::new(MockPreview::new()));
        let views = ViewSynchronizer::new(
            Box::new(Rc::clone(&map)),
            Box::new(Rc::clone(&list)),
            Box::new(Rc::clone(&preview)),
        );
        Rig {
            session: Session::new(store, views),
            map,
            list,
            preview,
        }
    }

    fn draft(title: &str) -> PlaceDraft {
        PlaceDraft::new(title, 51.5, -0.12)
    }

    #[test]
    fn test_submit_add_selects_and_focuses() {
        let mut r = rig();
        let place = r.session.submit(draft("Tower"), None).unwrap();

        assert_eq!(r.session.selected().unwrap().id, place.id);
        assert_eq!(r.map.borrow().markers.len(), 1);
        assert_eq!(r.map.borrow().flights.len(), 1);
        assert!(r.map.borrow().is_popup_open(&place.id));
        assert_eq!(r.preview.borrow().shown.as_ref().unwrap().id, place.id);
    }

    #[test]
    fn test_submit_rejects_empty_title() {
        let mut r = rig();
        let err = r.session.submit(draft("   "), None).unwrap_err();
        assert!(matches!(err, PinmarkError::InvalidInput(_)));
        assert!(r.session.places().is_empty());
    }

    #[test]
    fn test_submit_rejects_non_finite_coords() {
        let mut r = rig();
        let bad = PlaceDraft::new("A", f64::NAN, 0.0);
        assert!(r.session.submit(bad, None).is_err());
    }

    #[test]
    fn test_submit_truncates_and_sanitizes() {
        let mut r = rig();
        let long = draft(&"x".repeat(200)).with_url("not a url").with_note("n".repeat(600));
        let place = r.session.submit(long, None).unwrap();

        assert_eq!(place.title.chars().count(), TITLE_MAX_LEN);
        assert_eq!(place.note.chars().count(), NOTE_MAX_LEN);
        assert_eq!(place.url, "");
    }

    #[test]
    fn test_submit_edit_keeps_open_popup() {
        let mut r = rig();
        let place = r.session.submit(draft("Old name"), None).unwrap();
        let rebuilds_before = r.map.borrow().rebuild_count;

        let mut edit = place.to_draft();
        edit.title = "New name".into();
        edit.lat = 10.0;
        r.session.submit(edit, Some(&place.id)).unwrap();

        let map = r.map.borrow();
        // Popup was open from the add focus, so the edit went in place.
        assert_eq!(map.rebuild_count, rebuilds_before);
        assert!(map.is_popup_open(&place.id));
        assert_eq!(map.marker(&place.id).unwrap().popup.title, "New name");
        assert_eq!(map.marker(&place.id).unwrap().lat, 10.0);
    }

    #[test]
    fn test_submit_edit_unknown_id_errors() {
        let mut r = rig();
        let err = r.session.submit(draft("X"), Some("p_missing")).unwrap_err();
        assert!(matches!(err, PinmarkError::InvalidInput(_)));
    }

    #[test]
    fn test_query_filters_all_surfaces() {
        let mut r = rig();
        r.session.submit(draft("Harbor"), None).unwrap();
        r.session.submit(draft("Bridge"), None).unwrap();

        r.session.set_query("harb");

        assert_eq!(r.map.borrow().markers.len(), 1);
        assert_eq!(r.list.borrow().cards.len(), 1);
        assert_eq!(r.list.borrow().cards[0].title, "Harbor");
    }

    #[test]
    fn test_selection_survives_filter_change() {
        let mut r = rig();
        let harbor = r.session.submit(draft("Harbor"), None).unwrap();
        r.session.submit(draft("Bridge"), None).unwrap();
        r.session.select(&harbor.id);

        r.session.set_query("bridge");

        // Hidden by the filter but still selected and previewed.
        assert_eq!(r.session.selected().unwrap().id, harbor.id);
        assert_eq!(r.preview.borrow().shown.as_ref().unwrap().id, harbor.id);
        assert_eq!(r.map.borrow().markers.len(), 1);
    }

    #[test]
    fn test_remove_selected_hides_preview() {
        let mut r = rig();
        let place = r.session.submit(draft("Doomed"), None).unwrap();
        assert!(r.preview.borrow().shown.is_some());

        assert!(r.session.remove(&place.id).unwrap());

        assert!(r.preview.borrow().shown.is_none());
        assert!(r.map.borrow().markers.is_empty());
        assert!(r.list.borrow().cards.is_empty());
    }

    #[test]
    fn test_remove_unknown_id_reports_false() {
        let mut r = rig();
        r.session.submit(draft("Stays"), None).unwrap();
        assert!(!r.session.remove("p_missing").unwrap());
        assert_eq!(r.session.places().len(), 1);
    }

    #[test]
    fn test_clear_all_resets_everything() {
        let mut r = rig();
        r.session.submit(draft("A"), None).unwrap();
        r.session.submit(draft("B"), None).unwrap();

        r.session.clear_all().unwrap();

        assert!(r.session.places().is_empty());
        assert!(r.session.selected().is_none());
        assert!(r.map.borrow().markers.is_empty());
    }

    #[test]
    fn test_import_failure_leaves_store_untouched() {
        let mut r = rig();
        r.session.submit(draft("Existing"), None).unwrap();

        assert!(r.session.import("[]", ImportMode::Replace).is_err());
        assert!(r.session.import("\"text\"", ImportMode::Replace).is_err());
        assert_eq!(r.session.places().len(), 1);
    }

    #[test]
    fn test_import_replace_and_append() {
        let mut r = rig();
        r.session.submit(draft("Existing"), None).unwrap();

        let payload = r#"[{"title":"Imported","lat":1,"lng":2}]"#;
        assert_eq!(r.session.import(payload, ImportMode::Append).unwrap(), 1);
        assert_eq!(r.session.places().len(), 2);

        assert_eq!(r.session.import(payload, ImportMode::Replace).unwrap(), 1);
        assert_eq!(r.session.places().len(), 1);
        assert_eq!(r.session.places()[0].title, "Imported");
    }

    #[test]
    fn test_import_replace_prunes_stale_selection() {
        let mut r = rig();
        r.session.submit(draft("Selected"), None).unwrap();
        assert!(r.session.selected().is_some());

        r.session
            .import(r#"[{"title":"Other","lat":1,"lng":2}]"#, ImportMode::Replace)
            .unwrap();

        assert!(r.session.selected().is_none());
        assert!(r.preview.borrow().shown.is_none());
    }

    #[test]
    fn test_map_click_only_in_add_mode() {
        let mut r = rig();
        assert_eq!(r.session.map_click(1.0, 2.0), None);

        r.session.set_add_mode(true);
        assert_eq!(r.session.map_click(1.0, 2.0), Some((1.0, 2.0)));
    }

    #[test]
    fn test_submit_leaves_add_mode() {
        let mut r = rig();
        r.session.set_add_mode(true);
        r.session.submit(draft("Placed"), None).unwrap();
        assert!(!r.session.add_mode());
    }

    #[test]
    fn test_start_selects_first_place() {
        let (mut store, backend) = memory_store();
        store.add(draft("First")).unwrap();
        store.add(draft("Second")).unwrap();
        drop(store);

        let store = crate::store::PlaceStore::open(Box::new(backend));
        let map = Rc::new(RefCell::new(MockMap::new()));
        let views = ViewSynchronizer::new(
            Box::new(Rc::clone(&map)),
            Box::new(MockList::new()),
            Box::new(MockPreview::new()),
        );
        let mut session = Session::new(store, views);
        session.start();

        assert_eq!(session.selected().unwrap().title, "First");
        assert_eq!(map.borrow().markers.len(), 2);
    }
}
