//! Integration tests for pinmark
//!
//! These tests verify end-to-end functionality: a session over a real
//! sled-backed store, with the recording mock surfaces standing in for
//! the map, list and preview frontends.

use pinmark::codec::ImportMode;
use pinmark::session::Session;
use pinmark::store::{PlaceStore, SledBackend};
use pinmark::view::mock::{MockList, MockMap, MockPreview};
use pinmark::view::{MapSurface, ViewSynchronizer};
use pinmark::PlaceDraft;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

struct Surfaces {
    map: Rc<RefCell<MockMap>>,
    list: Rc<RefCell<MockList>>,
    preview: Rc<RefCell<MockPreview>>,
}

/// Open a session on a sled database at the given path, with mock
/// surfaces whose handles are returned for inspection
fn open_session(db_path: &Path) -> (Session, Surfaces) {
    let backend = SledBackend::open(db_path).unwrap();
    let store = PlaceStore::open(Box::new(backend));

    let map = Rc::new(RefCell::new(MockMap::new()));
    let list = Rc::new(RefCell::new(MockList::new()));
    let preview = Rc::new(RefCell::new(MockPreview::new()));
    let views = ViewSynchronizer::new(
        Box::new(Rc::clone(&map)),
        Box::new(Rc::clone(&list)),
        Box::new(Rc::clone(&preview)),
    );

    (Session::new(store, views), Surfaces { map, list, preview })
}

#[test]
fn test_add_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("db");

    let id = {
        let (mut session, _surfaces) = open_session(&db_path);
        let place = session
            .submit(
                PlaceDraft::new("Lighthouse", 57.7, 11.9).with_note("red roof"),
                None,
            )
            .unwrap();
        place.id
    };

    let (mut session, surfaces) = open_session(&db_path);
    session.start();

    assert_eq!(session.places().len(), 1);
    assert_eq!(session.places()[0].id, id);
    assert_eq!(session.places()[0].note, "red roof");
    assert_eq!(surfaces.map.borrow().markers.len(), 1);
    assert_eq!(surfaces.list.borrow().cards.len(), 1);
    // start() selects the first place and previews it.
    assert_eq!(surfaces.preview.borrow().shown.as_ref().unwrap().id, id);
}

#[test]
fn test_surfaces_stay_consistent_through_a_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, surfaces) = open_session(&dir.path().join("db"));

    let harbor = session
        .submit(PlaceDraft::new("Harbor", 59.91, 10.75), None)
        .unwrap();
    let bridge = session
        .submit(PlaceDraft::new("Bridge", 48.2, 16.37).with_note("stone arches"), None)
        .unwrap();

    // Both records on all surfaces, newest first in the list.
    assert_eq!(surfaces.map.borrow().markers.len(), 2);
    assert_eq!(surfaces.list.borrow().cards.len(), 2);

    // Filter down to one; the other's marker and card disappear.
    session.set_query("harbor");
    assert_eq!(surfaces.map.borrow().markers.len(), 1);
    assert_eq!(surfaces.map.borrow().markers[0].id, harbor.id);
    assert_eq!(surfaces.list.borrow().card_ids(), vec![harbor.id.as_str()]);

    // Selecting the filtered-out record still works and previews it.
    session.set_query("");
    session.select(&bridge.id);
    session.set_query("harbor");
    assert_eq!(
        surfaces.preview.borrow().shown.as_ref().unwrap().id,
        bridge.id
    );

    // Deleting the selected record hides the preview everywhere.
    session.set_query("");
    session.remove(&bridge.id).unwrap();
    assert!(surfaces.preview.borrow().shown.is_none());
    assert_eq!(surfaces.map.borrow().markers.len(), 1);
    assert_eq!(surfaces.list.borrow().highlighted, None);
}

#[test]
fn test_edit_in_place_preserves_open_popup() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, surfaces) = open_session(&dir.path().join("db"));

    let place = session
        .submit(PlaceDraft::new("Before", 1.0, 2.0), None)
        .unwrap();
    // The add focused the new place, so its popup is open.
    assert!(surfaces.map.borrow().is_popup_open(&place.id));
    let rebuilds = surfaces.map.borrow().rebuild_count;

    let mut edit = place.to_draft();
    edit.title = "After".into();
    edit.lng = 3.0;
    session.submit(edit, Some(&place.id)).unwrap();

    let map = surfaces.map.borrow();
    assert_eq!(map.rebuild_count, rebuilds);
    assert!(map.is_popup_open(&place.id));
    assert_eq!(map.marker(&place.id).unwrap().popup.title, "After");
    assert_eq!(map.marker(&place.id).unwrap().lng, 3.0);
    drop(map);

    // The edit also persisted. The session must be gone before the
    // database can be opened again.
    drop(session);
    let reopened = PlaceStore::open(Box::new(
        SledBackend::open(dir.path().join("db")).unwrap(),
    ));
    assert_eq!(reopened.get(&place.id).unwrap().title, "After");
    assert!(reopened.get(&place.id).unwrap().updated_at.is_some());
}

#[test]
fn test_export_import_replace_reproduces_collection() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, _surfaces) = open_session(&dir.path().join("db"));

    session
        .submit(
            PlaceDraft::new("Harbor", 59.91, 10.75)
                .with_url("https://example.com/harbor")
                .with_open_new_tab(false),
            None,
        )
        .unwrap();
    session
        .submit(PlaceDraft::new("Bridge", 48.2, 16.37), None)
        .unwrap();

    let exported = session.export().unwrap();
    let snapshot = session.places().to_vec();

    let accepted = session.import(&exported, ImportMode::Replace).unwrap();
    assert_eq!(accepted, 2);
    assert_eq!(session.places(), snapshot.as_slice());
}

#[test]
fn test_import_append_and_validation_failure() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, _surfaces) = open_session(&dir.path().join("db"));

    session
        .submit(PlaceDraft::new("Existing", 1.0, 2.0), None)
        .unwrap();

    // A failing import leaves the store untouched.
    assert!(session.import("not json at all", ImportMode::Append).is_err());
    assert!(session.import("[]", ImportMode::Append).is_err());
    assert_eq!(session.places().len(), 1);

    // A mixed payload keeps only the valid elements.
    let payload = r#"[
        {"title":"Good","lat":10,"lng":20},
        {"title":"","lat":10,"lng":20},
        {"title":"Bad coords","lat":"x","lng":20}
    ]"#;
    assert_eq!(session.import(payload, ImportMode::Append).unwrap(), 1);
    assert_eq!(session.places().len(), 2);
    assert_eq!(session.places()[1].title, "Good");
}

#[test]
fn test_clear_all_persists_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("db");

    {
        let (mut session, _surfaces) = open_session(&db_path);
        session.submit(PlaceDraft::new("A", 1.0, 2.0), None).unwrap();
        session.submit(PlaceDraft::new("B", 3.0, 4.0), None).unwrap();
        session.clear_all().unwrap();
    }

    let (session, _surfaces) = open_session(&db_path);
    assert!(session.places().is_empty());
}
