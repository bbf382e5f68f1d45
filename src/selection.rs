//! Selection manager - tracks the currently inspected place
//!
//! Holds zero or one selected id, never record data. Selection is
//! independent of filtering: a record hidden by the active query stays
//! selected as long as it exists in the full collection.

use crate::Place;

/// At most one selected place id, a non-owning back-reference into the
/// canonical collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    /// Create an empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: None }
    }

    /// Select the place with the given id
    ///
    /// A no-op if the id is absent from the full collection; absence
    /// from a filtered view does not matter here.
    ///
    /// # Returns
    /// Whether the selection changed to the given id.
    pub fn select(&mut self, id: &str, collection: &[Place]) -> bool {
        if !collection.iter().any(|p| p.id == id) {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Drop the selection if its record no longer exists
    ///
    /// Used after deletes, clear-all and import-with-replace.
    pub fn prune(&mut self, collection: &[Place]) {
        let stale = self
            .selected
            .as_ref()
            .is_some_and(|id| !collection.iter().any(|p| p.id == *id));
        if stale {
            self.selected = None;
        }
    }

    /// The selected id, if any
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Whether the given id is the current selection
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }
}
