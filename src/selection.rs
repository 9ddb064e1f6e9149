#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use serde::{Deserialize, Serialize};

use crate::path::RouteId;

/// Which route is active and which one the pointer is over.
///
/// Drives visual emphasis and the render/interaction z-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_id: Option<RouteId>,
    pub hovered_id: Option<RouteId>,
}

impl SelectionState {
    /// Select `id`. Returns true if the selection changed.
    pub fn select(&mut self, id: RouteId) -> bool {
        let changed = self.selected_id != Some(id);
        self.selected_id = Some(id);
        changed
    }

    /// Clear the selection. Returns true if something was selected.
    pub fn deselect(&mut self) -> bool {
        self.selected_id.take().is_some()
    }

    /// Set the hovered route. Returns true if it changed.
    pub fn hover(&mut self, id: Option<RouteId>) -> bool {
        let changed = self.hovered_id != id;
        self.hovered_id = id;
        changed
    }

    #[must_use]
    pub fn is_selected(&self, id: &RouteId) -> bool {
        self.selected_id.as_ref() == Some(id)
    }

    #[must_use]
    pub fn is_hovered(&self, id: &RouteId) -> bool {
        self.hovered_id.as_ref() == Some(id)
    }

    /// Drop any reference to a route that no longer exists.
    pub fn forget(&mut self, id: &RouteId) {
        if self.is_selected(id) {
            self.selected_id = None;
        }
        if self.is_hovered(id) {
            self.hovered_id = None;
        }
    }
}
