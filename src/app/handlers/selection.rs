//! Handler für die Kantenauswahl.

use glam::DVec2;

use crate::app::EditorState;
use crate::core::EdgeId;

/// Schaltet eine von der Oberfläche getroffene Kante um.
pub fn toggle_edge(state: &mut EditorState, edge_id: EdgeId) {
    if let Some(session) = state.session.as_mut() {
        session.toggle_edge(edge_id, state.observer.as_mut());
    }
}

/// Sucht die nächste Kante zum Klickpunkt und schaltet sie um.
pub fn pick_and_toggle(state: &mut EditorState, world_pos: DVec2, max_distance: f64) {
    if let Some(session) = state.session.as_mut() {
        if !session.pick_and_toggle(world_pos, max_distance, state.observer.as_mut()) {
            log::debug!("Keine Kante innerhalb von {:.1} am Klickpunkt", max_distance);
        }
    }
}

/// Verwirft die komplette Kantenauswahl.
pub fn clear(state: &mut EditorState) {
    if let Some(session) = state.session.as_mut() {
        session.clear_selection(state.observer.as_mut());
    }
}
