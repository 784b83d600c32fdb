//! Handler für die Haltestellen-Platzierung.

use glam::DVec2;

use crate::app::EditorState;

/// Setzt eine Haltestelle auf die nächste selektierte Kante.
pub fn place(state: &mut EditorState, world_pos: DVec2, threshold: f64) {
    let Some(session) = state.session.as_mut() else {
        return;
    };
    if let Some(placement) = session.place_stop(world_pos, threshold, state.observer.as_mut()) {
        log::debug!(
            "Haltestelle auf Kante {} gesetzt (Abstand {:.1})",
            placement.edge_id,
            placement.distance
        );
    }
}
