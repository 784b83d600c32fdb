//! Handler für die Kartenansicht.

use crate::app::EditorState;
use crate::core::MapView;

/// Übernimmt eine neue Kartenansicht in State und Session.
pub fn set_view(state: &mut EditorState, view: MapView) {
    state.view = view;
    if let Some(session) = state.session.as_mut() {
        session.set_view(view);
    }
}
