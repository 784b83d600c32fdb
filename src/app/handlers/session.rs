//! Handler für den Session-Lebenszyklus.

use std::sync::Arc;

use crate::app::{EditorSession, EditorState, InitialRoute, InputMode, SessionKey};
use crate::core::StreetNetwork;

/// Erstellt und aktiviert eine neue Session.
///
/// Eine noch vorhandene Session wird vorher synchron abgebaut. Schlägt die
/// Aktivierung fehl, bleibt die Session `Uninitialized` im Slot; der
/// Aufrufer hat bereits einen leeren Snapshot erhalten.
pub fn create(
    state: &mut EditorState,
    key: SessionKey,
    streets: Option<Arc<StreetNetwork>>,
    initial: Option<InitialRoute>,
) {
    destroy(state);

    let mut session = EditorSession::new(key, state.options.clone(), state.view, state.input_mode);
    if let Err(e) = session.activate(
        streets.as_deref(),
        initial.as_ref(),
        state.surface_host.as_mut(),
        state.observer.as_mut(),
    ) {
        log::warn!("Editor für {} zeigt leeren Zustand: {:#}", key, e);
    }
    state.session = Some(session);
}

/// Baut die aktuelle Session ab (No-op ohne Session).
pub fn destroy(state: &mut EditorState) {
    if let Some(mut session) = state.session.take() {
        session.destroy();
    }
}

/// Belegt die aktive Session unter gleichem Key neu.
pub fn resync(state: &mut EditorState, initial: &InitialRoute) {
    match state.session.as_mut() {
        Some(session) => {
            session.resync(initial);
        }
        None => log::debug!("Resync ohne Session ignoriert"),
    }
}

/// Setzt den Eingabemodus (auch für künftige Sessions).
pub fn set_input_mode(state: &mut EditorState, mode: InputMode) {
    state.input_mode = mode;
    if let Some(session) = state.session.as_mut() {
        session.set_mode(mode);
    }
}
