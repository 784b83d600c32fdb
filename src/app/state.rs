//! Editor-State: zentrale Datenhaltung eines Bildschirm-Hosts.

use super::session::{EditorSession, RouteObserver, SessionPhase};
use super::surface::{InputMode, SurfaceHost};
use super::CommandLog;
use crate::core::MapView;
use crate::shared::{EditorOptions, RouteSnapshot};

/// Hauptzustand des Editors.
///
/// Pro Host gibt es höchstens eine Session; eine neue ersetzt die alte erst,
/// nachdem diese abgebaut wurde.
pub struct EditorState {
    /// Aktuelle Session (None = Editor geschlossen)
    pub session: Option<EditorSession>,
    /// Host, auf dem Kartenoberflächen gemountet werden
    pub surface_host: Box<dyn SurfaceHost>,
    /// Empfänger der Routen-Ausgabe
    pub observer: Box<dyn RouteObserver>,
    /// Laufzeit-Optionen (Farben, Schwellen, Toleranzen)
    pub options: EditorOptions,
    /// Aktuelle Kartenansicht
    pub view: MapView,
    /// Vom Aufrufer gewählter Eingabemodus (überlebt Session-Wechsel)
    pub input_mode: InputMode,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
}

impl EditorState {
    /// Erstellt einen State ohne Session mit Standard-Optionen.
    pub fn new(surface_host: Box<dyn SurfaceHost>, observer: Box<dyn RouteObserver>) -> Self {
        Self::with_options(surface_host, observer, EditorOptions::default())
    }

    /// Erstellt einen State ohne Session mit den übergebenen Optionen.
    pub fn with_options(
        surface_host: Box<dyn SurfaceHost>,
        observer: Box<dyn RouteObserver>,
        options: EditorOptions,
    ) -> Self {
        Self {
            session: None,
            surface_host,
            observer,
            view: options.initial_view(),
            options,
            input_mode: InputMode::default(),
            command_log: CommandLog::new(),
        }
    }

    /// Phase der aktuellen Session (None = keine Session)
    pub fn session_phase(&self) -> Option<SessionPhase> {
        self.session.as_ref().map(EditorSession::phase)
    }

    /// Aktuelle Ausgabe; leer ohne aktive Session.
    pub fn snapshot(&self) -> RouteSnapshot {
        self.session
            .as_ref()
            .map_or_else(RouteSnapshot::empty, EditorSession::snapshot)
    }
}
