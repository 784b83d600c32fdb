use std::sync::Arc;

use glam::DVec2;

use crate::app::{InitialRoute, InputMode, SessionKey};
use crate::core::{EdgeId, MapView, StreetNetwork};

/// Editor-Commands (mutierende Schritte).
#[derive(Debug, Clone)]
pub enum EditorCommand {
    /// Neue Session erstellen und aktivieren
    CreateSession {
        key: SessionKey,
        streets: Option<Arc<StreetNetwork>>,
        initial: Option<InitialRoute>,
    },
    /// Aktuelle Session abbauen (No-op ohne Session)
    DestroySession,
    /// Selektion und Haltestellen unter gleichem Key neu belegen
    ResyncInitialRoute { initial: InitialRoute },
    /// Eingabemodus setzen
    SetInputMode { mode: InputMode },
    /// Kantenauswahl verwerfen
    ClearSelection,
    /// Kartenansicht setzen
    SetView { view: MapView },
    /// Bekannte Kante umschalten
    ToggleEdge { edge_id: EdgeId },
    /// Nächste Kante zum Klickpunkt suchen und umschalten
    PickAndToggleEdge { world_pos: DVec2, max_distance: f64 },
    /// Haltestelle auf die nächste selektierte Kante setzen
    PlaceStop { world_pos: DVec2, threshold: f64 },
}
