use std::sync::Arc;

use glam::DVec2;

use crate::app::{InitialRoute, InputMode, SessionKey, SubscriptionId};
use crate::core::{EdgeId, MapView, StreetNetwork};

/// Editor-Intents.
/// Intents sind Eingaben aus Host/Oberfläche ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum EditorIntent {
    /// Editor für einen Key öffnen (oder Initialdaten unter gleichem Key neu setzen)
    OpenEditorRequested {
        key: SessionKey,
        /// `None`, wenn das Straßennetz nicht geladen werden konnte
        streets: Option<Arc<StreetNetwork>>,
        initial: Option<InitialRoute>,
    },
    /// Gespeicherte Daten haben sich unter gleichem Key geändert
    InitialRouteChanged { initial: InitialRoute },
    /// Eingabemodus wurde umgeschaltet
    InputModeChanged { mode: InputMode },
    /// Editor schließen
    CloseRequested,
    /// Kantenauswahl verwerfen
    ClearSelectionRequested,
    /// Kartenansicht wurde verschoben oder gezoomt
    ViewChanged { view: MapView },
    /// Klick auf die Kartenoberfläche
    SurfaceClicked {
        subscription: SubscriptionId,
        world_pos: DVec2,
        hit_edge: Option<EdgeId>,
    },
}
