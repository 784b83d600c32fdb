//! Application-Layer: Session, Selektion, Abgleich, Controller und Events.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod overview;
pub mod route_matcher;
pub mod selection;
/// Bearbeitungssession mit Lebenszyklus Uninitialized → Active → Destroyed
pub mod session;
/// Zustand eines Bildschirm-Hosts
pub mod state;
pub mod stop_placer;
pub mod surface;

pub use command_log::CommandLog;
pub use controller::EditorController;
pub use events::{EditorCommand, EditorIntent};
pub use overview::RouteOverview;
pub use route_matcher::{reconstruct, MatchOptions, MatchStrategy, RouteMatch};
pub use selection::{SelectionController, SelectionSet};
pub use session::{EditorSession, InitialRoute, RouteObserver, SessionKey, SessionPhase};
pub use state::EditorState;
pub use stop_placer::{Stop, StopPlacement};
pub use surface::{
    InputChannel, InputMode, MapSurface, PresentedFrame, RecordingSurface, RecordingSurfaceHost,
    SubscriptionId, SurfaceEvent, SurfaceHost, SurfaceJournal,
};
