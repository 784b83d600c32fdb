//! Trayecto- und Parada-Editor für das städtische Busnetz.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod io;
pub mod shared;

pub use app::{
    EditorCommand, EditorController, EditorIntent, EditorSession, EditorState, InitialRoute,
    InputMode, RecordingSurfaceHost, RouteObserver, SessionKey, SessionPhase,
};
pub use core::{CoordinateProjector, Edge, EdgeId, MapView, SegmentIndex, StreetNetwork};
pub use io::{parse_route_record, parse_street_network, write_route_record, RouteRecord};
pub use shared::{EditorOptions, RenderScene, RouteSnapshot};
