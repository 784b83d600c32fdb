//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `app`, Kartenoberfläche und `io` geteilt
//! werden, um direkte Abhängigkeiten zu vermeiden.

pub mod options;
mod render_scene;
mod route;

pub use options::EditorOptions;
pub use options::{MATCH_TOLERANCE, STOP_SNAP_THRESHOLD};
pub use render_scene::{edge_style, EdgeStyle, RenderScene, StopStyle};
pub use route::{Chain, RouteSnapshot, StopCoords};
