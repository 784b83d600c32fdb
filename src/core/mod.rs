//! Core-Domänentypen: Projektion, Straßennetz, Kanten, Kantenindex, Kartenansicht.

pub mod edge;
pub mod map_view;
pub mod projection;
pub mod segment_index;
pub mod street;

pub use edge::{closest_point_on_segment, Edge, EdgeId};
pub use map_view::{Extent, MapView};
pub use projection::{CoordinateProjector, LonLat};
pub use segment_index::{EdgeHit, SegmentIndex};
pub use street::{StreetAttributes, StreetFeature, StreetNetwork};
