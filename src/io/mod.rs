//! JSON-Grenze: Straßennetz lesen, Linien-Datensätze lesen und schreiben.

pub mod route_record;
pub mod streets;

pub use route_record::{
    load_route_record, parse_route_record, save_route_record, write_route_record, RouteRecord,
};
pub use streets::{load_street_network, parse_street_network};
