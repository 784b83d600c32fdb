//! Read-only Übersicht einer gespeicherten Linie (ohne Session, ohne Index).
//!
//! Ketten beliebiger Länge werden unverändert gezeichnet; die Ansicht wird
//! auf die Ausdehnung des Trayecto eingepasst.

use glam::DVec2;

use crate::core::{CoordinateProjector, Extent, MapView};
use crate::io::RouteRecord;
use crate::shared::EditorOptions;

/// Vorbereitete Zeichendaten einer gespeicherten Linie.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOverview {
    /// Projizierte Ketten (ungültige Punkte entfernt, Ketten < 2 Punkte verworfen)
    pub chains: Vec<Vec<DVec2>>,
    /// Projizierte Haltestellen
    pub stops: Vec<DVec2>,
    /// Eingepasste Ansicht (Standardansicht ohne Trayecto)
    pub view: MapView,
}

impl RouteOverview {
    /// Bereitet die Übersicht für einen Viewport der Größe `viewport_px` vor.
    pub fn build(record: &RouteRecord, viewport_px: DVec2, options: &EditorOptions) -> Self {
        let chains: Vec<Vec<DVec2>> = record
            .trajectory
            .iter()
            .map(|chain| {
                chain
                    .iter()
                    .filter_map(|coords| CoordinateProjector::project(*coords))
                    .collect::<Vec<_>>()
            })
            .filter(|chain| chain.len() >= 2)
            .collect();

        let stops = record
            .stops
            .iter()
            .filter_map(|stop| CoordinateProjector::project(stop.coords))
            .collect();

        let view = Extent::from_points(chains.iter().flatten().copied())
            .map(|extent| MapView::fit_extent(extent, viewport_px, options.max_fit_zoom))
            .unwrap_or_else(|| options.initial_view());

        Self {
            chains,
            stops,
            view,
        }
    }

    /// Gibt `true` zurück, wenn nichts zu zeichnen ist.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty() && self.stops.is_empty()
    }
}
