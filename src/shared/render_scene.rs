//! Render-Szene als expliziter Übergabevertrag zwischen Session und Kartenoberfläche.
//!
//! Die Oberfläche speichert keinen Selektionszustand pro Feature: der Stil
//! jeder Kante wird bei jedem Rendern aus dem Selektions-Snapshot abgeleitet.

use std::sync::Arc;

use glam::DVec2;
use indexmap::IndexSet;

use super::options::EditorOptions;
use crate::app::InputMode;
use crate::core::{Edge, EdgeId, MapView, SegmentIndex};

/// Linienstil einer Kante.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    /// Linienfarbe (RGBA)
    pub color: [f32; 4],
    /// Linienbreite in Pixeln
    pub width: f32,
}

/// Markerstil einer Haltestelle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopStyle {
    /// Füllfarbe (RGBA)
    pub fill: [f32; 4],
    /// Randfarbe (RGBA)
    pub outline: [f32; 4],
    /// Radius in Pixeln
    pub radius: f32,
    /// Randbreite in Pixeln
    pub outline_width: f32,
}

/// Stil einer Kante, ausschließlich aus der Selektionszugehörigkeit abgeleitet.
pub fn edge_style(
    edge_id: EdgeId,
    selected: &IndexSet<EdgeId>,
    options: &EditorOptions,
) -> EdgeStyle {
    if selected.contains(&edge_id) {
        EdgeStyle {
            color: options.edge_color_selected,
            width: options.edge_width_selected,
        }
    } else {
        EdgeStyle {
            color: options.edge_color_default,
            width: options.edge_width_default,
        }
    }
}

/// Read-only Daten für einen Render-Durchlauf.
#[derive(Clone)]
pub struct RenderScene {
    /// Kantenindex der Session
    pub index: Arc<SegmentIndex>,
    /// Selektierte Kanten (Arc für O(1)-Clone pro Frame)
    pub selected_edge_ids: Arc<IndexSet<EdgeId>>,
    /// Haltestellen in der Projektionsebene
    pub stops: Arc<Vec<DVec2>>,
    /// Aktueller Eingabemodus
    pub input_mode: InputMode,
    /// Kartenansicht
    pub view: MapView,
    /// Laufzeit-Optionen für Farben und Breiten
    pub options: EditorOptions,
}

impl RenderScene {
    /// Alle Kanten mit ihrem aktuell gültigen Stil.
    pub fn styled_edges(&self) -> impl Iterator<Item = (&Edge, EdgeStyle)> + '_ {
        self.index
            .iter()
            .map(|edge| (edge, edge_style(edge.id, &self.selected_edge_ids, &self.options)))
    }

    /// Einheitlicher Stil aller Haltestellen.
    pub fn stop_style(&self) -> StopStyle {
        StopStyle {
            fill: self.options.stop_fill_color,
            outline: self.options.stop_outline_color,
            radius: self.options.stop_radius_px,
            outline_width: self.options.stop_outline_width_px,
        }
    }
}
