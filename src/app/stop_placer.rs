//! Haltestellen-Platzierung: Klickpunkt auf die nächste selektierte Kante projizieren.

use glam::DVec2;
use indexmap::IndexSet;

use crate::core::{CoordinateProjector, EdgeId, SegmentIndex};
use crate::shared::StopCoords;

/// Eine Haltestelle, immer auf einer selektierten Kante gelegen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stop {
    /// Position in der Projektionsebene
    pub position: DVec2,
}

impl Stop {
    /// Geographische Ausgabeform `{ coords: [lon, lat] }`.
    pub fn to_coords(&self) -> StopCoords {
        StopCoords::from(CoordinateProjector::unproject(self.position))
    }
}

/// Ergebnis einer erfolgreichen Platzierung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopPlacement {
    /// Die neue Haltestelle
    pub stop: Stop,
    /// Kante, auf die projiziert wurde
    pub edge_id: EdgeId,
    /// Abstand Klick → Haltestelle
    pub distance: f64,
}

/// Sucht den nächsten Punkt auf einer selektierten Kante.
///
/// Liefert `None`, wenn keine selektierte Kante strikt näher als `threshold`
/// liegt. Bei gleichem Abstand gewinnt die früher selektierte Kante.
pub fn place(
    point: DVec2,
    selection: &IndexSet<EdgeId>,
    index: &SegmentIndex,
    threshold: f64,
) -> Option<StopPlacement> {
    let mut best: Option<StopPlacement> = None;
    let mut min_distance = threshold;

    for edge in selection.iter().filter_map(|id| index.get(*id)) {
        let closest = edge.closest_point(point);
        let distance = closest.distance(point);
        if distance < min_distance {
            min_distance = distance;
            best = Some(StopPlacement {
                stop: Stop { position: closest },
                edge_id: edge.id,
                distance,
            });
        }
    }

    if best.is_none() {
        log::debug!(
            "Keine selektierte Kante näher als {:.1} am Klickpunkt",
            threshold
        );
    }
    best
}
