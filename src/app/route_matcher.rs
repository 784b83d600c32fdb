//! Rückabgleich gespeicherter Trajektorien auf einen frisch gebauten Kantenindex.
//!
//! Gespeicherte Ketten tragen keine Kanten-IDs mehr. Jede Zwei-Punkt-Kette
//! wird gegen alle Kanten geprüft; jede Kante, deren Endpunkte in beliebiger
//! Orientierung passen, wird selektiert. Ketten mit mehr als zwei Punkten
//! und Ketten ohne Treffer gehen verloren.

use glam::DVec2;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::{CoordinateProjector, Edge, EdgeId, SegmentIndex};
use crate::shared::{Chain, MATCH_TOLERANCE};

/// Vergleichsstrategie für Endpunkte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Beide Koordinaten, euklidischer Abstand ≤ Toleranz
    #[default]
    Endpoints,
    /// Nur die x-Achse, strikt `< Toleranz` (Verhalten des Altsystems)
    LegacyXAxis,
}

/// Parameter des Abgleichs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// Toleranz in Projektionseinheiten
    pub tolerance: f64,
    /// Vergleichsstrategie
    pub strategy: MatchStrategy,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            tolerance: MATCH_TOLERANCE,
            strategy: MatchStrategy::Endpoints,
        }
    }
}

/// Ergebnis eines Abgleichs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMatch {
    /// Rekonstruierte Auswahl (Reihenfolge der gespeicherten Ketten)
    pub edge_ids: IndexSet<EdgeId>,
    /// Ketten mit mindestens einem Treffer
    pub matched_chains: usize,
    /// Verworfene Ketten (falsche Länge, ungültig oder ohne Treffer)
    pub dropped_chains: usize,
}

impl MatchOptions {
    fn points_match(&self, a: DVec2, b: DVec2) -> bool {
        match self.strategy {
            MatchStrategy::Endpoints => a.distance_squared(b) <= self.tolerance * self.tolerance,
            MatchStrategy::LegacyXAxis => (a.x - b.x).abs() < self.tolerance,
        }
    }

    fn edge_matches(&self, edge: &Edge, first: DVec2, second: DVec2) -> bool {
        (self.points_match(edge.start, first) && self.points_match(edge.end, second))
            || (self.points_match(edge.end, first) && self.points_match(edge.start, second))
    }
}

/// Rekonstruiert die Kantenauswahl aus gespeicherten Ketten.
///
/// Aufwand O(Ketten × Kanten); einmal pro Session-Erstellung bzw. Resync.
pub fn reconstruct(index: &SegmentIndex, chains: &[Chain], options: &MatchOptions) -> RouteMatch {
    let mut result = RouteMatch::default();

    for (chain_no, chain) in chains.iter().enumerate() {
        let [first, second] = chain.as_slice() else {
            log::debug!(
                "Kette {} mit {} Punkten verworfen (nur Zwei-Punkt-Ketten abgleichbar)",
                chain_no,
                chain.len()
            );
            result.dropped_chains += 1;
            continue;
        };
        let (Some(first), Some(second)) = (
            CoordinateProjector::project(*first),
            CoordinateProjector::project(*second),
        ) else {
            log::debug!("Kette {} mit ungültigen Koordinaten verworfen", chain_no);
            result.dropped_chains += 1;
            continue;
        };

        let mut hits = 0usize;
        for edge in index.iter() {
            if options.edge_matches(edge, first, second) {
                result.edge_ids.insert(edge.id);
                hits += 1;
            }
        }

        if hits == 0 {
            log::debug!("Kette {} ohne passende Kante verworfen", chain_no);
            result.dropped_chains += 1;
        } else {
            result.matched_chains += 1;
        }
    }

    if result.dropped_chains > 0 {
        log::info!(
            "Rückabgleich: {} von {} Ketten ohne Kante",
            result.dropped_chains,
            chains.len()
        );
    }

    result
}
