//! Außen sichtbare Form einer Route: Trayecto-Ketten und Paradas.

use serde::{Deserialize, Serialize};

use crate::core::LonLat;

/// Koordinatenkette einer Trajektorie (exportiert immer genau zwei Punkte).
pub type Chain = Vec<LonLat>;

/// Persistierte Haltestelle im Wire-Format `{ "coords": [lon, lat] }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopCoords {
    /// Position als `[lon, lat]`
    pub coords: LonLat,
}

impl From<LonLat> for StopCoords {
    fn from(coords: LonLat) -> Self {
        Self { coords }
    }
}

/// Das Paar (Trajektorie, Haltestellen), das bei jeder Änderung an den
/// Aufrufer gemeldet wird.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSnapshot {
    /// Eine Zwei-Punkt-Kette pro selektierter Kante, in Selektionsreihenfolge
    pub trajectory: Vec<Chain>,
    /// Haltestellen in Einfügereihenfolge
    pub stops: Vec<StopCoords>,
}

impl RouteSnapshot {
    /// Leerer Zustand (z.B. wenn die Session nie aktiv wurde).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Gibt `true` zurück, wenn weder Kanten noch Haltestellen enthalten sind.
    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty() && self.stops.is_empty()
    }
}
