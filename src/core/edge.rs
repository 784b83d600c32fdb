//! Atomare Straßenkante zwischen zwei benachbarten Stützpunkten.

use glam::DVec2;

use super::projection::{CoordinateProjector, LonLat};
use super::street::StreetAttributes;

/// ID einer Kante, nur innerhalb eines `SegmentIndex`-Builds gültig.
pub type EdgeId = u64;

/// Eine Kante in der Projektionsebene.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Build-lokale ID (ab 1 fortlaufend)
    pub id: EdgeId,
    /// Erster Endpunkt (projiziert)
    pub start: DVec2,
    /// Zweiter Endpunkt (projiziert)
    pub end: DVec2,
    /// Attribute des Quell-Straßenzugs
    pub attributes: StreetAttributes,
}

impl Edge {
    /// Mittelpunkt der Kante
    pub fn midpoint(&self) -> DVec2 {
        (self.start + self.end) * 0.5
    }

    /// Länge der Kante in Projektionseinheiten
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Nächster Punkt auf der Strecke (nicht der unendlichen Geraden).
    pub fn closest_point(&self, point: DVec2) -> DVec2 {
        closest_point_on_segment(point, self.start, self.end)
    }

    /// Abstand des Punkts zur Strecke.
    pub fn distance_to(&self, point: DVec2) -> f64 {
        self.closest_point(point).distance(point)
    }

    /// Endpunkte als geographische Zwei-Punkt-Kette.
    pub fn to_chain(&self) -> [LonLat; 2] {
        [
            CoordinateProjector::unproject(self.start),
            CoordinateProjector::unproject(self.end),
        ]
    }
}

/// Projiziert `point` auf die Strecke `a`–`b`, begrenzt auf deren Ausdehnung.
///
/// Degenerierte Strecken (`a == b`) liefern `a`.
pub fn closest_point_on_segment(point: DVec2, a: DVec2, b: DVec2) -> DVec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return a;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}
