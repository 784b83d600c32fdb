//! Umrechnung zwischen geographischen Koordinaten und der Projektionsebene.
//!
//! Die Projektionsebene ist Web Mercator (EPSG:3857). Alle Distanzen,
//! Toleranzen und Snap-Schwellen des Editors werden in deren Einheiten
//! angegeben (Meter am Äquator).

use glam::DVec2;

/// Geographische Koordinate als `[Längengrad, Breitengrad]`.
pub type LonLat = [f64; 2];

/// Radius der Web-Mercator-Kugel in Metern.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Maximaler Breitengrad, den Web Mercator abbilden kann.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Halbe Ausdehnung der Projektionsebene (x bei Längengrad 180°).
pub const HALF_WORLD_EXTENT: f64 = std::f64::consts::PI * EARTH_RADIUS;

/// Zustandslose Umrechnung WGS84 ↔ Web Mercator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateProjector;

impl CoordinateProjector {
    /// Projiziert `[lon, lat]` in die Ebene.
    ///
    /// Gibt `None` zurück, wenn eine der Komponenten nicht endlich ist.
    pub fn project(lon_lat: LonLat) -> Option<DVec2> {
        let [lon, lat] = lon_lat;
        if !lon.is_finite() || !lat.is_finite() {
            return None;
        }

        let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let x = EARTH_RADIUS * lon.to_radians();
        let y = EARTH_RADIUS * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();

        Some(DVec2::new(x, y))
    }

    /// Rechnet einen Punkt der Ebene zurück in `[lon, lat]`.
    pub fn unproject(point: DVec2) -> LonLat {
        let lon = (point.x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (point.y / EARTH_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2)
            .to_degrees();
        [lon, lat]
    }

    /// Projiziert eine ganze Kette; `None` sobald ein Punkt ungültig ist.
    pub fn project_all(points: &[LonLat]) -> Option<Vec<DVec2>> {
        points.iter().map(|p| Self::project(*p)).collect()
    }
}
