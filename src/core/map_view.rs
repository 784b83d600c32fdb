//! Kartenansicht (Zentrum + Zoomstufe) über der Projektionsebene.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::projection::{CoordinateProjector, LonLat, HALF_WORLD_EXTENT};

/// Achsparalleles Rechteck in der Projektionsebene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Minimale Ecke
    pub min: DVec2,
    /// Maximale Ecke
    pub max: DVec2,
}

impl Extent {
    /// Umschließendes Rechteck einer Punktmenge; `None` bei leerer Menge.
    pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    /// Mittelpunkt
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Breite und Höhe
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// Prüft, ob der Punkt innerhalb liegt (Rand inklusive).
    pub fn contains(&self, point: DVec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// 2D-Kartenansicht im Stil einer Kachelkarte.
///
/// Serialisiert als `{ "center": [x, y], "zoom": z }` in Projektionseinheiten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// Zentrum in der Projektionsebene
    pub center: DVec2,
    /// Zoomstufe (0 = ganze Welt auf einer 256-px-Kachel)
    pub zoom: f64,
}

impl MapView {
    /// Standard-Zentrum (Stadtzentrum) als `[lon, lat]`.
    pub const DEFAULT_CENTER: LonLat = [-58.1731, -26.1849];
    /// Standard-Zoomstufe beim Öffnen des Editors.
    pub const DEFAULT_ZOOM: f64 = 14.0;
    /// Maximale Zoomstufe beim Einpassen einer Route.
    pub const MAX_FIT_ZOOM: f64 = 16.0;
    /// Kachelgröße in Pixeln.
    pub const TILE_SIZE: f64 = 256.0;
    /// Minimale Zoomstufe.
    pub const ZOOM_MIN: f64 = 0.0;
    /// Maximale Zoomstufe.
    pub const ZOOM_MAX: f64 = 28.0;

    /// Erstellt eine Ansicht auf das geographische Zentrum.
    pub fn centered_on(center: LonLat, zoom: f64) -> Self {
        Self {
            center: CoordinateProjector::project(center).unwrap_or(DVec2::ZERO),
            zoom: zoom.clamp(Self::ZOOM_MIN, Self::ZOOM_MAX),
        }
    }

    /// Projektionseinheiten pro Bildschirmpixel bei dieser Zoomstufe.
    pub fn resolution(&self) -> f64 {
        2.0 * HALF_WORLD_EXTENT / Self::TILE_SIZE / 2f64.powf(self.zoom)
    }

    /// Rechnet einen Pixel-Radius in Projektionseinheiten um.
    pub fn pixels_to_world(&self, pixels: f64) -> f64 {
        pixels * self.resolution()
    }

    /// Konvertiert Screen-Koordinaten (Ursprung oben links) in die Ebene.
    pub fn screen_to_world(&self, screen_pos: DVec2, viewport_px: DVec2) -> DVec2 {
        let offset = screen_pos - viewport_px * 0.5;
        // Screen-Y wächst nach unten, Projektions-Y nach Norden
        self.center + DVec2::new(offset.x, -offset.y) * self.resolution()
    }

    /// Passt Zentrum und Zoom so an, dass `extent` in den Viewport passt.
    ///
    /// Der Zoom wird auf `max_zoom` begrenzt, damit kurze Routen nicht
    /// auf Hausnummern-Niveau landen.
    pub fn fit_extent(extent: Extent, viewport_px: DVec2, max_zoom: f64) -> Self {
        let size = extent.size();
        let viewport = viewport_px.max(DVec2::ONE);
        let needed_resolution = (size.x / viewport.x).max(size.y / viewport.y);

        let zoom = if needed_resolution <= 0.0 {
            max_zoom
        } else {
            (2.0 * HALF_WORLD_EXTENT / Self::TILE_SIZE / needed_resolution)
                .log2()
                .min(max_zoom)
        };

        Self {
            center: extent.center(),
            zoom: zoom.clamp(Self::ZOOM_MIN, Self::ZOOM_MAX),
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::centered_on(Self::DEFAULT_CENTER, Self::DEFAULT_ZOOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_resolution_at_zoom_zero_covers_world_on_one_tile() {
        let view = MapView {
            center: DVec2::ZERO,
            zoom: 0.0,
        };
        assert_relative_eq!(view.resolution(), 156_543.033_928_041, epsilon = 1e-6);
    }

    #[test]
    fn test_resolution_halves_per_zoom_level() {
        let a = MapView {
            center: DVec2::ZERO,
            zoom: 14.0,
        };
        let b = MapView {
            center: DVec2::ZERO,
            zoom: 15.0,
        };
        assert_relative_eq!(a.resolution(), 2.0 * b.resolution());
    }

    #[test]
    fn test_screen_center_maps_to_view_center() {
        let view = MapView::default();
        let viewport = DVec2::new(800.0, 600.0);
        let world = view.screen_to_world(DVec2::new(400.0, 300.0), viewport);
        assert_relative_eq!(world.x, view.center.x);
        assert_relative_eq!(world.y, view.center.y);
    }

    #[test]
    fn test_screen_y_points_south() {
        let view = MapView::default();
        let viewport = DVec2::new(800.0, 600.0);
        let below = view.screen_to_world(DVec2::new(400.0, 400.0), viewport);
        assert!(below.y < view.center.y);
    }

    #[test]
    fn test_fit_extent_caps_zoom() {
        let tiny = Extent {
            min: DVec2::new(0.0, 0.0),
            max: DVec2::new(1.0, 1.0),
        };
        let view = MapView::fit_extent(tiny, DVec2::new(400.0, 300.0), MapView::MAX_FIT_ZOOM);
        assert_relative_eq!(view.zoom, MapView::MAX_FIT_ZOOM);
        assert_eq!(view.center, DVec2::new(0.5, 0.5));
    }

    #[test]
    fn test_fit_extent_makes_extent_visible() {
        let extent = Extent {
            min: DVec2::new(-5_000.0, -2_000.0),
            max: DVec2::new(5_000.0, 2_000.0),
        };
        let viewport = DVec2::new(400.0, 300.0);
        let view = MapView::fit_extent(extent, viewport, MapView::MAX_FIT_ZOOM);
        let visible = viewport * view.resolution();
        assert!(visible.x >= extent.size().x - 1e-6);
        assert!(visible.y >= extent.size().y - 1e-6);
    }

    #[test]
    fn test_view_serializes_center_as_pair() {
        let view = MapView {
            center: DVec2::new(-6_475_000.0, -3_020_000.5),
            zoom: 15.0,
        };

        let value = serde_json::to_value(view).expect("Serialisierung erwartet");
        assert_eq!(value["center"][0], -6_475_000.0);
        assert_eq!(value["zoom"], 15.0);

        let back: MapView = serde_json::from_value(value).expect("Deserialisierung erwartet");
        assert_eq!(back, view);
    }

    #[test]
    fn test_extent_from_points() {
        assert!(Extent::from_points(Vec::new()).is_none());
        let e = Extent::from_points([DVec2::new(3.0, -1.0), DVec2::new(-2.0, 4.0)])
            .expect("Ausdehnung erwartet");
        assert_eq!(e.min, DVec2::new(-2.0, -1.0));
        assert_eq!(e.max, DVec2::new(3.0, 4.0));
        assert!(e.contains(DVec2::new(0.0, 0.0)));
        assert!(!e.contains(DVec2::new(5.0, 0.0)));
    }
}
