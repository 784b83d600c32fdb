//! Zentrale Konfiguration für den Trayecto-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::app::route_matcher::{MatchOptions, MatchStrategy};
use crate::core::{LonLat, MapView};

// ── Kanten-Darstellung ─────────────────────────────────────────────

/// Farbe nicht selektierter Kanten (RGBA: #38bdf8).
pub const EDGE_COLOR_DEFAULT: [f32; 4] = [0.220, 0.741, 0.973, 1.0];
/// Linienbreite nicht selektierter Kanten in Pixeln.
pub const EDGE_WIDTH_DEFAULT: f32 = 4.0;
/// Farbe selektierter Kanten (RGBA: #1976d2).
pub const EDGE_COLOR_SELECTED: [f32; 4] = [0.098, 0.463, 0.824, 1.0];
/// Linienbreite selektierter Kanten in Pixeln.
pub const EDGE_WIDTH_SELECTED: f32 = 7.0;

// ── Haltestellen-Darstellung ───────────────────────────────────────

/// Füllfarbe der Haltestellen (RGBA: #FFD600).
pub const STOP_FILL_COLOR: [f32; 4] = [1.0, 0.839, 0.0, 1.0];
/// Randfarbe der Haltestellen (RGBA: #FF4081).
pub const STOP_OUTLINE_COLOR: [f32; 4] = [1.0, 0.251, 0.506, 1.0];
/// Radius der Haltestellen-Marker in Pixeln.
pub const STOP_RADIUS_PX: f32 = 7.0;
/// Randbreite der Haltestellen-Marker in Pixeln.
pub const STOP_OUTLINE_WIDTH_PX: f32 = 2.0;

// ── Interaktion ────────────────────────────────────────────────────

/// Snap-Schwelle für Haltestellen (Projektionseinheiten).
pub const STOP_SNAP_THRESHOLD: f64 = 32.0;
/// Klick-Radius für die Kantenauswahl in Screen-Pixeln.
pub const EDGE_PICK_RADIUS_PX: f64 = 6.0;
/// Toleranz beim Rückabgleich gespeicherter Ketten (Projektionseinheiten).
pub const MATCH_TOLERANCE: f64 = 1.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `bus_route_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Kanten ──────────────────────────────────────────────────
    /// Farbe nicht selektierter Kanten
    pub edge_color_default: [f32; 4],
    /// Breite nicht selektierter Kanten
    pub edge_width_default: f32,
    /// Farbe selektierter Kanten
    pub edge_color_selected: [f32; 4],
    /// Breite selektierter Kanten
    pub edge_width_selected: f32,

    // ── Haltestellen ────────────────────────────────────────────
    /// Füllfarbe der Haltestellen
    pub stop_fill_color: [f32; 4],
    /// Randfarbe der Haltestellen
    pub stop_outline_color: [f32; 4],
    /// Marker-Radius in Pixeln
    pub stop_radius_px: f32,
    /// Randbreite in Pixeln
    pub stop_outline_width_px: f32,

    // ── Interaktion ─────────────────────────────────────────────
    /// Maximaler Abstand Klick → Route für neue Haltestellen
    pub stop_snap_threshold: f64,
    /// Klick-Radius für die Kantenauswahl in Pixeln
    pub edge_pick_radius_px: f64,
    /// Toleranz beim Rückabgleich gespeicherter Ketten
    #[serde(default = "default_match_tolerance")]
    pub match_tolerance: f64,
    /// Vergleichsstrategie beim Rückabgleich
    #[serde(default)]
    pub match_strategy: MatchStrategy,

    // ── Ansicht ─────────────────────────────────────────────────
    /// Startzentrum als `[lon, lat]`
    pub default_center: LonLat,
    /// Start-Zoomstufe
    pub default_zoom: f64,
    /// Maximaler Zoom beim Einpassen einer gespeicherten Route
    #[serde(default = "default_max_fit_zoom")]
    pub max_fit_zoom: f64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            edge_color_default: EDGE_COLOR_DEFAULT,
            edge_width_default: EDGE_WIDTH_DEFAULT,
            edge_color_selected: EDGE_COLOR_SELECTED,
            edge_width_selected: EDGE_WIDTH_SELECTED,

            stop_fill_color: STOP_FILL_COLOR,
            stop_outline_color: STOP_OUTLINE_COLOR,
            stop_radius_px: STOP_RADIUS_PX,
            stop_outline_width_px: STOP_OUTLINE_WIDTH_PX,

            stop_snap_threshold: STOP_SNAP_THRESHOLD,
            edge_pick_radius_px: EDGE_PICK_RADIUS_PX,
            match_tolerance: MATCH_TOLERANCE,
            match_strategy: MatchStrategy::default(),

            default_center: MapView::DEFAULT_CENTER,
            default_zoom: MapView::DEFAULT_ZOOM,
            max_fit_zoom: MapView::MAX_FIT_ZOOM,
        }
    }
}

/// Serde-Default für `match_tolerance` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_match_tolerance() -> f64 {
    MATCH_TOLERANCE
}

/// Serde-Default für `max_fit_zoom`.
fn default_max_fit_zoom() -> f64 {
    MapView::MAX_FIT_ZOOM
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("bus_route_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("bus_route_editor.toml")
    }

    /// Abgleich-Parameter für den RouteMatcher.
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            tolerance: self.match_tolerance,
            strategy: self.match_strategy,
        }
    }

    /// Startansicht des Editors.
    pub fn initial_view(&self) -> MapView {
        MapView::centered_on(self.default_center, self.default_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_roundtrip_keeps_values() {
        let mut options = EditorOptions::default();
        options.stop_snap_threshold = 20.0;
        options.match_strategy = MatchStrategy::LegacyXAxis;

        let text = toml::to_string_pretty(&options).expect("Serialisierung erwartet");
        let parsed: EditorOptions = toml::from_str(&text).expect("Deserialisierung erwartet");

        assert_eq!(parsed, options);
    }

    #[test]
    fn test_missing_optional_keys_fall_back_to_defaults() {
        let text =
            toml::to_string_pretty(&EditorOptions::default()).expect("Serialisierung erwartet");
        let mut table: toml::Table = toml::from_str(&text).expect("Tabelle erwartet");
        table.remove("match_tolerance");
        table.remove("match_strategy");
        table.remove("max_fit_zoom");

        let reduced = toml::to_string(&table).expect("Serialisierung erwartet");
        let parsed: EditorOptions = toml::from_str(&reduced).expect("Deserialisierung erwartet");

        assert_eq!(parsed.match_tolerance, MATCH_TOLERANCE);
        assert_eq!(parsed.match_strategy, MatchStrategy::Endpoints);
        assert_eq!(parsed.max_fit_zoom, MapView::MAX_FIT_ZOOM);
    }

    #[test]
    fn test_saved_file_loads_back() {
        let path = std::env::temp_dir().join(format!(
            "bus_route_editor_options_{}.toml",
            std::process::id()
        ));
        let mut options = EditorOptions::default();
        options.edge_pick_radius_px = 9.0;

        options.save_to_file(&path).expect("Speichern erwartet");
        let loaded = EditorOptions::load_from_file(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, options);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let options =
            EditorOptions::load_from_file(std::path::Path::new("/nonexistent/bus_route_editor.toml"));
        assert_eq!(options, EditorOptions::default());
    }
}
