//! Straßen-Rohdaten: benannte Polylinien mit offenem Attribut-Bag.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::projection::LonLat;

/// Attribut-Bag eines Straßenzugs (GeoJSON `properties`).
pub type StreetAttributes = Arc<Map<String, Value>>;

/// Ein Straßenzug aus dem Stadtnetz (read-only, extern geliefert).
#[derive(Debug, Clone)]
pub struct StreetFeature {
    /// Geordnete Stützpunkte als `[lon, lat]`
    pub vertices: Vec<LonLat>,
    /// Quell-Attribute (nur für Darstellung/Filter, nie für Identität)
    pub attributes: StreetAttributes,
}

impl StreetFeature {
    /// Erstellt einen Straßenzug ohne Attribute.
    pub fn new(vertices: Vec<LonLat>) -> Self {
        Self {
            vertices,
            attributes: Arc::new(Map::new()),
        }
    }

    /// Erstellt einen Straßenzug mit Attributen.
    pub fn with_attributes(vertices: Vec<LonLat>, attributes: Map<String, Value>) -> Self {
        Self {
            vertices,
            attributes: Arc::new(attributes),
        }
    }

    /// Straßenname aus `name` oder `nombre` (nur für Logausgaben).
    pub fn name(&self) -> Option<&str> {
        self.attributes
            .get("name")
            .or_else(|| self.attributes.get("nombre"))
            .and_then(Value::as_str)
    }

    /// Anzahl der Kanten, die dieser Straßenzug erzeugt (`n - 1`, mindestens 0).
    pub fn edge_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

/// Das komplette Straßennetz einer Session.
#[derive(Debug, Clone, Default)]
pub struct StreetNetwork {
    /// Gültige Straßenzüge in Quellreihenfolge
    pub features: Vec<StreetFeature>,
    /// Anzahl beim Einlesen verworfener Datensätze
    pub skipped: usize,
}

impl StreetNetwork {
    /// Erstellt ein Netz aus bereits gültigen Straßenzügen.
    pub fn new(features: Vec<StreetFeature>) -> Self {
        Self {
            features,
            skipped: 0,
        }
    }

    /// Liest ein Straßennetz aus einer GeoJSON-Datei.
    pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        crate::io::load_street_network(path)
    }

    /// Gibt die Anzahl gültiger Straßenzüge zurück.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Gibt `true` zurück, wenn keine Straßenzüge vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
