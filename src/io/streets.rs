//! Reader für das Straßennetz als GeoJSON-FeatureCollection.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::core::{LonLat, StreetFeature, StreetNetwork};

/// Parsed ein Straßennetz aus einem GeoJSON-String.
///
/// Nur ein Dokument ohne `features`-Array gilt als Fehler. Einzelne Features
/// mit anderem Geometrietyp oder kaputten Koordinaten werden übersprungen
/// und in `StreetNetwork::skipped` gezählt.
pub fn parse_street_network(json_content: &str) -> Result<StreetNetwork> {
    let parsed: Value =
        serde_json::from_str(json_content).context("Straßendaten sind kein gültiges JSON")?;
    let features = parsed
        .get("features")
        .and_then(Value::as_array)
        .context("Ungültiges GeoJSON: 'features'-Array fehlt")?;

    let mut network = StreetNetwork::default();
    for (i, feature) in features.iter().enumerate() {
        match parse_feature(feature) {
            Some(street) => network.features.push(street),
            None => {
                log::debug!("Feature {} übersprungen (keine gültige LineString)", i);
                network.skipped += 1;
            }
        }
    }

    if network.skipped > 0 {
        log::warn!(
            "{} von {} Straßen-Features übersprungen",
            network.skipped,
            features.len()
        );
    }
    log::info!("Straßennetz mit {} Straßenzügen gelesen", network.len());
    Ok(network)
}

/// Liest ein Straßennetz aus einer GeoJSON-Datei.
pub fn load_street_network(path: &Path) -> Result<StreetNetwork> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Straßendatei nicht lesbar: {}", path.display()))?;
    parse_street_network(&content)
        .with_context(|| format!("Straßendatei fehlerhaft: {}", path.display()))
}

fn parse_feature(feature: &Value) -> Option<StreetFeature> {
    let geometry = feature.get("geometry")?;
    if geometry.get("type").and_then(Value::as_str) != Some("LineString") {
        return None;
    }
    let vertices = geometry
        .get("coordinates")?
        .as_array()?
        .iter()
        .map(parse_position)
        .collect::<Option<Vec<LonLat>>>()?;

    let attributes = match feature.get("properties") {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };
    Some(StreetFeature::with_attributes(vertices, attributes))
}

/// `[lon, lat]` oder `[lon, lat, alt]`; die Höhe wird verworfen.
fn parse_position(position: &Value) -> Option<LonLat> {
    match position.as_array()?.as_slice() {
        [lon, lat] | [lon, lat, _] => Some([lon.as_f64()?, lat.as_f64()?]),
        _ => None,
    }
}
