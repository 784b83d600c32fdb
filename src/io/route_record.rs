//! Persistierter Linien-Datensatz (Trayecto + Paradas) als JSON.
//!
//! Das Backend liefert den Trayecto entweder als rohe Kettenliste oder als
//! GeoJSON-`MultiLineString`; geschrieben wird immer die GeoJSON-Form.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::app::InitialRoute;
use crate::shared::{Chain, RouteSnapshot, StopCoords};

/// Eine gespeicherte Linie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Backend-ID (fehlt bei neuen Linien)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Ketten des Trayecto in `[lon, lat]`
    #[serde(
        default,
        alias = "trayecto",
        deserialize_with = "deserialize_trajectory",
        serialize_with = "serialize_trajectory"
    )]
    pub trajectory: Vec<Chain>,
    /// Haltestellen im Format `{ "coords": [lon, lat] }`
    #[serde(default, alias = "paradas", deserialize_with = "deserialize_stops")]
    pub stops: Vec<StopCoords>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum GeometryType {
    MultiLineString,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MultiLineString {
    #[serde(rename = "type")]
    geometry_type: GeometryType,
    coordinates: Vec<Chain>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TrajectoryPayload {
    Geometry(MultiLineString),
    Chains(Vec<Chain>),
}

fn deserialize_trajectory<'de, D>(deserializer: D) -> std::result::Result<Vec<Chain>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<TrajectoryPayload>::deserialize(deserializer)? {
            Some(TrajectoryPayload::Geometry(geometry)) => geometry.coordinates,
            Some(TrajectoryPayload::Chains(chains)) => chains,
            None => Vec::new(),
        },
    )
}

fn serialize_trajectory<S>(chains: &[Chain], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    MultiLineString {
        geometry_type: GeometryType::MultiLineString,
        coordinates: chains.to_vec(),
    }
    .serialize(serializer)
}

fn deserialize_stops<'de, D>(deserializer: D) -> std::result::Result<Vec<StopCoords>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<StopCoords>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RouteRecord {
    /// Datensatz aus der aktuellen Ausgabe einer Session.
    pub fn from_snapshot(id: Option<u64>, snapshot: &RouteSnapshot) -> Self {
        Self {
            id,
            trajectory: snapshot.trajectory.clone(),
            stops: snapshot.stops.clone(),
        }
    }

    /// Initialdaten für eine Editor-Session.
    pub fn initial_route(&self) -> InitialRoute {
        InitialRoute {
            trajectory: self.trajectory.clone(),
            stops: self.stops.iter().map(|s| s.coords).collect(),
        }
    }
}

/// Parsed einen Linien-Datensatz aus einem JSON-String.
pub fn parse_route_record(json_content: &str) -> Result<RouteRecord> {
    let record: RouteRecord =
        serde_json::from_str(json_content).context("Linien-Datensatz fehlerhaft")?;
    log::debug!(
        "Linien-Datensatz gelesen: {} Ketten, {} Haltestellen",
        record.trajectory.len(),
        record.stops.len()
    );
    Ok(record)
}

/// Liest einen Linien-Datensatz aus einer Datei.
pub fn load_route_record(path: &Path) -> Result<RouteRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Linien-Datei nicht lesbar: {}", path.display()))?;
    parse_route_record(&content)
        .with_context(|| format!("Linien-Datei fehlerhaft: {}", path.display()))
}

/// Schreibt einen Linien-Datensatz als JSON (Trayecto als MultiLineString).
pub fn write_route_record(record: &RouteRecord) -> Result<String> {
    serde_json::to_string_pretty(record).context("Linien-Datensatz nicht serialisierbar")
}

/// Speichert einen Linien-Datensatz in eine Datei.
pub fn save_route_record(path: &Path, record: &RouteRecord) -> Result<()> {
    let content = write_route_record(record)?;
    std::fs::write(path, content)
        .with_context(|| format!("Linien-Datei nicht schreibbar: {}", path.display()))?;
    log::info!("Linien-Datensatz gespeichert nach: {}", path.display());
    Ok(())
}
