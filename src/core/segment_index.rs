//! Zerlegt das Straßennetz in atomare, adressierbare Kanten.
//!
//! Jeder Build vergibt IDs ab 1 und bekommt eine prozessweit eindeutige
//! Generation. Der Index ist nach dem Build unveränderlich.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::DVec2;
use kiddo::{KdTree, SquaredEuclidean};

use super::edge::{Edge, EdgeId};
use super::map_view::Extent;
use super::projection::CoordinateProjector;
use super::street::StreetFeature;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Treffer einer Kanten-Abfrage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHit {
    /// ID der getroffenen Kante
    pub edge_id: EdgeId,
    /// Abstand Suchpunkt → Kante
    pub distance: f64,
    /// Nächster Punkt auf der Kante
    pub closest: DVec2,
}

/// Read-only Kantenmenge eines Straßennetzes.
#[derive(Debug, Clone)]
pub struct SegmentIndex {
    generation: u64,
    edges: Vec<Edge>,
    /// KD-Tree über Kanten-Mittelpunkten (Item = Position in `edges`)
    midpoints: KdTree<f64, 2>,
    max_half_length: f64,
    skipped_features: usize,
}

impl SegmentIndex {
    /// Baut den Index aus den übergebenen Straßenzügen.
    ///
    /// Straßenzüge mit weniger als zwei Stützpunkten oder nicht endlichen
    /// Koordinaten werden übersprungen, ohne den Build abzubrechen.
    pub fn build(features: &[StreetFeature]) -> Self {
        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        let mut edges = Vec::new();
        let mut skipped_features = 0usize;
        let mut next_id: EdgeId = 1;

        for feature in features {
            if feature.vertices.len() < 2 {
                skipped_features += 1;
                continue;
            }
            let Some(projected) = CoordinateProjector::project_all(&feature.vertices) else {
                log::debug!(
                    "Straßenzug {:?} mit ungültigen Koordinaten übersprungen",
                    feature.name()
                );
                skipped_features += 1;
                continue;
            };

            for pair in projected.windows(2) {
                edges.push(Edge {
                    id: next_id,
                    start: pair[0],
                    end: pair[1],
                    attributes: feature.attributes.clone(),
                });
                next_id += 1;
            }
        }

        let entries: Vec<[f64; 2]> = edges
            .iter()
            .map(|edge| {
                let mid = edge.midpoint();
                [mid.x, mid.y]
            })
            .collect();
        let midpoints: KdTree<f64, 2> = (&entries).into();

        let max_half_length = edges
            .iter()
            .map(|edge| edge.length() * 0.5)
            .fold(0.0, f64::max);

        if skipped_features > 0 {
            log::warn!(
                "{} Straßenzüge beim Aufbau des Kantenindex übersprungen",
                skipped_features
            );
        }
        log::debug!(
            "Kantenindex (Generation {}) mit {} Kanten aufgebaut",
            generation,
            edges.len()
        );

        Self {
            generation,
            edges,
            midpoints,
            max_half_length,
            skipped_features,
        }
    }

    /// Prozessweit eindeutige Kennung dieses Builds.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Gibt die Anzahl der Kanten zurück.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Gibt `true` zurück, wenn der Index keine Kanten enthält.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Anzahl der beim Build übersprungenen Straßenzüge.
    pub fn skipped_features(&self) -> usize {
        self.skipped_features
    }

    /// Kante per ID (IDs sind dicht ab 1 vergeben).
    pub fn get(&self, id: EdgeId) -> Option<&Edge> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.edges.get(index)
    }

    /// Prüft, ob die ID zu diesem Build gehört.
    pub fn contains(&self, id: EdgeId) -> bool {
        self.get(id).is_some()
    }

    /// Alle Kanten in ID-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Findet die nächste Kante innerhalb von `max_distance` zum Punkt.
    ///
    /// Bei gleichem Abstand gewinnt die kleinere ID.
    pub fn pick(&self, point: DVec2, max_distance: f64) -> Option<EdgeHit> {
        if self.is_empty() || max_distance.is_nan() || max_distance < 0.0 {
            return None;
        }

        // Jede Kante mit Abstand <= max_distance hat ihren Mittelpunkt
        // innerhalb von max_distance + halbe Kantenlänge.
        let radius = max_distance + self.max_half_length;
        let mut best: Option<EdgeHit> = None;

        for entry in self
            .midpoints
            .within::<SquaredEuclidean>(&[point.x, point.y], radius * radius)
        {
            let Some(edge) = self.edges.get(entry.item as usize) else {
                continue;
            };
            let closest = edge.closest_point(point);
            let distance = closest.distance(point);
            if distance > max_distance {
                continue;
            }
            let better = match best {
                None => true,
                Some(current) => {
                    distance < current.distance
                        || (distance == current.distance && edge.id < current.edge_id)
                }
            };
            if better {
                best = Some(EdgeHit {
                    edge_id: edge.id,
                    distance,
                    closest,
                });
            }
        }

        best
    }

    /// Umschließendes Rechteck aller Kanten.
    pub fn extent(&self) -> Option<Extent> {
        Extent::from_points(self.edges.iter().flat_map(|e| [e.start, e.end]))
    }
}
