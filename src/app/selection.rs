//! Selektion der Kanten, die den Trayecto bilden.
//!
//! Jeder Klick auf eine Kante kehrt ihre Zugehörigkeit um, unabhängig von
//! Modifier-Tasten. `toggle` ist damit seine eigene Inverse.

use std::sync::Arc;

use indexmap::IndexSet;

use crate::core::{EdgeId, SegmentIndex};
use crate::shared::Chain;

/// Unveränderlicher Snapshot der selektierten Kanten (Einfügereihenfolge).
pub type SelectionSet = Arc<IndexSet<EdgeId>>;

/// Besitzt die aktuelle Kantenauswahl einer Session.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    /// Selektierte Kanten-IDs (Arc für O(1)-Snapshots in der RenderScene)
    ids: SelectionSet,
}

impl SelectionController {
    /// Erstellt eine leere Selektion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable Sicht auf die Menge (CoW: klont nur wenn ein Snapshot lebt).
    #[inline]
    fn ids_mut(&mut self) -> &mut IndexSet<EdgeId> {
        Arc::make_mut(&mut self.ids)
    }

    /// Kehrt die Zugehörigkeit der Kante um.
    ///
    /// Gibt die neue Zugehörigkeit zurück (`true` = jetzt selektiert).
    pub fn toggle(&mut self, edge_id: EdgeId) -> bool {
        let ids = self.ids_mut();
        if ids.shift_remove(&edge_id) {
            false
        } else {
            ids.insert(edge_id);
            true
        }
    }

    /// Hebt die komplette Auswahl auf.
    pub fn clear(&mut self) {
        if !self.ids.is_empty() {
            self.ids_mut().clear();
        }
    }

    /// Ersetzt die Auswahl (nur für Seeding/Resync aus gespeicherten Daten).
    pub fn replace(&mut self, ids: impl IntoIterator<Item = EdgeId>) {
        self.ids = Arc::new(ids.into_iter().collect());
    }

    /// Aktueller Snapshot (O(1)).
    pub fn snapshot(&self) -> SelectionSet {
        Arc::clone(&self.ids)
    }

    /// Prüft die Zugehörigkeit einer Kante.
    pub fn is_selected(&self, edge_id: EdgeId) -> bool {
        self.ids.contains(&edge_id)
    }

    /// Anzahl selektierter Kanten.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Gibt `true` zurück, wenn nichts selektiert ist.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Exportiert die Auswahl als Trajektorie: eine Zwei-Punkt-Kette je Kante.
    ///
    /// Ketten werden nicht zusammengeführt, auch wenn Kanten aneinanderstoßen.
    pub fn trajectory(&self, index: &SegmentIndex) -> Vec<Chain> {
        self.ids
            .iter()
            .filter_map(|id| index.get(*id))
            .map(|edge| edge.to_chain().to_vec())
            .collect()
    }
}
