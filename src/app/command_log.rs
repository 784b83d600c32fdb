//! Begrenztes Protokoll ausgeführter Commands.
//!
//! Der Host nutzt es, um die Bearbeitungsschritte der laufenden Session
//! nachzuvollziehen (z.B. ob seit dem Öffnen überhaupt etwas geändert wurde).

use super::EditorCommand;

/// Speichert ausgeführte Commands in Reihenfolge.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<EditorCommand>,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;

    /// Erstellt ein leeres Command-Log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt einen ausgeführten Command hinzu.
    /// Ist das Log voll, wird die ältere Hälfte verworfen.
    pub fn record(&mut self, command: &EditorCommand) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(command.clone());
    }

    /// Gibt die Anzahl der geloggten Commands zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Commands vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Liefert eine read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[EditorCommand] {
        &self.entries
    }

    /// Zuletzt ausgeführter Command.
    pub fn last(&self) -> Option<&EditorCommand> {
        self.entries.last()
    }

    /// Commands seit dem letzten `CreateSession` (ohne diesen selbst).
    ///
    /// Ohne `CreateSession` im Log: alle Einträge.
    pub fn current_session(&self) -> &[EditorCommand] {
        let start = self
            .entries
            .iter()
            .rposition(|c| matches!(c, EditorCommand::CreateSession { .. }))
            .map_or(0, |pos| pos + 1);
        &self.entries[start..]
    }

    /// Anzahl der Bearbeitungsklicks (Toggle, Haltestelle, Leeren) der laufenden Session.
    ///
    /// Gezählt werden ausgeführte Commands, auch wenn sie nichts geändert haben.
    pub fn route_edits(&self) -> usize {
        self.current_session()
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    EditorCommand::ToggleEdge { .. }
                        | EditorCommand::PickAndToggleEdge { .. }
                        | EditorCommand::PlaceStop { .. }
                        | EditorCommand::ClearSelection
                )
            })
            .count()
    }
}
