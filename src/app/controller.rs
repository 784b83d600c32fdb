//! Editor Controller für zentrale Event-Verarbeitung.

use super::{EditorCommand, EditorIntent, EditorState};
use crate::shared::RenderScene;

/// Orchestriert Host-Events und Session-Operationen auf den EditorState.
#[derive(Default)]
pub struct EditorController;

impl EditorController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut EditorState,
        intent: EditorIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &EditorState, intent: EditorIntent) -> Vec<EditorCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem EditorState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut EditorState,
        command: EditorCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Session-Lebenszyklus ===
            EditorCommand::CreateSession {
                key,
                streets,
                initial,
            } => handlers::session::create(state, key, streets, initial),
            EditorCommand::DestroySession => handlers::session::destroy(state),
            EditorCommand::ResyncInitialRoute { initial } => {
                handlers::session::resync(state, &initial)
            }
            EditorCommand::SetInputMode { mode } => handlers::session::set_input_mode(state, mode),

            // === Selektion ===
            EditorCommand::ToggleEdge { edge_id } => handlers::selection::toggle_edge(state, edge_id),
            EditorCommand::PickAndToggleEdge {
                world_pos,
                max_distance,
            } => handlers::selection::pick_and_toggle(state, world_pos, max_distance),
            EditorCommand::ClearSelection => handlers::selection::clear(state),

            // === Haltestellen ===
            EditorCommand::PlaceStop {
                world_pos,
                threshold,
            } => handlers::stops::place(state, world_pos, threshold),

            // === Ansicht ===
            EditorCommand::SetView { view } => handlers::view::set_view(state, view),
        }

        Ok(())
    }

    /// Baut die Render-Szene der aktuellen Session (None ohne aktiven Index).
    pub fn build_render_scene(&self, state: &EditorState) -> Option<RenderScene> {
        state.session.as_ref().and_then(|s| s.render_scene())
    }
}
