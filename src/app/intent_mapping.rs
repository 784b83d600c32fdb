//! Mapping von Editor-Intents auf mutierende Commands.

use super::surface::InputChannel;
use super::{EditorCommand, EditorIntent, EditorState};

/// Übersetzt einen `EditorIntent` in eine Sequenz ausführbarer `EditorCommand`s.
pub fn map_intent_to_commands(state: &EditorState, intent: EditorIntent) -> Vec<EditorCommand> {
    match intent {
        EditorIntent::OpenEditorRequested {
            key,
            streets,
            initial,
        } => {
            let same_key_active = state
                .session
                .as_ref()
                .is_some_and(|session| session.key() == key && session.is_active());

            if same_key_active {
                vec![EditorCommand::ResyncInitialRoute {
                    initial: initial.unwrap_or_default(),
                }]
            } else {
                vec![
                    EditorCommand::DestroySession,
                    EditorCommand::CreateSession {
                        key,
                        streets,
                        initial,
                    },
                ]
            }
        }
        EditorIntent::InitialRouteChanged { initial } => {
            vec![EditorCommand::ResyncInitialRoute { initial }]
        }
        EditorIntent::InputModeChanged { mode } => vec![EditorCommand::SetInputMode { mode }],
        EditorIntent::CloseRequested => vec![EditorCommand::DestroySession],
        EditorIntent::ClearSelectionRequested => vec![EditorCommand::ClearSelection],
        EditorIntent::ViewChanged { view } => vec![EditorCommand::SetView { view }],
        EditorIntent::SurfaceClicked {
            subscription,
            world_pos,
            hit_edge,
        } => {
            let channel = state
                .session
                .as_ref()
                .and_then(|session| session.channel_for(subscription));

            match (channel, hit_edge) {
                (Some(InputChannel::EdgeSelection), Some(edge_id)) => {
                    vec![EditorCommand::ToggleEdge { edge_id }]
                }
                (Some(InputChannel::EdgeSelection), None) => {
                    let max_distance = state.view.pixels_to_world(state.options.edge_pick_radius_px);
                    vec![EditorCommand::PickAndToggleEdge {
                        world_pos,
                        max_distance,
                    }]
                }
                (Some(InputChannel::StopPlacement), _) => vec![EditorCommand::PlaceStop {
                    world_pos,
                    threshold: state.options.stop_snap_threshold,
                }],
                (None, _) => {
                    log::debug!("Klick über veraltete Registrierung {:?} verworfen", subscription);
                    Vec::new()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
