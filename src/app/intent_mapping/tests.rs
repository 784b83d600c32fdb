use std::sync::Arc;

use glam::DVec2;

use crate::app::{
    EditorCommand, EditorController, EditorIntent, EditorState, InitialRoute, InputMode,
    RecordingSurfaceHost, RouteObserver, SessionKey, SubscriptionId,
};
use crate::core::{StreetFeature, StreetNetwork};
use crate::shared::RouteSnapshot;

use super::map_intent_to_commands;

fn ignore_output() -> Box<dyn RouteObserver> {
    Box::new(|_: &RouteSnapshot| {})
}

fn empty_state() -> EditorState {
    EditorState::new(Box::new(RecordingSurfaceHost::new()), ignore_output())
}

fn streets() -> Arc<StreetNetwork> {
    Arc::new(StreetNetwork::new(vec![StreetFeature::new(vec![
        [-58.1800, -26.1800],
        [-58.1790, -26.1800],
    ])]))
}

fn state_with_session(key: SessionKey) -> EditorState {
    let mut state = empty_state();
    EditorController::new()
        .handle_intent(
            &mut state,
            EditorIntent::OpenEditorRequested {
                key,
                streets: Some(streets()),
                initial: None,
            },
        )
        .expect("Session erwartet");
    state
}

fn live_subscription(state: &EditorState) -> SubscriptionId {
    state
        .session
        .as_ref()
        .and_then(|s| s.subscription())
        .map(|(id, _)| id)
        .expect("Registrierung erwartet")
}

#[test]
fn open_without_session_destroys_then_creates() {
    let state = empty_state();

    let commands = map_intent_to_commands(
        &state,
        EditorIntent::OpenEditorRequested {
            key: SessionKey::NewRoute,
            streets: Some(streets()),
            initial: None,
        },
    );

    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], EditorCommand::DestroySession));
    assert!(matches!(
        commands[1],
        EditorCommand::CreateSession {
            key: SessionKey::NewRoute,
            ..
        }
    ));
}

#[test]
fn open_with_same_key_maps_to_resync() {
    let state = state_with_session(SessionKey::Route(3));

    let commands = map_intent_to_commands(
        &state,
        EditorIntent::OpenEditorRequested {
            key: SessionKey::Route(3),
            streets: Some(streets()),
            initial: Some(InitialRoute::default()),
        },
    );

    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], EditorCommand::ResyncInitialRoute { .. }));
}

#[test]
fn open_with_other_key_rebuilds() {
    let state = state_with_session(SessionKey::Route(3));

    let commands = map_intent_to_commands(
        &state,
        EditorIntent::OpenEditorRequested {
            key: SessionKey::Route(4),
            streets: Some(streets()),
            initial: None,
        },
    );

    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], EditorCommand::DestroySession));
}

#[test]
fn click_on_selection_channel_with_hit_maps_to_toggle() {
    let state = state_with_session(SessionKey::NewRoute);
    let subscription = live_subscription(&state);

    let commands = map_intent_to_commands(
        &state,
        EditorIntent::SurfaceClicked {
            subscription,
            world_pos: DVec2::ZERO,
            hit_edge: Some(1),
        },
    );

    assert!(matches!(
        commands.as_slice(),
        [EditorCommand::ToggleEdge { edge_id: 1 }]
    ));
}

#[test]
fn click_without_hit_uses_pixel_radius_in_world_units() {
    let state = state_with_session(SessionKey::NewRoute);
    let subscription = live_subscription(&state);
    let expected = state.view.pixels_to_world(state.options.edge_pick_radius_px);

    let commands = map_intent_to_commands(
        &state,
        EditorIntent::SurfaceClicked {
            subscription,
            world_pos: DVec2::new(1.0, 2.0),
            hit_edge: None,
        },
    );

    match commands.as_slice() {
        [EditorCommand::PickAndToggleEdge {
            world_pos,
            max_distance,
        }] => {
            assert_eq!(*world_pos, DVec2::new(1.0, 2.0));
            approx::assert_relative_eq!(*max_distance, expected);
        }
        other => panic!("PickAndToggleEdge erwartet, erhalten: {:?}", other),
    }
}

#[test]
fn click_on_stop_channel_maps_to_place_stop() {
    let mut state = state_with_session(SessionKey::NewRoute);
    EditorController::new()
        .handle_intent(
            &mut state,
            EditorIntent::InputModeChanged {
                mode: InputMode::PlaceStops,
            },
        )
        .expect("Moduswechsel erwartet");
    let subscription = live_subscription(&state);

    let commands = map_intent_to_commands(
        &state,
        EditorIntent::SurfaceClicked {
            subscription,
            world_pos: DVec2::ZERO,
            hit_edge: Some(1),
        },
    );

    match commands.as_slice() {
        [EditorCommand::PlaceStop { threshold, .. }] => {
            assert_eq!(*threshold, state.options.stop_snap_threshold);
        }
        other => panic!("PlaceStop erwartet, erhalten: {:?}", other),
    }
}

#[test]
fn click_on_stale_subscription_maps_to_nothing() {
    let state = state_with_session(SessionKey::NewRoute);
    let stale = SubscriptionId(live_subscription(&state).0 + 100);

    let commands = map_intent_to_commands(
        &state,
        EditorIntent::SurfaceClicked {
            subscription: stale,
            world_pos: DVec2::ZERO,
            hit_edge: Some(1),
        },
    );

    assert!(commands.is_empty());
    assert!(map_intent_to_commands(
        &empty_state(),
        EditorIntent::SurfaceClicked {
            subscription: stale,
            world_pos: DVec2::ZERO,
            hit_edge: None,
        },
    )
    .is_empty());
}

#[test]
fn close_requested_maps_to_destroy() {
    let state = empty_state();

    let commands = map_intent_to_commands(&state, EditorIntent::CloseRequested);

    assert!(matches!(commands.as_slice(), [EditorCommand::DestroySession]));
}
