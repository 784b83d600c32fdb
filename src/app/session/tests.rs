use super::*;
use crate::app::surface::{RecordingSurfaceHost, SurfaceJournal};
use crate::core::StreetFeature;
use std::cell::RefCell;
use std::rc::Rc;

/// Sammelt alle gemeldeten Snapshots.
#[derive(Default)]
struct Collector {
    snapshots: Vec<RouteSnapshot>,
}

impl RouteObserver for Collector {
    fn route_changed(&mut self, snapshot: &RouteSnapshot) {
        self.snapshots.push(snapshot.clone());
    }
}

/// Zwei Straßen: eine mit drei Stützpunkten (2 Kanten), eine mit zwei (1 Kante).
fn streets() -> StreetNetwork {
    StreetNetwork::new(vec![
        StreetFeature::new(vec![
            [-58.1800, -26.1800],
            [-58.1790, -26.1800],
            [-58.1780, -26.1800],
        ]),
        StreetFeature::new(vec![[-58.1750, -26.1850], [-58.1750, -26.1860]]),
    ])
}

fn new_session(key: SessionKey) -> EditorSession {
    EditorSession::new(
        key,
        EditorOptions::default(),
        MapView::default(),
        InputMode::SelectSegments,
    )
}

fn active_session(
    initial: Option<&InitialRoute>,
) -> (EditorSession, Rc<RefCell<SurfaceJournal>>, Collector) {
    let mut host = RecordingSurfaceHost::new();
    let journal = host.journal();
    let mut observer = Collector::default();
    let mut session = new_session(SessionKey::Route(7));
    session
        .activate(Some(&streets()), initial, &mut host, &mut observer)
        .expect("Aktivierung erwartet");
    (session, journal, observer)
}

#[test]
fn test_activation_builds_index_and_mounts_surface() {
    let (session, journal, observer) = active_session(None);

    assert_eq!(session.phase(), SessionPhase::Active);
    assert_eq!(session.index().map(|i| i.len()), Some(3));
    assert!(observer.snapshots.is_empty());

    let j = journal.borrow();
    assert_eq!(j.mounts, vec![SessionKey::Route(7)]);
    assert_eq!(j.presents, 1);
    assert_eq!(
        j.subscription_for(InputChannel::EdgeSelection),
        session.subscription().map(|(id, _)| id)
    );
    assert!(j.subscription_for(InputChannel::StopPlacement).is_none());
}

#[test]
fn test_missing_streets_keep_session_uninitialized() {
    let mut host = RecordingSurfaceHost::new();
    let journal = host.journal();
    let mut observer = Collector::default();
    let mut session = new_session(SessionKey::NewRoute);

    let result = session.activate(None, None, &mut host, &mut observer);

    assert!(result.is_err());
    assert_eq!(session.phase(), SessionPhase::Uninitialized);
    assert_eq!(observer.snapshots, vec![RouteSnapshot::empty()]);
    assert!(journal.borrow().mounts.is_empty());
    assert!(session.snapshot().is_empty());
}

#[test]
fn test_failed_mount_keeps_session_uninitialized() {
    let mut host = RecordingSurfaceHost::failing();
    let mut observer = Collector::default();
    let mut session = new_session(SessionKey::ObstructionSector);

    let result = session.activate(Some(&streets()), None, &mut host, &mut observer);

    assert!(result.is_err());
    assert_eq!(session.phase(), SessionPhase::Uninitialized);
    assert_eq!(observer.snapshots.len(), 1);
    assert!(session.index().is_none());
}

#[test]
fn test_toggle_emits_current_route() {
    let (mut session, journal, mut observer) = active_session(None);

    assert!(session.toggle_edge(2, &mut observer));
    assert!(session.toggle_edge(1, &mut observer));

    assert_eq!(observer.snapshots.len(), 2);
    let last = observer.snapshots.last().expect("Snapshot erwartet");
    assert_eq!(last.trajectory.len(), 2);
    assert!(last.trajectory.iter().all(|chain| chain.len() == 2));
    assert_eq!(
        journal
            .borrow()
            .last_frame
            .as_ref()
            .map(|f| f.selected_edge_ids.clone()),
        Some(vec![2, 1])
    );
}

#[test]
fn test_unknown_edge_is_ignored_without_output() {
    let (mut session, _journal, mut observer) = active_session(None);

    assert!(!session.toggle_edge(99, &mut observer));
    assert!(!session.toggle_edge(0, &mut observer));

    assert!(observer.snapshots.is_empty());
    assert!(session.selection().is_empty());
}

#[test]
fn test_pick_and_toggle_uses_nearest_edge() {
    let (mut session, _journal, mut observer) = active_session(None);
    let vertical = session
        .index()
        .and_then(|i| i.get(3))
        .expect("Kante erwartet")
        .clone();

    let near = vertical.midpoint() + DVec2::new(3.0, 0.0);
    let far = vertical.midpoint() + DVec2::new(50.0, 0.0);

    assert!(session.pick_and_toggle(near, 10.0, &mut observer));
    assert!(session.selection().contains(&3));
    assert!(!session.pick_and_toggle(far, 10.0, &mut observer));
    assert_eq!(observer.snapshots.len(), 1);
}

#[test]
fn test_stop_beyond_threshold_is_not_placed() {
    let (mut session, _journal, mut observer) = active_session(None);
    session.toggle_edge(1, &mut observer);
    session.set_mode(InputMode::PlaceStops);
    let edge = session
        .index()
        .and_then(|i| i.get(1))
        .expect("Kante erwartet")
        .clone();
    let emitted_before = observer.snapshots.len();

    let click = edge.midpoint() + DVec2::new(0.0, 40.0);
    let placement = session.place_stop(click, 32.0, &mut observer);

    assert!(placement.is_none());
    assert!(session.stops().is_empty());
    assert_eq!(observer.snapshots.len(), emitted_before);
}

#[test]
fn test_stop_is_placed_on_selected_edge_and_emitted() {
    let (mut session, _journal, mut observer) = active_session(None);
    session.toggle_edge(1, &mut observer);
    session.set_mode(InputMode::PlaceStops);
    let edge = session
        .index()
        .and_then(|i| i.get(1))
        .expect("Kante erwartet")
        .clone();

    let placement = session
        .place_stop(edge.midpoint() + DVec2::new(0.0, 12.0), 32.0, &mut observer)
        .expect("Haltestelle erwartet");

    assert_eq!(placement.edge_id, 1);
    assert!(edge.distance_to(placement.stop.position) < 1e-6);
    let last = observer.snapshots.last().expect("Snapshot erwartet");
    assert_eq!(last.stops.len(), 1);
    assert_eq!(last.trajectory.len(), 1);
}

#[test]
fn test_clicks_only_act_in_their_mode() {
    let (mut session, _journal, mut observer) = active_session(None);
    session.toggle_edge(1, &mut observer);
    let edge = session
        .index()
        .and_then(|i| i.get(1))
        .expect("Kante erwartet")
        .clone();

    assert!(session.place_stop(edge.midpoint(), 32.0, &mut observer).is_none());

    session.set_mode(InputMode::PlaceStops);
    assert!(!session.toggle_edge(2, &mut observer));
    assert!(session.place_stop(edge.midpoint(), 32.0, &mut observer).is_some());
    assert_eq!(session.selection().len(), 1);
}

#[test]
fn test_mode_switch_replaces_subscription() {
    let (mut session, journal, _observer) = active_session(None);
    let (old, _) = session.subscription().expect("Registrierung erwartet");

    session.set_mode(InputMode::PlaceStops);

    let (new, channel) = session.subscription().expect("Registrierung erwartet");
    assert_ne!(old, new);
    assert_eq!(channel, InputChannel::StopPlacement);
    assert_eq!(session.channel_for(old), None);
    assert_eq!(session.channel_for(new), Some(InputChannel::StopPlacement));

    let j = journal.borrow();
    assert_eq!(j.live_subscriptions.len(), 1);
    assert_eq!(j.subscription_for(InputChannel::StopPlacement), Some(new));
}

#[test]
fn test_destroy_releases_surface_and_is_idempotent() {
    let (mut session, journal, mut observer) = active_session(None);
    let (sub, _) = session.subscription().expect("Registrierung erwartet");

    session.destroy();
    session.destroy();

    assert_eq!(session.phase(), SessionPhase::Destroyed);
    assert_eq!(session.channel_for(sub), None);
    assert!(!session.toggle_edge(1, &mut observer));
    assert!(session.snapshot().is_empty());
    assert!(observer.snapshots.is_empty());

    let j = journal.borrow();
    assert_eq!(j.releases, 1);
    assert_eq!(j.mounted, 0);
    assert!(j.live_subscriptions.is_empty());
}

#[test]
fn test_destroyed_session_cannot_be_reactivated() {
    let (mut session, _journal, mut observer) = active_session(None);
    session.destroy();
    let mut host = RecordingSurfaceHost::new();

    assert!(session
        .activate(Some(&streets()), None, &mut host, &mut observer)
        .is_err());
    assert!(host.journal().borrow().mounts.is_empty());
}

#[test]
fn test_seeding_reconstructs_selection_and_stops() {
    let index = SegmentIndex::build(&streets().features);
    let e1 = index.get(1).expect("Kante erwartet").to_chain().to_vec();
    let e3 = index.get(3).expect("Kante erwartet").to_chain().to_vec();
    let initial = InitialRoute {
        trajectory: vec![e3, e1],
        stops: vec![[-58.1795, -26.1800], [f64::NAN, -26.18]],
    };

    let (session, journal, observer) = active_session(Some(&initial));

    assert_eq!(
        session.selection().iter().copied().collect::<Vec<_>>(),
        vec![3, 1]
    );
    assert_eq!(session.stops().len(), 1);
    assert!(observer.snapshots.is_empty());
    assert_eq!(
        journal.borrow().last_frame.as_ref().map(|f| f.stop_count),
        Some(1)
    );
}

#[test]
fn test_resync_replaces_selection_without_output() {
    let (mut session, journal, mut observer) = active_session(None);
    session.toggle_edge(1, &mut observer);
    let emitted = observer.snapshots.len();
    let mounts_before = journal.borrow().mounts.len();

    let chain = session
        .index()
        .and_then(|i| i.get(2))
        .expect("Kante erwartet")
        .to_chain()
        .to_vec();
    let changed = session.resync(&InitialRoute {
        trajectory: vec![chain],
        stops: Vec::new(),
    });

    assert!(changed);
    assert_eq!(
        session.selection().iter().copied().collect::<Vec<_>>(),
        vec![2]
    );
    assert_eq!(observer.snapshots.len(), emitted);
    assert_eq!(journal.borrow().mounts.len(), mounts_before);
}

#[test]
fn test_resync_with_own_output_is_skipped() {
    let (mut session, _journal, mut observer) = active_session(None);
    session.toggle_edge(1, &mut observer);
    session.toggle_edge(3, &mut observer);
    let last = observer.snapshots.last().cloned().expect("Snapshot erwartet");
    let echo = InitialRoute::from(last);

    assert!(!session.resync(&echo));
    assert_eq!(
        session.selection().iter().copied().collect::<Vec<_>>(),
        vec![1, 3]
    );
}

#[test]
fn test_resync_back_to_earlier_output_is_applied() {
    let (mut session, _journal, mut observer) = active_session(None);
    session.toggle_edge(1, &mut observer);
    let earlier = InitialRoute::from(
        observer.snapshots.last().cloned().expect("Snapshot erwartet"),
    );
    let other_chain = session
        .index()
        .and_then(|i| i.get(2))
        .expect("Kante erwartet")
        .to_chain()
        .to_vec();

    assert!(session.resync(&InitialRoute {
        trajectory: vec![other_chain],
        stops: Vec::new(),
    }));
    assert!(session.resync(&earlier));

    assert_eq!(
        session.selection().iter().copied().collect::<Vec<_>>(),
        vec![1]
    );
}

#[test]
fn test_resync_with_empty_route_clears_selection() {
    let (mut session, _journal, mut observer) = active_session(None);
    session.toggle_edge(1, &mut observer);

    assert!(session.resync(&InitialRoute::default()));
    assert!(session.selection().is_empty());
}

#[test]
fn test_clear_selection_keeps_stops_and_emits() {
    let (mut session, _journal, mut observer) = active_session(None);
    session.toggle_edge(1, &mut observer);
    session.set_mode(InputMode::PlaceStops);
    let edge = session
        .index()
        .and_then(|i| i.get(1))
        .expect("Kante erwartet")
        .clone();
    session.place_stop(edge.start, 32.0, &mut observer);

    assert!(session.clear_selection(&mut observer));

    let last = observer.snapshots.last().expect("Snapshot erwartet");
    assert!(last.trajectory.is_empty());
    assert_eq!(last.stops.len(), 1);
    approx::assert_relative_eq!(last.stops[0].coords[0], -58.1800, epsilon = 1e-9);
    approx::assert_relative_eq!(last.stops[0].coords[1], -26.1800, epsilon = 1e-9);
}

#[test]
fn test_dropping_session_releases_surface() {
    let (session, journal, _observer) = active_session(None);
    drop(session);

    let j = journal.borrow();
    assert_eq!(j.releases, 1);
    assert!(j.live_subscriptions.is_empty());
}
