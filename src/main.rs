//! Trayecto-Editor (headless).
//!
//! Baut eine Session aus Straßennetz und optionalem Linien-Datensatz auf,
//! gleicht den gespeicherten Trayecto ab und gibt das Ergebnis als JSON aus.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;
use bus_route_editor::io::{load_route_record, load_street_network};
use bus_route_editor::{
    EditorController, EditorIntent, EditorOptions, EditorState, MapView, RecordingSurfaceHost,
    RouteRecord, RouteSnapshot, SessionKey,
};
use serde::Serialize;

/// Zusammenfassung für die Ausgabe.
#[derive(Serialize)]
struct Summary {
    session: SessionKey,
    phase: String,
    streets: usize,
    skipped_streets: usize,
    edges: usize,
    selected_edges: usize,
    stops: usize,
    route_edits: usize,
    view: MapView,
    route: RouteRecord,
}

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Trayecto-Editor v{} startet...", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let streets_path: PathBuf = args
        .next()
        .context("Aufruf: bus-route-editor <calles.geojson> [linea.json]")?
        .into();
    let record_path: Option<PathBuf> = args.next().map(PathBuf::from);

    let options = EditorOptions::load_from_file(&EditorOptions::config_path());

    // Fehlende Straßendaten führen zum leeren Zustand, nicht zum Abbruch
    let streets = match load_street_network(&streets_path) {
        Ok(network) => Some(Arc::new(network)),
        Err(e) => {
            log::error!("Straßennetz nicht geladen: {:#}", e);
            None
        }
    };
    let record = match &record_path {
        Some(path) => Some(load_route_record(path)?),
        None => None,
    };

    let key = match record.as_ref().and_then(|r| r.id) {
        Some(id) => SessionKey::Route(id),
        None => SessionKey::NewRoute,
    };

    let last_output: Rc<RefCell<Option<RouteSnapshot>>> = Rc::default();
    let sink = Rc::clone(&last_output);
    let observer = Box::new(move |snapshot: &RouteSnapshot| {
        *sink.borrow_mut() = Some(snapshot.clone());
    });

    let mut state =
        EditorState::with_options(Box::new(RecordingSurfaceHost::new()), observer, options);
    let mut controller = EditorController::new();
    controller.handle_intent(
        &mut state,
        EditorIntent::OpenEditorRequested {
            key,
            streets: streets.clone(),
            initial: record.as_ref().map(RouteRecord::initial_route),
        },
    )?;

    let snapshot = last_output
        .borrow_mut()
        .take()
        .unwrap_or_else(|| state.snapshot());
    let session = state.session.as_ref();
    let summary = Summary {
        session: key,
        phase: state
            .session_phase()
            .map_or_else(|| "Closed".to_string(), |p| format!("{:?}", p)),
        streets: streets.as_ref().map_or(0, |s| s.len()),
        skipped_streets: streets.as_ref().map_or(0, |s| s.skipped),
        edges: session.and_then(|s| s.index()).map_or(0, |i| i.len()),
        selected_edges: session.map_or(0, |s| s.selection().len()),
        stops: session.map_or(0, |s| s.stops().len()),
        route_edits: state.command_log.route_edits(),
        view: session.map_or(state.view, |s| s.view()),
        route: RouteRecord::from_snapshot(record.as_ref().and_then(|r| r.id), &snapshot),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);

    controller.handle_intent(&mut state, EditorIntent::CloseRequested)?;
    Ok(())
}
