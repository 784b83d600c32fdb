//! Editor-Session: an einen Key gebundener Lebenszyklus einer Trayecto-Bearbeitung.
//!
//! Eine Session besitzt genau eine Kartenoberfläche, einen Kantenindex, eine
//! Selektion und eine Haltestellenliste. Wechselt der Session-Key, wird sie
//! komplett abgebaut und neu erstellt; geänderte Initialdaten unter gleichem
//! Key lösen nur einen Resync aus.

use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::route_matcher;
use super::selection::{SelectionController, SelectionSet};
use super::stop_placer::{self, Stop, StopPlacement};
use super::surface::{InputChannel, InputMode, MapSurface, SubscriptionId, SurfaceHost};
use crate::core::{CoordinateProjector, EdgeId, LonLat, MapView, SegmentIndex, StreetNetwork};
use crate::shared::{Chain, EditorOptions, RenderScene, RouteSnapshot};

/// Identität einer Bearbeitung; ein Wechsel erzwingt Abbau und Neuaufbau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKey {
    /// Bestehende Linie mit Backend-ID
    Route(u64),
    /// Neue, noch nicht gespeicherte Linie
    NewRoute,
    /// Sektor einer Streckensperrung
    ObstructionSector,
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKey::Route(id) => write!(f, "Linie {}", id),
            SessionKey::NewRoute => write!(f, "neue Linie"),
            SessionKey::ObstructionSector => write!(f, "Sperrsektor"),
        }
    }
}

/// Lebenszyklus-Phase einer Session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Keine Oberfläche, kein Index
    Uninitialized,
    /// Oberfläche gemountet, Index gebaut, Eingaben verdrahtet
    Active,
    /// Terminal; Oberfläche und Registrierungen freigegeben
    Destroyed,
}

/// Gespeicherte Daten, mit denen eine Session vorbelegt wird.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialRoute {
    /// Gespeicherte Ketten (`[lon, lat]`)
    pub trajectory: Vec<Chain>,
    /// Gespeicherte Haltestellen (`[lon, lat]`)
    pub stops: Vec<LonLat>,
}

impl InitialRoute {
    /// Gibt `true` zurück, wenn weder Ketten noch Haltestellen vorliegen.
    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty() && self.stops.is_empty()
    }

    /// Prüft, ob die Daten exakt einem zuvor emittierten Snapshot entsprechen.
    fn echoes(&self, snapshot: &RouteSnapshot) -> bool {
        self.trajectory == snapshot.trajectory
            && self.stops.len() == snapshot.stops.len()
            && self
                .stops
                .iter()
                .zip(&snapshot.stops)
                .all(|(a, b)| *a == b.coords)
    }
}

impl From<RouteSnapshot> for InitialRoute {
    fn from(snapshot: RouteSnapshot) -> Self {
        Self {
            trajectory: snapshot.trajectory,
            stops: snapshot.stops.into_iter().map(|s| s.coords).collect(),
        }
    }
}

/// Empfänger der Ausgabe (`trajectory`, `stops`) nach jeder Änderung.
pub trait RouteObserver {
    /// Wird synchron nach jeder erfolgreichen Änderung aufgerufen.
    fn route_changed(&mut self, snapshot: &RouteSnapshot);
}

impl<F> RouteObserver for F
where
    F: FnMut(&RouteSnapshot),
{
    fn route_changed(&mut self, snapshot: &RouteSnapshot) {
        self(snapshot)
    }
}

/// Eine Bearbeitungssession.
pub struct EditorSession {
    key: SessionKey,
    phase: SessionPhase,
    options: EditorOptions,
    view: MapView,
    mode: InputMode,
    surface: Option<Box<dyn MapSurface>>,
    subscription: Option<(SubscriptionId, InputChannel)>,
    index: Option<Arc<SegmentIndex>>,
    selection: SelectionController,
    stops: Vec<Stop>,
    last_emitted: Option<RouteSnapshot>,
}

impl EditorSession {
    /// Erstellt eine Session im Zustand `Uninitialized`.
    pub fn new(key: SessionKey, options: EditorOptions, view: MapView, mode: InputMode) -> Self {
        Self {
            key,
            phase: SessionPhase::Uninitialized,
            options,
            view,
            mode,
            surface: None,
            subscription: None,
            index: None,
            selection: SelectionController::new(),
            stops: Vec::new(),
            last_emitted: None,
        }
    }

    /// Uninitialized → Active.
    ///
    /// Baut den Kantenindex, mountet die Oberfläche und belegt Selektion und
    /// Haltestellen aus `initial` vor. Ohne Straßendaten oder bei einem
    /// fehlgeschlagenen Mount bleibt die Session `Uninitialized` und meldet
    /// einmalig einen leeren Snapshot.
    pub fn activate(
        &mut self,
        streets: Option<&StreetNetwork>,
        initial: Option<&InitialRoute>,
        host: &mut dyn SurfaceHost,
        observer: &mut dyn RouteObserver,
    ) -> anyhow::Result<()> {
        if self.phase != SessionPhase::Uninitialized {
            anyhow::bail!(
                "Session {} kann nicht aus Phase {:?} aktiviert werden",
                self.key,
                self.phase
            );
        }

        if let Err(e) = self.try_activate(streets, host) {
            log::warn!("Session {} nicht aktiviert: {:#}", self.key, e);
            self.emit_to(observer, RouteSnapshot::empty());
            return Err(e);
        }

        if let Some(initial) = initial {
            self.seed(initial);
        }
        self.present();

        log::info!(
            "Session {} aktiv: {} Kanten, {} selektiert, {} Haltestellen",
            self.key,
            self.index.as_ref().map_or(0, |i| i.len()),
            self.selection.len(),
            self.stops.len()
        );
        Ok(())
    }

    fn try_activate(
        &mut self,
        streets: Option<&StreetNetwork>,
        host: &mut dyn SurfaceHost,
    ) -> anyhow::Result<()> {
        let streets = streets.context("Keine Straßendaten geladen")?;
        let index = SegmentIndex::build(&streets.features);
        if index.is_empty() {
            log::warn!("Kantenindex für Session {} ist leer", self.key);
        }

        let mut surface = host
            .mount(&self.key)
            .with_context(|| format!("Mount für Session {} fehlgeschlagen", self.key))?;
        let channel = self.mode.channel();
        let subscription = surface.subscribe(channel);

        self.index = Some(Arc::new(index));
        self.surface = Some(surface);
        self.subscription = Some((subscription, channel));
        self.phase = SessionPhase::Active;
        Ok(())
    }

    /// Active → Destroyed. Gibt Oberfläche und Registrierungen synchron frei.
    ///
    /// Idempotent; auch aus `Uninitialized` erreichbar.
    pub fn destroy(&mut self) {
        if self.phase == SessionPhase::Destroyed {
            return;
        }
        if let Some(mut surface) = self.surface.take() {
            if let Some((subscription, _)) = self.subscription.take() {
                surface.unsubscribe(subscription);
            }
            surface.release();
        }
        self.subscription = None;
        self.index = None;
        self.phase = SessionPhase::Destroyed;
        log::info!("Session {} abgebaut", self.key);
    }

    /// Belegt Selektion und Haltestellen unter gleichem Key neu.
    ///
    /// Kein Neuaufbau von Index oder Oberfläche, keine Ausgabe. Entsprechen
    /// die Daten dem zuletzt emittierten Snapshot, passiert nichts.
    /// Gibt `true` zurück, wenn neu belegt wurde.
    pub fn resync(&mut self, initial: &InitialRoute) -> bool {
        if self.phase != SessionPhase::Active {
            log::debug!("Resync für inaktive Session {} ignoriert", self.key);
            return false;
        }
        if self
            .last_emitted
            .as_ref()
            .is_some_and(|emitted| initial.echoes(emitted))
        {
            log::debug!("Resync übersprungen: Daten entsprechen letzter Ausgabe");
            return false;
        }

        self.seed(initial);
        // Neuer Stand stammt vom Aufrufer; frühere Ausgabe ist kein Echo mehr
        self.last_emitted = None;
        self.present();
        true
    }

    fn seed(&mut self, initial: &InitialRoute) {
        let Some(index) = self.index.as_ref() else {
            return;
        };
        let matched = route_matcher::reconstruct(
            index,
            &initial.trajectory,
            &self.options.match_options(),
        );
        self.selection.replace(matched.edge_ids.iter().copied());

        let before = initial.stops.len();
        self.stops = initial
            .stops
            .iter()
            .filter_map(|coords| CoordinateProjector::project(*coords))
            .map(|position| Stop { position })
            .collect();
        if self.stops.len() < before {
            log::debug!(
                "{} gespeicherte Haltestellen mit ungültigen Koordinaten verworfen",
                before - self.stops.len()
            );
        }
        log::debug!(
            "Session {} vorbelegt: {} Kanten aus {} Ketten",
            self.key,
            matched.edge_ids.len(),
            matched.matched_chains + matched.dropped_chains
        );
    }

    /// Wechselt den Eingabemodus und tauscht die Event-Registrierung.
    pub fn set_mode(&mut self, mode: InputMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        if let Some(surface) = self.surface.as_mut() {
            if let Some((old, _)) = self.subscription.take() {
                surface.unsubscribe(old);
            }
            let channel = mode.channel();
            self.subscription = Some((surface.subscribe(channel), channel));
        }
        log::debug!("Session {}: Modus {:?}", self.key, mode);
        self.present();
    }

    /// Kanal der Registrierung, falls sie die aktuell lebende ist.
    ///
    /// Events veralteter Registrierungen liefern `None` und werden verworfen.
    pub fn channel_for(&self, subscription: SubscriptionId) -> Option<InputChannel> {
        match self.subscription {
            Some((live, channel)) if live == subscription && self.is_active() => Some(channel),
            _ => None,
        }
    }

    /// Kehrt die Zugehörigkeit einer Kante um und meldet die neue Route.
    pub fn toggle_edge(&mut self, edge_id: EdgeId, observer: &mut dyn RouteObserver) -> bool {
        if !self.accepts(InputMode::SelectSegments) {
            return false;
        }
        if !self.index.as_ref().is_some_and(|i| i.contains(edge_id)) {
            log::debug!("Unbekannte Kante {} ignoriert", edge_id);
            return false;
        }
        self.selection.toggle(edge_id);
        self.present();
        self.emit(observer);
        true
    }

    /// Sucht die nächste Kante zum Klickpunkt und kehrt ihre Zugehörigkeit um.
    pub fn pick_and_toggle(
        &mut self,
        world_pos: DVec2,
        max_distance: f64,
        observer: &mut dyn RouteObserver,
    ) -> bool {
        let hit = self
            .index
            .as_ref()
            .and_then(|index| index.pick(world_pos, max_distance));
        match hit {
            Some(hit) => self.toggle_edge(hit.edge_id, observer),
            None => false,
        }
    }

    /// Setzt eine Haltestelle auf die nächste selektierte Kante.
    pub fn place_stop(
        &mut self,
        world_pos: DVec2,
        threshold: f64,
        observer: &mut dyn RouteObserver,
    ) -> Option<StopPlacement> {
        if !self.accepts(InputMode::PlaceStops) {
            return None;
        }
        let index = self.index.as_ref()?;
        let placement =
            stop_placer::place(world_pos, &self.selection.snapshot(), index, threshold)?;
        self.stops.push(placement.stop);
        self.present();
        self.emit(observer);
        Some(placement)
    }

    /// Hebt die komplette Kantenauswahl auf (Haltestellen bleiben).
    pub fn clear_selection(&mut self, observer: &mut dyn RouteObserver) -> bool {
        if !self.is_active() {
            return false;
        }
        self.selection.clear();
        self.present();
        self.emit(observer);
        true
    }

    /// Übernimmt eine neue Kartenansicht.
    pub fn set_view(&mut self, view: MapView) {
        self.view = view;
        self.present();
    }

    /// Aktuelle Ausgabe; leer, solange die Session nicht aktiv ist.
    pub fn snapshot(&self) -> RouteSnapshot {
        match (&self.index, self.phase) {
            (Some(index), SessionPhase::Active) => RouteSnapshot {
                trajectory: self.selection.trajectory(index),
                stops: self.stops.iter().map(Stop::to_coords).collect(),
            },
            _ => RouteSnapshot::empty(),
        }
    }

    /// Baut die Render-Szene; `None` ohne Index.
    pub fn render_scene(&self) -> Option<RenderScene> {
        let index = self.index.as_ref()?;
        Some(RenderScene {
            index: Arc::clone(index),
            selected_edge_ids: self.selection.snapshot(),
            stops: Arc::new(self.stops.iter().map(|s| s.position).collect()),
            input_mode: self.mode,
            view: self.view,
            options: self.options.clone(),
        })
    }

    fn present(&mut self) {
        if self.phase != SessionPhase::Active {
            return;
        }
        let Some(scene) = self.render_scene() else {
            return;
        };
        if let Some(surface) = self.surface.as_mut() {
            surface.present(&scene);
        }
    }

    fn accepts(&self, mode: InputMode) -> bool {
        if !self.is_active() {
            log::debug!("Eingabe für inaktive Session {} ignoriert", self.key);
            return false;
        }
        if self.mode != mode {
            log::debug!("Eingabe für Modus {:?} im Modus {:?} ignoriert", mode, self.mode);
            return false;
        }
        true
    }

    fn emit(&mut self, observer: &mut dyn RouteObserver) {
        let snapshot = self.snapshot();
        self.emit_to(observer, snapshot);
    }

    fn emit_to(&mut self, observer: &mut dyn RouteObserver, snapshot: RouteSnapshot) {
        observer.route_changed(&snapshot);
        self.last_emitted = Some(snapshot);
    }

    /// Session-Key
    pub fn key(&self) -> SessionKey {
        self.key
    }

    /// Aktuelle Phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Gibt `true` zurück, wenn die Session aktiv ist.
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    /// Aktueller Eingabemodus
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Aktuelle Kartenansicht
    pub fn view(&self) -> MapView {
        self.view
    }

    /// Kantenindex (nur im Zustand `Active`)
    pub fn index(&self) -> Option<&Arc<SegmentIndex>> {
        self.index.as_ref()
    }

    /// Snapshot der Kantenauswahl
    pub fn selection(&self) -> SelectionSet {
        self.selection.snapshot()
    }

    /// Haltestellen in Einfügereihenfolge
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Lebende Registrierung und ihr Kanal
    pub fn subscription(&self) -> Option<(SubscriptionId, InputChannel)> {
        self.subscription
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests;
