//! Grenze zur Kartenoberfläche (Rendering + Pointer-Events).
//!
//! Die Oberfläche ist ein externer, zustandsbehafteter Kollaborateur. Die
//! Session besitzt genau eine Instanz und gibt sie beim Abbau synchron frei.
//! Selektion und Haltestellen-Platzierung haben getrennte Registrierungen;
//! pro Modus ist genau eine davon aktiv.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glam::DVec2;

use super::session::SessionKey;
use crate::core::EdgeId;
use crate::shared::RenderScene;

/// Eingabemodus des Editors: Klicks selektieren Kanten oder setzen Haltestellen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    /// Straßenabschnitte selektieren
    #[default]
    SelectSegments,
    /// Haltestellen setzen
    PlaceStops,
}

impl InputMode {
    /// Registrierungskanal, der in diesem Modus aktiv ist.
    pub fn channel(self) -> InputChannel {
        match self {
            InputMode::SelectSegments => InputChannel::EdgeSelection,
            InputMode::PlaceStops => InputChannel::StopPlacement,
        }
    }
}

/// Getrennte Event-Registrierungen der Oberfläche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputChannel {
    /// Klicks auf Kanten (Toggle)
    EdgeSelection,
    /// Klicks für Haltestellen-Platzierung
    StopPlacement,
}

/// Kennung einer Event-Registrierung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Von der Oberfläche gelieferte Pointer-Events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// Klick in die Karte
    Click {
        /// Registrierung, über die das Event geliefert wurde
        subscription: SubscriptionId,
        /// Klickpunkt in der Projektionsebene
        world_pos: DVec2,
        /// Von der Oberfläche bereits getroffene Kante (Feature-Hit-Test)
        hit_edge: Option<EdgeId>,
    },
}

/// Eine gemountete Kartenoberfläche.
pub trait MapSurface {
    /// Zeichnet die übergebene Szene (ersetzt die vorherige vollständig).
    fn present(&mut self, scene: &RenderScene);
    /// Registriert einen Event-Kanal.
    fn subscribe(&mut self, channel: InputChannel) -> SubscriptionId;
    /// Entfernt eine Registrierung. Unbekannte IDs sind ein No-op.
    fn unsubscribe(&mut self, subscription: SubscriptionId);
    /// Gibt alle Ressourcen frei. Mehrfacher Aufruf ist ein No-op.
    fn release(&mut self);
    /// Gibt `true` zurück, wenn die Oberfläche freigegeben wurde.
    fn is_released(&self) -> bool;
}

/// Bildschirm-Host, auf dem Oberflächen gemountet werden.
pub trait SurfaceHost {
    /// Mountet eine neue Oberfläche für die Session.
    fn mount(&mut self, key: &SessionKey) -> anyhow::Result<Box<dyn MapSurface>>;
}

/// Was eine `RecordingSurface` zuletzt gezeichnet hat.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentedFrame {
    /// Generation des gezeichneten Kantenindex
    pub index_generation: u64,
    /// Kanten im Selektions-Stil, in Selektionsreihenfolge
    pub selected_edge_ids: Vec<EdgeId>,
    /// Anzahl gezeichneter Haltestellen
    pub stop_count: usize,
}

/// Gemeinsames Protokoll aller Oberflächen eines `RecordingSurfaceHost`.
#[derive(Debug, Default)]
pub struct SurfaceJournal {
    /// Session-Keys in Mount-Reihenfolge
    pub mounts: Vec<SessionKey>,
    /// Anzahl aller `present`-Aufrufe
    pub presents: usize,
    /// Zuletzt gezeichneter Frame
    pub last_frame: Option<PresentedFrame>,
    /// Aktuell lebende Registrierungen
    pub live_subscriptions: HashMap<SubscriptionId, InputChannel>,
    /// Anzahl freigegebener Oberflächen
    pub releases: usize,
    /// Anzahl aktuell gemounteter (nicht freigegebener) Oberflächen
    pub mounted: usize,
    next_subscription: u64,
}

impl SurfaceJournal {
    /// Registrierung des Kanals, falls genau eine lebt.
    pub fn subscription_for(&self, channel: InputChannel) -> Option<SubscriptionId> {
        let mut matching = self
            .live_subscriptions
            .iter()
            .filter(|(_, c)| **c == channel)
            .map(|(id, _)| *id);
        let first = matching.next()?;
        matching.next().is_none().then_some(first)
    }
}

/// Headless-Host: protokolliert alle Oberflächen-Aufrufe.
///
/// Wird von der Binary und von Tests verwendet.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurfaceHost {
    journal: Rc<RefCell<SurfaceJournal>>,
    fail_mounts: bool,
}

impl RecordingSurfaceHost {
    /// Erstellt einen Host mit leerem Protokoll.
    pub fn new() -> Self {
        Self::default()
    }

    /// Host, dessen Mounts immer fehlschlagen (z.B. fehlender Container).
    pub fn failing() -> Self {
        Self {
            journal: Rc::default(),
            fail_mounts: true,
        }
    }

    /// Geteiltes Protokoll (bleibt gültig, auch wenn der Host verschoben wird).
    pub fn journal(&self) -> Rc<RefCell<SurfaceJournal>> {
        Rc::clone(&self.journal)
    }
}

impl SurfaceHost for RecordingSurfaceHost {
    fn mount(&mut self, key: &SessionKey) -> anyhow::Result<Box<dyn MapSurface>> {
        if self.fail_mounts {
            anyhow::bail!("Kartenoberfläche für {} konnte nicht gemountet werden", key);
        }
        {
            let mut journal = self.journal.borrow_mut();
            journal.mounts.push(*key);
            journal.mounted += 1;
        }
        Ok(Box::new(RecordingSurface {
            journal: Rc::clone(&self.journal),
            own_subscriptions: Vec::new(),
            released: false,
        }))
    }
}

/// Headless-Oberfläche eines `RecordingSurfaceHost`.
#[derive(Debug)]
pub struct RecordingSurface {
    journal: Rc<RefCell<SurfaceJournal>>,
    own_subscriptions: Vec<SubscriptionId>,
    released: bool,
}

impl MapSurface for RecordingSurface {
    fn present(&mut self, scene: &RenderScene) {
        if self.released {
            log::debug!("present() auf freigegebener Oberfläche ignoriert");
            return;
        }
        let mut journal = self.journal.borrow_mut();
        journal.presents += 1;
        journal.last_frame = Some(PresentedFrame {
            index_generation: scene.index.generation(),
            selected_edge_ids: scene.selected_edge_ids.iter().copied().collect(),
            stop_count: scene.stops.len(),
        });
    }

    fn subscribe(&mut self, channel: InputChannel) -> SubscriptionId {
        let mut journal = self.journal.borrow_mut();
        journal.next_subscription += 1;
        let id = SubscriptionId(journal.next_subscription);
        if !self.released {
            journal.live_subscriptions.insert(id, channel);
            self.own_subscriptions.push(id);
        }
        id
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        if let Some(pos) = self.own_subscriptions.iter().position(|s| *s == subscription) {
            self.own_subscriptions.swap_remove(pos);
            self.journal
                .borrow_mut()
                .live_subscriptions
                .remove(&subscription);
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let mut journal = self.journal.borrow_mut();
        for id in self.own_subscriptions.drain(..) {
            journal.live_subscriptions.remove(&id);
        }
        journal.releases += 1;
        journal.mounted = journal.mounted.saturating_sub(1);
    }

    fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for RecordingSurface {
    fn drop(&mut self) {
        self.release();
    }
}
