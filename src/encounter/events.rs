//! Session events and the sinks that receive them

use serde::Serialize;

use crate::combat::AttackReport;
use crate::core::types::{Health, Level};
use crate::skills::{AbilityStatus, UnlockRejection};

/// Something the presentation layer may want to show
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum GameEvent {
    // Tiers
    TierEntered { level: Level, adversaries: Vec<String> },
    TierDangerous { tier_level: Level, player_level: Level, factor: f32 },
    TierCleared { level: Level },

    // Duels
    DuelStarted { adversary: String, level: Level, health: Health },
    Attack(AttackReport),
    AdversaryDefeated { name: String },
    PlayerDefeated { slain_by: String },

    // Progression
    LevelUp { level: Level, max_health: Health, attack: u32 },
    AbilityTree { statuses: Vec<AbilityStatus> },
    AbilityUnlocked { name: String },
    UnlockRejected(UnlockRejection),

    // End
    Victory { level: Level },
}

/// Write-only destination for events
pub trait EventSink {
    fn emit(&mut self, event: &GameEvent);
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &GameEvent) {}
}

/// Records every event in order
#[derive(Clone, Debug, Default, Serialize)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attacks(&self) -> impl Iterator<Item = &AttackReport> {
        self.events.iter().filter_map(|e| match e {
            GameEvent::Attack(report) => Some(report),
            _ => None,
        })
    }

    pub fn entered_tiers(&self) -> Vec<Level> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::TierEntered { level, .. } => Some(*level),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
