//! Encounter resolution and its collaborators

pub mod control;
pub mod events;
pub mod resolver;

pub use control::{
    AbilityChooser, AutoAdvance, CountingGate, GreedyChooser, ScriptedChooser, SkipAbilities,
    TurnGate,
};
pub use events::{EventLog, EventSink, GameEvent, NullSink};
pub use resolver::{DuelOutcome, EncounterResolver, SessionIo, SessionOutcome, SessionSummary};
