pub mod config;
pub mod error;
pub mod types;

pub use config::{AbilityDefinition, AdversaryScaling, GameConfig, RosterEntry};
pub use error::{GameError, Result};
pub use types::{Attack, Health, Level, Side};
