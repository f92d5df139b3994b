//! d20 Ladder - turn-based combat up a level-indexed ladder of adversaries

pub mod combat;
pub mod core;
pub mod encounter;
pub mod game;
pub mod registry;
pub mod skills;
pub mod ui;
