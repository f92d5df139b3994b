//! Ability tree
//!
//! Abilities unlock along a prerequisite DAG. A node opens only when every
//! node leading into it is already open.

pub mod graph;

pub use graph::{AbilityGraph, AbilityNode, AbilityStatus, UnlockRejection};
