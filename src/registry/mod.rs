//! Difficulty-indexed adversary registry

pub mod tree;

pub use tree::AdversaryRegistry;
