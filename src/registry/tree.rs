//! Level-indexed adversary registry
//!
//! An unbalanced binary search tree keyed by adversary level, stored as an
//! arena of nodes. Every node holds all adversaries sharing its level, in
//! insertion order. Built once at startup; there is no removal.

use std::cmp::Ordering;

use crate::combat::Adversary;
use crate::core::config::{AdversaryScaling, RosterEntry};
use crate::core::types::Level;

/// Index of a node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

/// All adversaries of one level
#[derive(Debug, Clone)]
struct TierNode {
    level: Level,
    adversaries: Vec<Adversary>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl TierNode {
    fn new(adversary: Adversary) -> Self {
        Self {
            level: adversary.level(),
            adversaries: vec![adversary],
            left: None,
            right: None,
        }
    }
}

/// Registry of adversaries ordered by difficulty level
#[derive(Debug, Clone, Default)]
pub struct AdversaryRegistry {
    nodes: Vec<TierNode>,
    root: Option<NodeId>,
    count: usize,
}

impl AdversaryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from roster entries, inserted in order
    pub fn from_roster(roster: &[RosterEntry], scaling: &AdversaryScaling) -> Self {
        let mut registry = Self::new();
        for entry in roster {
            registry.insert(Adversary::scaled(entry.name.clone(), entry.level, scaling));
        }
        tracing::debug!(
            "Registry built: {} adversaries across {} tiers",
            registry.len(),
            registry.tier_count()
        );
        registry
    }

    /// Insert an adversary, appending to an existing tier of the same level
    pub fn insert(&mut self, adversary: Adversary) {
        self.count += 1;
        let level = adversary.level();

        let Some(mut current) = self.root else {
            self.root = Some(self.push_node(adversary));
            return;
        };

        loop {
            let node = &self.nodes[current.0];
            let next = match level.cmp(&node.level) {
                Ordering::Equal => {
                    self.nodes[current.0].adversaries.push(adversary);
                    return;
                }
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };

            match next {
                Some(child) => current = child,
                None => {
                    let id = self.push_node(adversary);
                    let node = &mut self.nodes[current.0];
                    if level < node.level {
                        node.left = Some(id);
                    } else {
                        node.right = Some(id);
                    }
                    return;
                }
            }
        }
    }

    /// All adversaries at exactly `level`
    pub fn find_exact(&self, level: Level) -> Option<&[Adversary]> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            current = match level.cmp(&node.level) {
                Ordering::Equal => return Some(&node.adversaries),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Adversaries of the smallest level strictly greater than `level`
    pub fn find_next_higher(&self, level: Level) -> Option<&[Adversary]> {
        self.next_higher_from(self.root, level)
            .map(|id| self.nodes[id.0].adversaries.as_slice())
    }

    /// Nodes at or below `target` are too weak, so go right. A stronger node
    /// is only a candidate if its left subtree has nothing tighter.
    fn next_higher_from(&self, start: Option<NodeId>, target: Level) -> Option<NodeId> {
        let mut current = start;
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            if node.level <= target {
                current = node.right;
            } else {
                return self.next_higher_from(node.left, target).or(Some(id));
            }
        }
        None
    }

    /// Exact tier if present, otherwise the next stronger one
    pub fn tier_at_or_above(&self, level: Level) -> Option<&[Adversary]> {
        self.find_exact(level).or_else(|| self.find_next_higher(level))
    }

    /// Total adversaries registered
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of distinct levels
    pub fn tier_count(&self) -> usize {
        self.nodes.len()
    }

    /// Every tier level in ascending order
    pub fn levels(&self) -> Vec<Level> {
        let mut levels = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut current = self.root;
        while current.is_some() || !stack.is_empty() {
            while let Some(id) = current {
                stack.push(id);
                current = self.nodes[id.0].left;
            }
            if let Some(id) = stack.pop() {
                levels.push(self.nodes[id.0].level);
                current = self.nodes[id.0].right;
            }
        }
        levels
    }

    /// Longest root-to-leaf path, in nodes
    pub fn height(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            max = max.max(depth);
            let node = &self.nodes[id.0];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        max
    }

    fn push_node(&mut self, adversary: Adversary) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TierNode::new(adversary));
        id
    }
}
