//! Ability prerequisite graph
//!
//! Abilities form a small DAG. Each node lists the abilities it opens up; an
//! ability can be unlocked only once every node pointing at it is unlocked.
//! Unlocking is one-way.

use std::fmt;

use ahash::AHashMap;
use serde::Serialize;

use crate::core::config::{AbilityConfig, AbilityDefinition};
use crate::core::error::{GameError, Result};

/// One ability and the abilities it leads to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityNode {
    pub name: String,
    pub unlocks: Vec<String>,
}

/// Why an unlock request was refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UnlockRejection {
    Unknown(String),
    AlreadyUnlocked(String),
    /// Carries the predecessors that are still locked
    PrerequisitesUnmet { ability: String, missing: Vec<String> },
}

impl fmt::Display for UnlockRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnlockRejection::Unknown(name) => write!(f, "unknown ability '{}'", name),
            UnlockRejection::AlreadyUnlocked(name) => write!(f, "'{}' is already unlocked", name),
            UnlockRejection::PrerequisitesUnmet { ability, missing } => write!(
                f,
                "'{}' requires {} first",
                ability,
                missing.join(", ")
            ),
        }
    }
}

/// Read-only view of one node for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityStatus {
    pub name: String,
    pub unlocked: bool,
    pub prerequisites: Vec<String>,
    /// Every prerequisite is unlocked
    pub available: bool,
}

/// The ability tree owned by a player
#[derive(Debug, Clone)]
pub struct AbilityGraph {
    nodes: Vec<AbilityNode>,
    index: AHashMap<String, usize>,
    /// Direct predecessors of each node, by index
    predecessors: Vec<Vec<usize>>,
    unlocked: Vec<bool>,
    root: usize,
}

impl AbilityGraph {
    /// The classic tree: strike and block branches off a root
    pub fn standard() -> Self {
        let config = AbilityConfig::default();
        Self::from_definitions(&config.root, &config.nodes)
            .expect("built-in ability tree is valid")
    }

    pub fn from_config(config: &AbilityConfig) -> Result<Self> {
        Self::from_definitions(&config.root, &config.nodes)
    }

    /// Build and validate a graph; `root` starts unlocked
    pub fn from_definitions(root: &str, definitions: &[AbilityDefinition]) -> Result<Self> {
        if definitions.is_empty() {
            return Err(GameError::InvalidAbilityTree("no abilities defined".into()));
        }

        let mut index = AHashMap::with_capacity(definitions.len());
        for (i, def) in definitions.iter().enumerate() {
            if index.insert(def.name.clone(), i).is_some() {
                return Err(GameError::InvalidAbilityTree(format!(
                    "duplicate ability '{}'",
                    def.name
                )));
            }
        }

        let root_idx = *index.get(root).ok_or_else(|| {
            GameError::InvalidAbilityTree(format!("root '{}' is not a declared ability", root))
        })?;

        let mut predecessors = vec![Vec::new(); definitions.len()];
        for (parent, def) in definitions.iter().enumerate() {
            for child in &def.unlocks {
                let child_idx = *index.get(child).ok_or_else(|| {
                    GameError::InvalidAbilityTree(format!(
                        "'{}' unlocks undeclared ability '{}'",
                        def.name, child
                    ))
                })?;
                if !predecessors[child_idx].contains(&parent) {
                    predecessors[child_idx].push(parent);
                }
            }
        }

        for (i, preds) in predecessors.iter().enumerate() {
            if i != root_idx && preds.is_empty() {
                tracing::warn!(
                    "ability '{}' has no prerequisites and is unlockable at any time",
                    definitions[i].name
                );
            }
        }

        let mut unlocked = vec![false; definitions.len()];
        unlocked[root_idx] = true;

        let nodes = definitions
            .iter()
            .map(|d| AbilityNode {
                name: d.name.clone(),
                unlocks: d.unlocks.clone(),
            })
            .collect();

        Ok(Self {
            nodes,
            index,
            predecessors,
            unlocked,
            root: root_idx,
        })
    }

    pub fn root(&self) -> &str {
        &self.nodes[self.root].name
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn is_unlocked(&self, name: &str) -> bool {
        self.index.get(name).is_some_and(|&i| self.unlocked[i])
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.iter().filter(|&&u| u).count()
    }

    /// Unlocked ability names in declaration order
    pub fn unlocked_names(&self) -> Vec<String> {
        self.nodes
            .iter()
            .zip(&self.unlocked)
            .filter(|(_, unlocked)| **unlocked)
            .map(|(n, _)| n.name.clone())
            .collect()
    }

    /// Direct successors of a node, in declaration order
    pub fn successors(&self, name: &str) -> Option<&[String]> {
        self.index.get(name).map(|&i| self.nodes[i].unlocks.as_slice())
    }

    /// Direct predecessors of a node
    pub fn prerequisites(&self, name: &str) -> Option<Vec<&str>> {
        let &i = self.index.get(name)?;
        Some(
            self.predecessors[i]
                .iter()
                .map(|&p| self.nodes[p].name.as_str())
                .collect(),
        )
    }

    /// True iff `name` is known and all its direct predecessors are unlocked
    ///
    /// A node with no predecessors is always eligible.
    pub fn can_unlock(&self, name: &str) -> bool {
        match self.index.get(name) {
            Some(&i) => self.missing_prerequisites(i).is_empty(),
            None => false,
        }
    }

    /// Unlock `name`; false with no side effect if it is not allowed
    pub fn unlock(&mut self, name: &str) -> bool {
        self.try_unlock(name).is_ok()
    }

    /// Unlock `name`, naming the reason on refusal
    pub fn try_unlock(&mut self, name: &str) -> std::result::Result<(), UnlockRejection> {
        let &i = self
            .index
            .get(name)
            .ok_or_else(|| UnlockRejection::Unknown(name.to_string()))?;

        if self.unlocked[i] {
            return Err(UnlockRejection::AlreadyUnlocked(name.to_string()));
        }

        let missing = self.missing_prerequisites(i);
        if !missing.is_empty() {
            return Err(UnlockRejection::PrerequisitesUnmet {
                ability: name.to_string(),
                missing,
            });
        }

        self.unlocked[i] = true;
        Ok(())
    }

    /// Every node with its lock state and prerequisites, in declaration order
    pub fn statuses(&self) -> Vec<AbilityStatus> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| AbilityStatus {
                name: node.name.clone(),
                unlocked: self.unlocked[i],
                prerequisites: self.predecessors[i]
                    .iter()
                    .map(|&p| self.nodes[p].name.clone())
                    .collect(),
                available: self.missing_prerequisites(i).is_empty(),
            })
            .collect()
    }

    fn missing_prerequisites(&self, i: usize) -> Vec<String> {
        self.predecessors[i]
            .iter()
            .filter(|&&p| !self.unlocked[p])
            .map(|&p| self.nodes[p].name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> AbilityGraph {
        AbilityGraph::from_definitions(
            "Base",
            &[
                AbilityDefinition::new("Base", &["Left", "Right"]),
                AbilityDefinition::new("Left", &["Apex"]),
                AbilityDefinition::new("Right", &["Apex"]),
                AbilityDefinition::new("Apex", &[]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_root_starts_unlocked() {
        let graph = AbilityGraph::standard();
        assert_eq!(graph.root(), "Raiz");
        assert!(graph.is_unlocked("Raiz"));
        assert_eq!(graph.unlocked_count(), 1);
        assert_eq!(graph.len(), 5);
        assert!(graph.contains("Bloqueio"));
        assert_eq!(
            graph.successors("Raiz").unwrap(),
            &["Golpe".to_string(), "Bloqueio".to_string()]
        );
    }

    #[test]
    fn test_power_strike_gated_by_strike() {
        let mut graph = AbilityGraph::standard();
        assert!(!graph.can_unlock("Golpe Poderoso"));
        assert!(!graph.unlock("Golpe Poderoso"));
        assert!(!graph.is_unlocked("Golpe Poderoso"));

        assert!(graph.unlock("Golpe"));
        assert!(graph.unlock("Golpe Poderoso"));
        assert!(!graph.unlock("Golpe Poderoso"));
        assert_eq!(graph.unlocked_count(), 3);
    }

    #[test]
    fn test_unknown_fails_closed() {
        let mut graph = AbilityGraph::standard();
        assert!(!graph.can_unlock("Bola de Fogo"));
        assert_eq!(
            graph.try_unlock("Bola de Fogo"),
            Err(UnlockRejection::Unknown("Bola de Fogo".into()))
        );
        assert_eq!(graph.unlocked_count(), 1);
    }

    #[test]
    fn test_rejection_reasons() {
        let mut graph = AbilityGraph::standard();
        assert_eq!(
            graph.try_unlock("Raiz"),
            Err(UnlockRejection::AlreadyUnlocked("Raiz".into()))
        );
        assert_eq!(
            graph.try_unlock("Investida com Escudo"),
            Err(UnlockRejection::PrerequisitesUnmet {
                ability: "Investida com Escudo".into(),
                missing: vec!["Bloqueio".into()],
            })
        );
    }

    #[test]
    fn test_diamond_requires_all_parents() {
        let mut graph = diamond();
        assert!(graph.unlock("Left"));
        assert!(!graph.can_unlock("Apex"));
        assert!(!graph.unlock("Apex"));

        assert!(graph.unlock("Right"));
        assert!(graph.can_unlock("Apex"));
        assert!(graph.unlock("Apex"));
        assert_eq!(graph.prerequisites("Apex").unwrap(), vec!["Left", "Right"]);
    }

    #[test]
    fn test_statuses_are_read_only_view() {
        let mut graph = AbilityGraph::standard();
        graph.unlock("Bloqueio");
        let statuses = graph.statuses();

        assert_eq!(statuses.len(), 5);
        assert_eq!(statuses[0].name, "Raiz");
        assert!(statuses[0].prerequisites.is_empty());

        let shield = statuses
            .iter()
            .find(|s| s.name == "Investida com Escudo")
            .unwrap();
        assert!(!shield.unlocked);
        assert!(shield.available);
        assert_eq!(shield.prerequisites, vec!["Bloqueio".to_string()]);

        let power = statuses.iter().find(|s| s.name == "Golpe Poderoso").unwrap();
        assert!(!power.available);
        assert_eq!(graph.unlocked_count(), 2);
    }

    #[test]
    fn test_rootless_node_is_eligible() {
        let mut graph = AbilityGraph::from_definitions(
            "Base",
            &[
                AbilityDefinition::new("Base", &[]),
                AbilityDefinition::new("Loner", &[]),
            ],
        )
        .unwrap();
        assert!(graph.can_unlock("Loner"));
        assert!(graph.unlock("Loner"));
    }

    #[test]
    fn test_invalid_definitions() {
        let dup = AbilityGraph::from_definitions(
            "A",
            &[AbilityDefinition::new("A", &[]), AbilityDefinition::new("A", &[])],
        );
        assert!(matches!(dup, Err(GameError::InvalidAbilityTree(_))));

        let dangling =
            AbilityGraph::from_definitions("A", &[AbilityDefinition::new("A", &["Ghost"])]);
        assert!(matches!(dangling, Err(GameError::InvalidAbilityTree(_))));

        let no_root = AbilityGraph::from_definitions("Z", &[AbilityDefinition::new("A", &[])]);
        assert!(matches!(no_root, Err(GameError::InvalidAbilityTree(_))));

        assert!(AbilityGraph::from_definitions("A", &[]).is_err());
    }
}
