//! ArgumentGraph: the graph-consistency store.
//!
//! [`ArgumentGraph`] owns the argument nodes and the attack relation. Each
//! node carries both mirrored views of the relation (`attacks` and
//! `attacked_by`), and every mutating method leaves the two views symmetric
//! across the whole graph:
//!
//! ```text
//! b ∈ nodes[a].attacks  ⟺  a ∈ nodes[b].attacked_by
//! ```
//!
//! Relation entries may name ids that do not exist yet (dangling
//! references). They are kept on the existing endpoint, ignored by the
//! semantics engine, and mirrored onto the referent as soon as it is created.
//!
//! All mutations validate first and write second, so an error never leaves a
//! partially applied change behind. Nothing outside this module can reach the
//! relation mutably; the semantics engine and exporters only read.

use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::category::CategoryConfig;
use crate::error::CoreError;
use crate::id::ArgumentId;
use crate::node::{ArgumentNode, NodeSpec};

/// One directed attack: `source` attacks `target`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttackEdge {
    pub source: ArgumentId,
    pub target: ArgumentId,
}

/// Read-only view of the graph handed to exporters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Nodes in insertion order.
    pub nodes: Vec<ArgumentNode>,
    /// Unique edges derived from the relation, sorted by (source, target).
    pub edges: Vec<AttackEdge>,
}

/// The argument graph store.
#[derive(Debug, Clone, Default)]
pub struct ArgumentGraph {
    /// Static category configuration.
    categories: CategoryConfig,
    /// Nodes keyed by id, in insertion order.
    nodes: IndexMap<ArgumentId, ArgumentNode>,
}

impl ArgumentGraph {
    /// Creates an empty graph over the given categories.
    pub fn new(categories: CategoryConfig) -> Self {
        ArgumentGraph {
            categories,
            nodes: IndexMap::new(),
        }
    }

    /// Builds a graph from possibly asymmetric node data.
    ///
    /// Every spec is validated and ids must be unique. The relation is then
    /// closed symmetrically: an edge listed on either endpoint, in either
    /// direction, ends up on both endpoints that exist. Dangling references
    /// never fail the load.
    pub fn load(
        categories: CategoryConfig,
        specs: impl IntoIterator<Item = NodeSpec>,
    ) -> Result<Self, CoreError> {
        let specs: Vec<NodeSpec> = specs.into_iter().map(|s| s.normalized()).collect();

        let mut seen = HashSet::new();
        for spec in &specs {
            spec.validate(&categories)?;
            if !seen.insert(spec.id.clone()) {
                return Err(CoreError::DuplicateId {
                    id: spec.id.clone(),
                });
            }
        }

        let mut graph = ArgumentGraph::new(categories);
        for spec in &specs {
            graph
                .nodes
                .insert(spec.id.clone(), ArgumentNode::detached(spec));
        }
        for spec in &specs {
            graph.assert_edges(spec);
        }

        #[cfg(debug_assertions)]
        graph.assert_consistency();

        Ok(graph)
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn categories(&self) -> &CategoryConfig {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Option<&ArgumentNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ArgumentNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Inserts a new node and asserts its edges on both endpoints.
    ///
    /// Existing nodes that already reference the new id (forward references
    /// made before it existed) are mirrored onto it as well.
    pub fn create(&mut self, spec: NodeSpec) -> Result<(), CoreError> {
        let spec = spec.normalized();
        spec.validate(&self.categories)?;
        if self.nodes.contains_key(&spec.id) {
            return Err(CoreError::DuplicateId { id: spec.id });
        }

        self.nodes
            .insert(spec.id.clone(), ArgumentNode::detached(&spec));
        self.adopt_pending(&spec.id);
        self.assert_edges(&spec);

        #[cfg(debug_assertions)]
        self.assert_consistency();

        Ok(())
    }

    /// Replaces a node's label, category, description and attack lists.
    ///
    /// Every edge the node takes part in is retracted first, on every node,
    /// then the edges of the new spec are asserted. The id is immutable: the
    /// spec's id must be empty or equal to `id`.
    pub fn update(&mut self, id: &str, spec: NodeSpec) -> Result<(), CoreError> {
        let Some(current) = self.nodes.get(id) else {
            return Err(CoreError::NotFound {
                id: ArgumentId::new(id),
            });
        };
        let mut spec = spec.normalized();
        if spec.id.as_str().is_empty() {
            spec.id = current.id.clone();
        } else if spec.id != current.id {
            return Err(CoreError::validation(
                "id",
                format!("cannot change id '{}' to '{}'", current.id, spec.id),
            ));
        }
        spec.validate(&self.categories)?;

        self.retract_edges(&spec.id);
        if let Some(node) = self.nodes.get_mut(&spec.id) {
            node.label = spec.label.clone();
            node.category = spec.category.clone();
            node.description = spec.description.clone();
        }
        self.assert_edges(&spec);

        #[cfg(debug_assertions)]
        self.assert_consistency();

        Ok(())
    }

    /// Deletes a node and purges its id from every other node's relation
    /// lists. Returns the removed node.
    pub fn remove(&mut self, id: &str) -> Result<ArgumentNode, CoreError> {
        let Some(removed) = self.nodes.shift_remove(id) else {
            return Err(CoreError::NotFound {
                id: ArgumentId::new(id),
            });
        };
        for node in self.nodes.values_mut() {
            node.attacks.remove(id);
            node.attacked_by.remove(id);
        }

        #[cfg(debug_assertions)]
        self.assert_consistency();

        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    /// The canonical edge list: the union of both relation views, one entry
    /// per (source, target) pair, sorted. Includes dangling edges.
    pub fn edges(&self) -> Vec<AttackEdge> {
        let mut edges = BTreeSet::new();
        for node in self.nodes.values() {
            for target in &node.attacks {
                edges.insert(AttackEdge {
                    source: node.id.clone(),
                    target: target.clone(),
                });
            }
            for source in &node.attacked_by {
                edges.insert(AttackEdge {
                    source: source.clone(),
                    target: node.id.clone(),
                });
            }
        }
        edges.into_iter().collect()
    }

    /// Current nodes plus the canonical edge list.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.values().cloned().collect(),
            edges: self.edges(),
        }
    }

    /// Suggests the id for the next node: `A{n+1}`, where `n` is the largest
    /// number formed by the digits of any existing id.
    ///
    /// When `n + 1` overflows, the lowest free `A{k}` is suggested instead,
    /// so the result never names an existing node.
    pub fn suggest_next_id(&self) -> ArgumentId {
        let max = self
            .nodes
            .keys()
            .filter_map(|id| {
                let digits: String = id.as_str().chars().filter(char::is_ascii_digit).collect();
                digits.parse::<u64>().ok()
            })
            .max()
            .unwrap_or(0);
        if let Some(next) = max.checked_add(1) {
            return ArgumentId(format!("A{next}"));
        }

        (1..=u64::MAX)
            .map(|k| ArgumentId(format!("A{k}")))
            .find(|id| !self.nodes.contains_key(id))
            .unwrap_or_else(|| ArgumentId(format!("A{}", self.nodes.len())))
    }

    /// Checks that the two relation views agree for every pair of existing
    /// nodes.
    pub fn verify_symmetry(&self) -> Result<(), CoreError> {
        for node in self.nodes.values() {
            for target in &node.attacks {
                if let Some(t) = self.nodes.get(target) {
                    if !t.attacked_by.contains(&node.id) {
                        return Err(CoreError::GraphInconsistency {
                            reason: format!(
                                "'{}' attacks '{}' but is missing from its attacked_by",
                                node.id, target
                            ),
                        });
                    }
                }
            }
            for source in &node.attacked_by {
                if let Some(s) = self.nodes.get(source) {
                    if !s.attacks.contains(&node.id) {
                        return Err(CoreError::GraphInconsistency {
                            reason: format!(
                                "'{}' is attacked by '{}' but is missing from its attacks",
                                node.id, source
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Relation helpers
    // -----------------------------------------------------------------------

    /// Records `source → target` on whichever endpoints exist.
    fn link(&mut self, source: &ArgumentId, target: &ArgumentId) {
        if let Some(s) = self.nodes.get_mut(source) {
            s.attacks.insert(target.clone());
        }
        if let Some(t) = self.nodes.get_mut(target) {
            t.attacked_by.insert(source.clone());
        }
    }

    fn assert_edges(&mut self, spec: &NodeSpec) {
        for target in &spec.attacks {
            self.link(&spec.id, target);
        }
        for source in &spec.attacked_by {
            self.link(source, &spec.id);
        }
    }

    /// Removes every edge touching `id`, in both directions, on every node.
    fn retract_edges(&mut self, id: &ArgumentId) {
        for node in self.nodes.values_mut() {
            if node.id == *id {
                node.attacks.clear();
                node.attacked_by.clear();
            } else {
                node.attacks.remove(id);
                node.attacked_by.remove(id);
            }
        }
    }

    /// Mirrors forward references to a freshly inserted id onto its node.
    fn adopt_pending(&mut self, id: &ArgumentId) {
        let mut attackers = Vec::new();
        let mut targets = Vec::new();
        for node in self.nodes.values() {
            if node.id == *id {
                continue;
            }
            if node.attacks.contains(id) {
                attackers.push(node.id.clone());
            }
            if node.attacked_by.contains(id) {
                targets.push(node.id.clone());
            }
        }
        for attacker in &attackers {
            self.link(attacker, id);
        }
        for target in &targets {
            self.link(id, target);
        }
    }

    /// Panics when the relation views disagree. Debug builds only.
    #[cfg(debug_assertions)]
    fn assert_consistency(&self) {
        if let Err(err) = self.verify_symmetry() {
            panic!("{err}");
        }
    }
}
