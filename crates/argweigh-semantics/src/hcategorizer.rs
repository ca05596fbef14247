//! Weighted h-categorizer (Besnard & Hunter 2008).
//!
//! ```text
//! score(a) = 1 / (1 + Σ_{b ∈ attacked_by(a)} w(cat(b)) · score(b))
//! ```
//!
//! Solved by synchronous (Jacobi) iteration from `score₀ = 1.0`: each pass
//! reads only the previous vector and writes a fresh one, so the result does
//! not depend on node order. Iteration stops once the largest change drops
//! below the tolerance or the iteration cap is reached; the last vector is
//! returned either way.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use argweigh_core::{ArgumentGraph, ArgumentId, ArgumentNode, ScoreMap, WeightTable};

/// Gradual semantics the solver can run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradualSemantics {
    /// Weighted Besnard–Hunter h-categorizer.
    #[default]
    HCategorizer,
}

/// Solver parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub semantics: GradualSemantics,
    /// Upper bound on iterations.
    pub max_iterations: usize,
    /// Stop once `max |Δscore| < tolerance`.
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            semantics: GradualSemantics::HCategorizer,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// How the iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Convergence {
    /// Passes actually run.
    pub iterations: usize,
    /// Largest score change in the last pass.
    pub max_delta: f64,
    /// `false` when the cap was hit first; the scores are then a best-effort
    /// approximation.
    pub converged: bool,
}

/// Scores computed by one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub scores: ScoreMap,
    pub convergence: Convergence,
}

/// Computes a score for every node of `graph`.
pub fn solve(graph: &ArgumentGraph, weights: &WeightTable, config: &SolverConfig) -> Solution {
    match config.semantics {
        GradualSemantics::HCategorizer => h_categorizer(graph, weights, config),
    }
}

/// The attack structure among existing nodes. Edge weights are the attacker
/// category weights, so each pass is a plain weighted sum.
fn attack_structure<'g>(
    graph: &'g ArgumentGraph,
    weights: &WeightTable,
) -> DiGraph<&'g ArgumentNode, f64> {
    let mut attack = DiGraph::with_capacity(graph.len(), 0);
    let mut index: HashMap<&ArgumentId, NodeIndex> = HashMap::with_capacity(graph.len());
    for node in graph.nodes() {
        index.insert(&node.id, attack.add_node(node));
    }

    for node in graph.nodes() {
        let target = index[&node.id];
        for attacker in &node.attacked_by {
            // Dangling attackers contribute nothing.
            let Some(&source) = index.get(attacker) else {
                continue;
            };
            let w = weights.weight(attack[source].category.as_str()).max(0.0);
            attack.add_edge(source, target, w);
        }
    }
    attack
}

fn h_categorizer(graph: &ArgumentGraph, weights: &WeightTable, config: &SolverConfig) -> Solution {
    let attack = attack_structure(graph, weights);
    let mut current = vec![1.0_f64; attack.node_count()];
    let mut convergence = Convergence {
        iterations: 0,
        max_delta: 0.0,
        converged: false,
    };

    for iteration in 1..=config.max_iterations {
        let next: Vec<f64> = attack
            .node_indices()
            .map(|idx| {
                let sum: f64 = attack
                    .edges_directed(idx, Direction::Incoming)
                    .map(|e| e.weight() * current[e.source().index()])
                    .sum();
                1.0 / (1.0 + sum)
            })
            .collect();

        let max_delta = next
            .iter()
            .zip(&current)
            .map(|(n, c)| (n - c).abs())
            .fold(0.0, f64::max);

        current = next;
        convergence.iterations = iteration;
        convergence.max_delta = max_delta;
        if max_delta < config.tolerance {
            convergence.converged = true;
            break;
        }
    }

    if convergence.converged {
        tracing::debug!(
            iterations = convergence.iterations,
            max_delta = convergence.max_delta,
            "h-categorizer converged"
        );
    } else {
        tracing::warn!(
            iterations = convergence.iterations,
            max_delta = convergence.max_delta,
            "h-categorizer hit the iteration cap before converging"
        );
    }

    let scores = attack
        .node_indices()
        .map(|idx| (attack[idx].id.clone(), current[idx.index()]))
        .collect();
    Solution {
        scores,
        convergence,
    }
}
