//! Gradual semantics for argweigh argument graphs.
//!
//! - [`hcategorizer`]: the weighted h-categorizer fixed-point solver
//! - [`aggregate`]: per-category means and the overall score
//!
//! [`evaluate`] runs both stages for one recompute cycle with a single
//! weight table, which is how callers are expected to use this crate.

pub mod aggregate;
pub mod hcategorizer;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use argweigh_core::{ArgumentGraph, CategoryKey, GlobalScores, ScoreMap, WeightTable};

pub use aggregate::aggregate;
pub use hcategorizer::{solve, Convergence, GradualSemantics, Solution, SolverConfig};

/// Result of one recompute cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Score of every node, in graph order.
    pub scores: ScoreMap,
    /// Mean score of every category that has nodes.
    pub category_means: IndexMap<CategoryKey, f64>,
    /// Overall score; absent for an empty graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
    pub convergence: Convergence,
}

impl Evaluation {
    /// The aggregate part, in snapshot document form.
    pub fn global_scores(&self) -> GlobalScores {
        GlobalScores {
            category_scores: self.category_means.clone(),
            final_score: self.final_score,
        }
    }
}

/// Solves and aggregates `graph` with one weight table.
pub fn evaluate(graph: &ArgumentGraph, weights: &WeightTable, config: &SolverConfig) -> Evaluation {
    let Solution {
        scores,
        convergence,
    } = solve(graph, weights, config);
    let GlobalScores {
        category_scores,
        final_score,
    } = aggregate(graph, &scores, weights);

    Evaluation {
        scores,
        category_means: category_scores,
        final_score,
        convergence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argweigh_core::{CategoryConfig, NodeSpec, SliderValue};

    #[test]
    fn evaluate_shares_one_weight_table_between_stages() {
        let categories = CategoryConfig::new()
            .with("eco", "Economic", "#e0b050")
            .with("env", "Environmental", "#5dba6f");
        let graph = ArgumentGraph::load(
            categories.clone(),
            vec![
                NodeSpec::new("E", "eco attacker", "eco").attacking(&["V"]),
                NodeSpec::new("V", "env target", "env"),
            ],
        )
        .unwrap();
        let weights = WeightTable::from_slider(&categories, SliderValue::new(0.25));
        let config = SolverConfig::default();

        let evaluation = evaluate(&graph, &weights, &config);
        let solved = solve(&graph, &weights, &config);
        let aggregated = aggregate(&graph, &solved.scores, &weights);

        assert_eq!(evaluation.scores, solved.scores);
        assert_eq!(evaluation.global_scores(), aggregated);
        // V = 1 / (1 + 1.5); final = (1.5·1.0 + 0.5·0.4) / 2.0
        assert!((evaluation.scores["V"] - 0.4).abs() < 1e-12);
        assert!((evaluation.final_score.unwrap() - 0.85).abs() < 1e-12);
    }

    #[test]
    fn evaluation_serializes_with_camel_case_keys() {
        let graph = ArgumentGraph::load(
            CategoryConfig::new().with("eco", "Economic", "#e0b050"),
            vec![NodeSpec::new("A", "a", "eco")],
        )
        .unwrap();
        let evaluation = evaluate(&graph, &WeightTable::default(), &SolverConfig::default());
        let value = serde_json::to_value(&evaluation).unwrap();
        assert_eq!(value["scores"]["A"], 1.0);
        assert_eq!(value["categoryMeans"]["eco"], 1.0);
        assert_eq!(value["finalScore"], 1.0);
        assert_eq!(value["convergence"]["converged"], true);
    }
}
