//! Category aggregation.
//!
//! Each category with at least one node gets the plain mean of its members'
//! scores. The overall score is the mean of those category means, weighted
//! by the category weights unless all present categories weigh the same.

use indexmap::IndexMap;

use argweigh_core::weights::WEIGHT_EPSILON;
use argweigh_core::{ArgumentGraph, CategoryKey, GlobalScores, ScoreMap, WeightTable};

/// Aggregates node scores into per-category means and a final score.
///
/// `weights` must be the table the scores were solved with. Categories
/// without nodes are omitted; an empty graph has no final score.
pub fn aggregate(graph: &ArgumentGraph, scores: &ScoreMap, weights: &WeightTable) -> GlobalScores {
    let mut totals: IndexMap<&CategoryKey, (f64, usize)> = IndexMap::new();
    for node in graph.nodes() {
        let score = scores.get(&node.id).copied().unwrap_or(0.0);
        let entry = totals.entry(&node.category).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }

    let category_scores: IndexMap<CategoryKey, f64> = totals
        .into_iter()
        .map(|(key, (sum, count))| (key.clone(), sum / count as f64))
        .collect();
    let final_score = final_score(&category_scores, weights);

    GlobalScores {
        category_scores,
        final_score,
    }
}

fn final_score(means: &IndexMap<CategoryKey, f64>, weights: &WeightTable) -> Option<f64> {
    if means.is_empty() {
        return None;
    }
    let equal_mean = means.values().sum::<f64>() / means.len() as f64;

    let present: Vec<f64> = means
        .keys()
        .map(|key| weights.weight(key.as_str()).max(0.0))
        .collect();
    let total: f64 = present.iter().sum();
    if weights.is_balanced_over(means.keys()) || total < WEIGHT_EPSILON {
        return Some(equal_mean);
    }

    let weighted: f64 = means.values().zip(&present).map(|(m, w)| m * w).sum();
    Some(weighted / total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argweigh_core::{ArgumentId, CategoryConfig, NodeSpec, SliderValue};

    fn categories() -> CategoryConfig {
        CategoryConfig::new()
            .with("eco", "Economic", "#e0b050")
            .with("env", "Environmental", "#5dba6f")
            .with("care", "Care", "#7777e0")
    }

    fn graph() -> ArgumentGraph {
        ArgumentGraph::load(
            categories(),
            vec![
                NodeSpec::new("E1", "e1", "eco"),
                NodeSpec::new("E2", "e2", "eco"),
                NodeSpec::new("V1", "v1", "env"),
            ],
        )
        .unwrap()
    }

    fn scores(values: &[(&str, f64)]) -> ScoreMap {
        values
            .iter()
            .map(|(id, s)| (ArgumentId::new(*id), *s))
            .collect()
    }

    #[test]
    fn category_means_skip_empty_categories() {
        let result = aggregate(
            &graph(),
            &scores(&[("E1", 1.0), ("E2", 0.5), ("V1", 0.25)]),
            &WeightTable::balanced(&categories()),
        );
        assert_eq!(result.category_scores.len(), 2);
        assert_eq!(result.category_scores["eco"], 0.75);
        assert_eq!(result.category_scores["env"], 0.25);
        assert!(!result.category_scores.contains_key("care"));
    }

    #[test]
    fn balanced_final_score_is_plain_mean_of_means() {
        let result = aggregate(
            &graph(),
            &scores(&[("E1", 1.0), ("E2", 0.5), ("V1", 0.25)]),
            &WeightTable::balanced(&categories()),
        );
        assert_eq!(result.final_score, Some(0.5));
    }

    #[test]
    fn weight_of_absent_category_does_not_unbalance() {
        let weights = WeightTable::balanced(&categories()).with("care", 5.0);
        let result = aggregate(
            &graph(),
            &scores(&[("E1", 1.0), ("E2", 0.5), ("V1", 0.25)]),
            &weights,
        );
        assert_eq!(result.final_score, Some(0.5));
    }

    #[test]
    fn unbalanced_final_score_is_weighted() {
        let weights = WeightTable::from_slider(&categories(), SliderValue::new(0.25));
        let result = aggregate(
            &graph(),
            &scores(&[("E1", 1.0), ("E2", 0.5), ("V1", 0.25)]),
            &weights,
        );
        // eco 1.5, env 0.5: (1.5·0.75 + 0.5·0.25) / 2.0
        let expected = (1.5 * 0.75 + 0.5 * 0.25) / 2.0;
        assert!((result.final_score.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_total_weight_falls_back_to_plain_mean() {
        let only_env = ArgumentGraph::load(categories(), vec![NodeSpec::new("V1", "v1", "env")])
            .unwrap();
        let weights = WeightTable::default().with("env", 0.0).with("eco", 2.0);
        let result = aggregate(&only_env, &scores(&[("V1", 0.4)]), &weights);
        assert_eq!(result.final_score, Some(0.4));
    }

    #[test]
    fn empty_graph_has_no_final_score() {
        let empty = ArgumentGraph::new(categories());
        let result = aggregate(&empty, &ScoreMap::new(), &WeightTable::default());
        assert!(result.category_scores.is_empty());
        assert_eq!(result.final_score, None);
    }

    #[test]
    fn missing_score_counts_as_zero() {
        let result = aggregate(
            &graph(),
            &scores(&[("E1", 1.0)]),
            &WeightTable::balanced(&categories()),
        );
        assert_eq!(result.category_scores["eco"], 0.5);
        assert_eq!(result.category_scores["env"], 0.0);
    }
}
