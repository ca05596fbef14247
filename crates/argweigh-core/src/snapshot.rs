//! The JSON snapshot document exchanged with collaborators.
//!
//! ```text
//! {
//!   "colors": { "<cat>": "<hex>", ... },
//!   "cats":   { "<cat>": "<label>", ... },
//!   "globalScores": { "categoryScores": { ... }, "finalScore": 0.61 },
//!   "nodes": [ { "id", "label", "cat", "score", "desc", "attacks", "attackedBy" } ]
//! }
//! ```
//!
//! On import, scores are derived state and ignored. On export, every node's
//! `attacks`/`attackedBy` lists are regenerated from the graph's canonical
//! edge list rather than copied from node fields.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::category::CategoryConfig;
use crate::error::CoreError;
use crate::graph::ArgumentGraph;
use crate::id::{ArgumentId, CategoryKey};
use crate::node::NodeSpec;

/// Per-argument scores keyed by id, in graph order.
pub type ScoreMap = IndexMap<ArgumentId, f64>;

/// Per-category mean scores and the overall score of one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalScores {
    pub category_scores: IndexMap<CategoryKey, f64>,
    /// Absent when the graph has no nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
}

/// One node entry of a snapshot document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotNode {
    pub id: ArgumentId,
    pub label: String,
    pub cat: CategoryKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default)]
    pub attacks: Vec<ArgumentId>,
    #[serde(default)]
    pub attacked_by: Vec<ArgumentId>,
}

impl From<SnapshotNode> for NodeSpec {
    fn from(node: SnapshotNode) -> Self {
        NodeSpec {
            id: node.id,
            label: node.label,
            category: node.cat,
            description: node.desc,
            attacks: node.attacks,
            attacked_by: node.attacked_by,
        }
    }
}

/// A complete snapshot document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDocument {
    #[serde(default)]
    pub colors: IndexMap<CategoryKey, String>,
    #[serde(default)]
    pub cats: IndexMap<CategoryKey, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_scores: Option<GlobalScores>,
    #[serde(default)]
    pub nodes: Vec<SnapshotNode>,
}

impl SnapshotDocument {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The category configuration described by `cats` and `colors`.
    pub fn category_config(&self) -> CategoryConfig {
        CategoryConfig::from_maps(&self.cats, &self.colors)
    }

    /// Builds the graph described by this document. Scores are ignored.
    pub fn to_graph(&self) -> Result<ArgumentGraph, CoreError> {
        let specs = self.nodes.iter().cloned().map(NodeSpec::from);
        ArgumentGraph::load(self.category_config(), specs)
    }

    /// Exports a graph together with the scores of its latest evaluation.
    ///
    /// Relation lists come from [`ArgumentGraph::edges`], so the document is
    /// symmetric by construction.
    pub fn export(
        graph: &ArgumentGraph,
        scores: Option<&ScoreMap>,
        global_scores: Option<GlobalScores>,
    ) -> Self {
        let mut attacks: HashMap<&ArgumentId, Vec<ArgumentId>> = HashMap::new();
        let mut attacked_by: HashMap<&ArgumentId, Vec<ArgumentId>> = HashMap::new();
        let edges = graph.edges();
        for edge in &edges {
            attacks
                .entry(&edge.source)
                .or_default()
                .push(edge.target.clone());
            attacked_by
                .entry(&edge.target)
                .or_default()
                .push(edge.source.clone());
        }

        let nodes = graph
            .nodes()
            .map(|node| SnapshotNode {
                id: node.id.clone(),
                label: node.label.clone(),
                cat: node.category.clone(),
                score: scores.and_then(|s| s.get(&node.id).copied()),
                desc: node.description.clone(),
                attacks: attacks.remove(&node.id).unwrap_or_default(),
                attacked_by: attacked_by.remove(&node.id).unwrap_or_default(),
            })
            .collect();

        let categories = graph.categories();
        SnapshotDocument {
            colors: categories.colors(),
            cats: categories.labels(),
            global_scores,
            nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r##"{
        "colors": { "eco": "#e0b050", "env": "#5dba6f" },
        "cats": { "eco": "Economic", "env": "Environmental" },
        "nodes": [
            { "id": "A1", "label": "Jobs", "cat": "eco", "score": 0.25,
              "attacks": ["A2"], "attackedBy": [] },
            { "id": "A2", "label": "Forests\nmatter", "cat": "env", "desc": "trees",
              "attacks": [], "attackedBy": ["A3"] },
            { "id": "A3", "label": "Rivers", "cat": "env" }
        ]
    }"##;

    #[test]
    fn parses_document_and_builds_symmetric_graph() {
        let doc = SnapshotDocument::from_json(DOC).unwrap();
        assert_eq!(doc.category_config().len(), 2);

        let graph = doc.to_graph().unwrap();
        let a2 = graph.get("A2").unwrap();
        assert!(a2.attacked_by.contains("A1"));
        assert!(a2.attacked_by.contains("A3"));
        assert!(graph.get("A3").unwrap().attacks.contains("A2"));
        assert_eq!(a2.label, "Forests\nmatter");
        assert_eq!(a2.description.as_deref(), Some("trees"));
    }

    #[test]
    fn export_regenerates_relations_from_edges() {
        let graph = SnapshotDocument::from_json(DOC).unwrap().to_graph().unwrap();
        let mut scores = ScoreMap::new();
        scores.insert(ArgumentId::new("A1"), 1.0);

        let out = SnapshotDocument::export(&graph, Some(&scores), None);
        let a1 = &out.nodes[0];
        assert_eq!(a1.score, Some(1.0));
        assert_eq!(a1.attacks, vec![ArgumentId::new("A2")]);

        let a3 = &out.nodes[2];
        assert_eq!(a3.score, None);
        assert_eq!(a3.attacks, vec![ArgumentId::new("A2")]);
        assert!(a3.attacked_by.is_empty());

        let a2 = &out.nodes[1];
        assert_eq!(
            a2.attacked_by,
            vec![ArgumentId::new("A1"), ArgumentId::new("A3")]
        );
    }

    #[test]
    fn export_writes_camel_case_fields() {
        let graph = SnapshotDocument::from_json(DOC).unwrap().to_graph().unwrap();
        let global = GlobalScores {
            category_scores: IndexMap::from([(CategoryKey::new("eco"), 1.0)]),
            final_score: Some(1.0),
        };
        let json = SnapshotDocument::export(&graph, None, Some(global))
            .to_json_pretty()
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["globalScores"]["finalScore"], 1.0);
        assert_eq!(value["nodes"][1]["attackedBy"][0], "A1");
        assert!(value["nodes"][0].get("score").is_none());
        assert!(value["nodes"][0].get("desc").is_none());
    }

    #[test]
    fn invalid_json_is_a_serialization_error() {
        assert!(matches!(
            SnapshotDocument::from_json("{ nodes: "),
            Err(CoreError::Serialization(_))
        ));
    }

    #[test]
    fn exported_document_reloads_to_the_same_graph() {
        let graph = SnapshotDocument::from_json(DOC).unwrap().to_graph().unwrap();
        let reloaded = SnapshotDocument::export(&graph, None, None)
            .to_graph()
            .unwrap();
        assert_eq!(reloaded.snapshot(), graph.snapshot());
    }
}
