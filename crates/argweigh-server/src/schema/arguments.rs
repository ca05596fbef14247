//! Argument request/response types.
//!
//! Field names are camelCase to match the snapshot document (`attackedBy`).

use argweigh_core::{ArgumentId, ArgumentNode, CategoryKey, NodeSpec};
use argweigh_semantics::Evaluation;
use serde::{Deserialize, Serialize};

/// Body of `POST /arguments` and `PUT /arguments/{id}`.
///
/// `id` may be omitted: create then uses the suggested next id, update uses
/// the id from the path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentRequest {
    #[serde(default)]
    pub id: Option<ArgumentId>,
    pub label: String,
    pub category: CategoryKey,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attacks: Vec<ArgumentId>,
    #[serde(default)]
    pub attacked_by: Vec<ArgumentId>,
}

impl ArgumentRequest {
    /// Converts into a node spec, filling a missing id with `fallback`.
    pub fn into_spec(self, fallback: ArgumentId) -> NodeSpec {
        NodeSpec {
            id: self.id.unwrap_or(fallback),
            label: self.label,
            category: self.category,
            description: self.description,
            attacks: self.attacks,
            attacked_by: self.attacked_by,
        }
    }
}

/// One argument with its latest score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentView {
    pub id: ArgumentId,
    pub label: String,
    pub category: CategoryKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub score: Option<f64>,
    pub attacks: Vec<ArgumentId>,
    pub attacked_by: Vec<ArgumentId>,
}

impl ArgumentView {
    pub fn new(node: &ArgumentNode, score: Option<f64>) -> Self {
        ArgumentView {
            id: node.id.clone(),
            label: node.label.clone(),
            category: node.category.clone(),
            description: node.description.clone(),
            score,
            attacks: node.attacks.iter().cloned().collect(),
            attacked_by: node.attacked_by.iter().cloned().collect(),
        }
    }
}

/// Response to create/update/remove: the affected id and the fresh
/// evaluation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    pub id: ArgumentId,
    pub evaluation: Evaluation,
}

/// Response to `GET /arguments/next-id`.
#[derive(Debug, Clone, Serialize)]
pub struct NextIdResponse {
    pub id: ArgumentId,
}
