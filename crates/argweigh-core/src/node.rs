//! Argument nodes and the caller-supplied node specification.
//!
//! [`ArgumentNode`] is what the graph stores. [`NodeSpec`] is what callers
//! hand to `create`/`update`/`load`: the same fields, but relation lists are
//! plain vectors with no symmetry guarantee yet.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::category::CategoryConfig;
use crate::error::CoreError;
use crate::id::{ArgumentId, CategoryKey};

/// A stored argument node.
///
/// `attacks` and `attacked_by` are the two mirrored views of the attack
/// relation; the graph keeps them symmetric. Scores are not stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentNode {
    pub id: ArgumentId,
    /// Free text, may contain embedded line breaks.
    pub label: String,
    pub category: CategoryKey,
    pub description: Option<String>,
    /// Ids this node attacks.
    pub attacks: BTreeSet<ArgumentId>,
    /// Ids attacking this node.
    pub attacked_by: BTreeSet<ArgumentId>,
}

impl ArgumentNode {
    /// A node with the spec's fields and no edges. Edges are asserted by the
    /// graph so that both endpoints are updated together.
    pub(crate) fn detached(spec: &NodeSpec) -> Self {
        ArgumentNode {
            id: spec.id.clone(),
            label: spec.label.clone(),
            category: spec.category.clone(),
            description: spec.description.clone(),
            attacks: BTreeSet::new(),
            attacked_by: BTreeSet::new(),
        }
    }

    /// The spec that would recreate this node as it currently stands.
    pub fn to_spec(&self) -> NodeSpec {
        NodeSpec {
            id: self.id.clone(),
            label: self.label.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            attacks: self.attacks.iter().cloned().collect(),
            attacked_by: self.attacked_by.iter().cloned().collect(),
        }
    }
}

/// Caller-supplied node data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: ArgumentId,
    pub label: String,
    pub category: CategoryKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub attacks: Vec<ArgumentId>,
    #[serde(default)]
    pub attacked_by: Vec<ArgumentId>,
}

impl NodeSpec {
    pub fn new(id: &str, label: &str, category: &str) -> Self {
        NodeSpec {
            id: ArgumentId::new(id),
            label: label.to_string(),
            category: CategoryKey::new(category),
            description: None,
            attacks: Vec::new(),
            attacked_by: Vec::new(),
        }
    }

    pub fn attacking(mut self, targets: &[&str]) -> Self {
        self.attacks.extend(targets.iter().map(|t| ArgumentId::new(*t)));
        self
    }

    pub fn attacked_by(mut self, sources: &[&str]) -> Self {
        self.attacked_by.extend(sources.iter().map(|s| ArgumentId::new(*s)));
        self
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Trims text fields and drops blank relation entries. An empty
    /// description becomes `None`.
    pub fn normalized(&self) -> NodeSpec {
        let clean = |ids: &[ArgumentId]| -> Vec<ArgumentId> {
            ids.iter()
                .map(|id| id.as_str().trim())
                .filter(|id| !id.is_empty())
                .map(ArgumentId::from)
                .collect()
        };
        NodeSpec {
            id: ArgumentId::new(self.id.as_str().trim()),
            label: self.label.trim().to_string(),
            category: CategoryKey::new(self.category.as_str().trim()),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            attacks: clean(&self.attacks),
            attacked_by: clean(&self.attacked_by),
        }
    }

    /// Checks required fields. Expects a [`normalized`](Self::normalized)
    /// spec. The category must be configured unless the configuration is
    /// empty.
    pub fn validate(&self, categories: &CategoryConfig) -> Result<(), CoreError> {
        if self.id.as_str().is_empty() {
            return Err(CoreError::validation("id", "must not be empty"));
        }
        if self.label.is_empty() {
            return Err(CoreError::validation("label", "must not be empty"));
        }
        if self.category.as_str().is_empty() {
            return Err(CoreError::validation("category", "must not be empty"));
        }
        if !categories.is_empty() && !categories.contains(self.category.as_str()) {
            return Err(CoreError::validation(
                "category",
                format!("unknown category '{}'", self.category),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> CategoryConfig {
        CategoryConfig::new().with("eco", "Economic", "#e0b050")
    }

    #[test]
    fn normalized_trims_and_drops_blank_relations() {
        let mut spec = NodeSpec::new("  A1 ", " Growth\nfirst ", " eco ");
        spec.attacks = vec![ArgumentId::new(" A2"), ArgumentId::new("  ")];
        spec.description = Some("   ".to_string());

        let spec = spec.normalized();
        assert_eq!(spec.id.as_str(), "A1");
        assert_eq!(spec.label, "Growth\nfirst");
        assert_eq!(spec.category.as_str(), "eco");
        assert_eq!(spec.attacks, vec![ArgumentId::new("A2")]);
        assert_eq!(spec.description, None);
    }

    #[test]
    fn validate_rejects_each_missing_field() {
        let cats = categories();
        for (spec, field) in [
            (NodeSpec::new("", "label", "eco"), "id"),
            (NodeSpec::new("A1", "", "eco"), "label"),
            (NodeSpec::new("A1", "label", ""), "category"),
        ] {
            match spec.validate(&cats) {
                Err(CoreError::Validation { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected validation error on {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn validate_rejects_unknown_category_only_when_configured() {
        let spec = NodeSpec::new("A1", "label", "space");
        assert!(matches!(
            spec.validate(&categories()),
            Err(CoreError::Validation { field: "category", .. })
        ));
        assert!(spec.validate(&CategoryConfig::new()).is_ok());
    }

    #[test]
    fn spec_deserializes_with_missing_relations() {
        let spec: NodeSpec =
            serde_json::from_str(r#"{"id":"A1","label":"L","category":"eco"}"#).unwrap();
        assert!(spec.attacks.is_empty());
        assert!(spec.attacked_by.is_empty());
    }
}
