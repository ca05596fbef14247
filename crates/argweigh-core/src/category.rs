//! Static category configuration.
//!
//! [`CategoryConfig`] is supplied once at construction time and never mutated
//! by the graph or the semantics engine. Key order is preserved so that
//! everything derived from it (weight tables, reports) lists categories in
//! the order the configuration declared them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::id::CategoryKey;

/// Category whose weight falls as the importance slider moves towards 1.
pub const ECONOMIC: &str = "eco";
/// Category whose weight rises as the importance slider moves towards 1.
pub const ENVIRONMENTAL: &str = "env";

/// Display metadata for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub label: String,
    pub color: String,
}

/// The configured category set, keyed by [`CategoryKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryConfig {
    categories: IndexMap<CategoryKey, CategoryDef>,
}

impl CategoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a category, builder style.
    pub fn with(mut self, key: impl Into<CategoryKey>, label: &str, color: &str) -> Self {
        self.insert(key, label, color);
        self
    }

    pub fn insert(&mut self, key: impl Into<CategoryKey>, label: &str, color: &str) {
        self.categories.insert(
            key.into(),
            CategoryDef {
                label: label.to_string(),
                color: color.to_string(),
            },
        );
    }

    /// Builds the configuration from the two parallel maps of a snapshot
    /// document. Keys follow `cats` order; a key that only has a color is
    /// still configured and uses its key as label.
    pub fn from_maps(
        cats: &IndexMap<CategoryKey, String>,
        colors: &IndexMap<CategoryKey, String>,
    ) -> Self {
        let mut config = CategoryConfig::new();
        for (key, label) in cats {
            let color = colors.get(key).map(String::as_str).unwrap_or_default();
            config.insert(key.clone(), label, color);
        }
        for (key, color) in colors {
            if !config.contains(key.as_str()) {
                config.insert(key.clone(), key.as_str(), color);
            }
        }
        config
    }

    pub fn contains(&self, key: &str) -> bool {
        self.categories.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&CategoryDef> {
        self.categories.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &CategoryKey> {
        self.categories.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryKey, &CategoryDef)> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// `key → label` map, as written to the `cats` snapshot field.
    pub fn labels(&self) -> IndexMap<CategoryKey, String> {
        self.iter().map(|(k, d)| (k.clone(), d.label.clone())).collect()
    }

    /// `key → color` map, as written to the `colors` snapshot field.
    pub fn colors(&self) -> IndexMap<CategoryKey, String> {
        self.iter().map(|(k, d)| (k.clone(), d.color.clone())).collect()
    }
}
