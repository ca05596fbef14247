//! Category weight tables and the importance slider mapping.
//!
//! A [`WeightTable`] scales each attacker's contribution by the weight of the
//! attacker's category. Tables are rebuilt from scratch on every slider
//! change; nothing is ever merged into an existing table.
//!
//! Slider mapping (`v ∈ [0,1]`, 0 = fully economic, 1 = fully environmental):
//!
//! ```text
//! w(eco)    = 2·(1−v)    v=0: 2.0   v=0.5: 1.0   v=1: 0.0
//! w(env)    = 2·v        v=0: 0.0   v=0.5: 1.0   v=1: 2.0
//! w(other)  = 1.0
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::category::{CategoryConfig, ECONOMIC, ENVIRONMENTAL};
use crate::id::CategoryKey;

/// Weight used for any category missing from a table.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Two weights closer than this are treated as equal.
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// A position of the importance slider, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct SliderValue(f64);

impl SliderValue {
    pub const BALANCED: SliderValue = SliderValue(0.5);

    /// Clamps finite input into `[0, 1]`; NaN and infinities fall back to
    /// the balanced position.
    pub fn new(v: f64) -> Self {
        if v.is_finite() {
            SliderValue(v.clamp(0.0, 1.0))
        } else {
            Self::BALANCED
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn economic_weight(self) -> f64 {
        2.0 * (1.0 - self.0)
    }

    pub fn environmental_weight(self) -> f64 {
        2.0 * self.0
    }

    /// Caption shown next to the slider: `Balanced`, `Eco ×1.4`, `Env ×1.6`.
    pub fn label(self) -> String {
        if self.0 == 0.5 {
            "Balanced".to_string()
        } else if self.0 < 0.5 {
            format!("Eco ×{:.1}", self.economic_weight())
        } else {
            format!("Env ×{:.1}", self.environmental_weight())
        }
    }
}

impl Default for SliderValue {
    fn default() -> Self {
        Self::BALANCED
    }
}

impl From<f64> for SliderValue {
    fn from(v: f64) -> Self {
        SliderValue::new(v)
    }
}

impl From<SliderValue> for f64 {
    fn from(v: SliderValue) -> Self {
        v.0
    }
}

impl fmt::Display for SliderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mapping from category key to a non-negative weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable {
    weights: IndexMap<CategoryKey, f64>,
}

impl WeightTable {
    /// Every configured category at [`DEFAULT_WEIGHT`].
    pub fn balanced(config: &CategoryConfig) -> Self {
        WeightTable {
            weights: config.keys().map(|k| (k.clone(), DEFAULT_WEIGHT)).collect(),
        }
    }

    /// Builds the full table for a slider position.
    ///
    /// Only configured keys appear in the table; `eco` and `env` get their
    /// slider weights when configured, every other key gets 1.0.
    pub fn from_slider(config: &CategoryConfig, slider: SliderValue) -> Self {
        let weights = config
            .keys()
            .map(|key| {
                let w = match key.as_str() {
                    ECONOMIC => slider.economic_weight(),
                    ENVIRONMENTAL => slider.environmental_weight(),
                    _ => DEFAULT_WEIGHT,
                };
                (key.clone(), w)
            })
            .collect();
        WeightTable { weights }
    }

    /// Sets one weight, builder style. Negative weights are clamped to zero.
    pub fn with(mut self, key: impl Into<CategoryKey>, weight: f64) -> Self {
        self.weights.insert(key.into(), weight.max(0.0));
        self
    }

    /// Weight of a category, [`DEFAULT_WEIGHT`] when not in the table.
    pub fn weight(&self, key: &str) -> f64 {
        self.weights.get(key).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// `true` when every key in `keys` carries the same weight, looked up
    /// through [`weight`](Self::weight) and clamped at zero. No keys at all
    /// count as balanced.
    pub fn is_balanced_over<'k>(&self, keys: impl IntoIterator<Item = &'k CategoryKey>) -> bool {
        let mut weights = keys.into_iter().map(|k| self.weight(k.as_str()).max(0.0));
        match weights.next() {
            Some(first) => weights.all(|w| (w - first).abs() < WEIGHT_EPSILON),
            None => true,
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
