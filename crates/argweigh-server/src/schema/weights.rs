//! Weight slider request/response types.

use argweigh_core::{SliderValue, WeightTable};
use argweigh_semantics::Evaluation;
use serde::{Deserialize, Serialize};

/// Body of `PUT /weights`. Values outside `[0, 1]` are clamped.
#[derive(Debug, Clone, Deserialize)]
pub struct SetWeightsRequest {
    pub slider: f64,
}

/// Current slider position and the weight table derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct WeightsView {
    pub slider: SliderValue,
    pub label: String,
    pub weights: WeightTable,
}

impl WeightsView {
    pub fn new(slider: SliderValue, weights: &WeightTable) -> Self {
        WeightsView {
            slider,
            label: slider.label(),
            weights: weights.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SetWeightsResponse {
    #[serde(flatten)]
    pub weights: WeightsView,
    pub evaluation: Evaluation,
}
