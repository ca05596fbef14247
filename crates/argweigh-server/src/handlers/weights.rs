//! Importance slider handlers.

use axum::extract::State;
use axum::Json;

use crate::schema::weights::{SetWeightsRequest, SetWeightsResponse, WeightsView};
use crate::state::AppState;

/// Returns the slider position and its weight table.
///
/// `GET /weights`
pub async fn get_weights(State(state): State<AppState>) -> Json<WeightsView> {
    let service = state.service.lock().await;
    Json(WeightsView::new(service.slider(), service.weights()))
}

/// Moves the slider and returns the new table with the recomputed scores.
///
/// `PUT /weights`
pub async fn set_weights(
    State(state): State<AppState>,
    Json(req): Json<SetWeightsRequest>,
) -> Json<SetWeightsResponse> {
    let mut service = state.service.lock().await;
    let evaluation = service.set_weight_slider(req.slider).clone();
    Json(SetWeightsResponse {
        weights: WeightsView::new(service.slider(), service.weights()),
        evaluation,
    })
}
