//! Whole-graph handlers: snapshot export/import and score recompute.

use axum::extract::State;
use axum::Json;

use argweigh_core::SnapshotDocument;
use argweigh_semantics::Evaluation;

use crate::error::ApiError;
use crate::state::AppState;

/// Exports the current graph as a snapshot document.
///
/// `GET /graph`
pub async fn export_graph(State(state): State<AppState>) -> Json<SnapshotDocument> {
    let service = state.service.lock().await;
    Json(service.export_snapshot())
}

/// Replaces the graph with the given snapshot document.
///
/// `PUT /graph`
pub async fn load_graph(
    State(state): State<AppState>,
    Json(doc): Json<SnapshotDocument>,
) -> Result<Json<Evaluation>, ApiError> {
    let mut service = state.service.lock().await;
    let evaluation = service.load_snapshot(&doc)?.clone();
    Ok(Json(evaluation))
}

/// Recomputes and returns scores, category means and the final score.
///
/// `GET /scores`
pub async fn scores(State(state): State<AppState>) -> Json<Evaluation> {
    let mut service = state.service.lock().await;
    Json(service.recompute().clone())
}
