//! Argument CRUD handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use argweigh_core::ArgumentId;

use crate::error::ApiError;
use crate::schema::arguments::{ArgumentRequest, ArgumentView, MutationResponse, NextIdResponse};
use crate::state::AppState;

/// Creates an argument and returns the recomputed evaluation.
///
/// `POST /arguments`
pub async fn create_argument(
    State(state): State<AppState>,
    Json(req): Json<ArgumentRequest>,
) -> Result<(StatusCode, Json<MutationResponse>), ApiError> {
    let mut service = state.service.lock().await;
    let spec = req.into_spec(service.suggest_next_id());
    let id = ArgumentId::new(spec.id.as_str().trim());
    let evaluation = service.create(spec)?.clone();
    Ok((StatusCode::CREATED, Json(MutationResponse { id, evaluation })))
}

/// Returns one argument with its latest score.
///
/// `GET /arguments/{id}`
pub async fn get_argument(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ArgumentView>, ApiError> {
    let service = state.service.lock().await;
    let node = service
        .node(&id)
        .ok_or_else(|| ApiError::NotFound(format!("argument not found: '{}'", id)))?;
    Ok(Json(ArgumentView::new(node, service.score(&id))))
}

/// Replaces an argument's fields and attack lists.
///
/// `PUT /arguments/{id}`
pub async fn update_argument(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ArgumentRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let spec = req.into_spec(ArgumentId::new(id.as_str()));
    let evaluation = service.update(&id, spec)?.clone();
    Ok(Json(MutationResponse {
        id: ArgumentId::new(id),
        evaluation,
    }))
}

/// Removes an argument and every reference to it.
///
/// `DELETE /arguments/{id}`
pub async fn delete_argument(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let evaluation = service.remove(&id)?.clone();
    Ok(Json(MutationResponse {
        id: ArgumentId::new(id),
        evaluation,
    }))
}

/// Suggests the id for the next argument.
///
/// `GET /arguments/next-id`
pub async fn next_id(State(state): State<AppState>) -> Json<NextIdResponse> {
    let service = state.service.lock().await;
    Json(NextIdResponse {
        id: service.suggest_next_id(),
    })
}
