//! Router assembly for the argweigh HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax; the static `next-id` segment
/// takes precedence over `{id}`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Snapshot import/export
        .route(
            "/graph",
            get(handlers::graph::export_graph).put(handlers::graph::load_graph),
        )
        // Arguments
        .route("/arguments", post(handlers::arguments::create_argument))
        .route("/arguments/next-id", get(handlers::arguments::next_id))
        .route(
            "/arguments/{id}",
            get(handlers::arguments::get_argument)
                .put(handlers::arguments::update_argument)
                .delete(handlers::arguments::delete_argument),
        )
        // Weights and scores
        .route(
            "/weights",
            get(handlers::weights::get_weights).put(handlers::weights::set_weights),
        )
        .route("/scores", get(handlers::graph::scores))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
