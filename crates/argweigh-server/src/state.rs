//! Application state with a shared `ArgumentService`.
//!
//! [`AppState`] wraps the service in `Arc<tokio::sync::Mutex<>>`. Holding the
//! lock for the whole handler serializes every mutation and its recompute,
//! so no two structural changes ever interleave.

use std::sync::Arc;

use argweigh_core::CategoryConfig;
use argweigh_semantics::SolverConfig;

use crate::service::ArgumentService;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<tokio::sync::Mutex<ArgumentService>>,
}

impl AppState {
    pub fn new(service: ArgumentService) -> Self {
        AppState {
            service: Arc::new(tokio::sync::Mutex::new(service)),
        }
    }

    /// An empty graph over `categories` with default solver settings.
    pub fn with_categories(categories: CategoryConfig) -> Self {
        Self::new(ArgumentService::new(categories, SolverConfig::default()))
    }
}
