//! HTTP/JSON API over an argweigh argument graph.
//!
//! The server is a thin outer surface: every request is delegated to
//! [`service::ArgumentService`], which owns the graph, the weight table and
//! the latest evaluation.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
