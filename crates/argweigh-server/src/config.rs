//! Server configuration read from environment variables.
//!
//! - `ARGWEIGH_PORT`: listen port (default `3000`)
//! - `ARGWEIGH_SNAPSHOT`: snapshot document loaded at startup (optional)
//! - `ARGWEIGH_MAX_ITERATIONS`: solver iteration cap (default `100`)
//! - `ARGWEIGH_TOLERANCE`: solver convergence tolerance (default `1e-6`)

use std::path::PathBuf;
use std::str::FromStr;

use argweigh_core::{CoreError, SnapshotDocument};
use argweigh_semantics::SolverConfig;

use crate::service::ArgumentService;

/// Errors raised while assembling the server from its environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    InvalidVar { name: &'static str, value: String },

    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] CoreError),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub snapshot: Option<PathBuf>,
    pub solver: SolverConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: 3000,
            snapshot: None,
            solver: SolverConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();
        let port = parse_var(&lookup, "ARGWEIGH_PORT")?.unwrap_or(defaults.port);
        let snapshot = lookup("ARGWEIGH_SNAPSHOT")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let solver = SolverConfig {
            max_iterations: parse_var(&lookup, "ARGWEIGH_MAX_ITERATIONS")?
                .unwrap_or(defaults.solver.max_iterations),
            tolerance: parse_var(&lookup, "ARGWEIGH_TOLERANCE")?
                .unwrap_or(defaults.solver.tolerance),
            ..defaults.solver
        };
        Ok(ServerConfig {
            port,
            snapshot,
            solver,
        })
    }

    /// Builds the service: from the configured snapshot if any, otherwise an
    /// empty graph with no categories.
    pub fn build_service(&self) -> Result<ArgumentService, ConfigError> {
        match &self.snapshot {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
                let doc = SnapshotDocument::from_json(&json)?;
                Ok(ArgumentService::from_snapshot(&doc, self.solver)?)
            }
            None => Ok(ArgumentService::new(Default::default(), self.solver)),
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(ConfigError::InvalidVar { name, value }),
    }
}
