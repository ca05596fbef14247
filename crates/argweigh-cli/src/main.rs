//! argweigh command-line tool.
//!
//! Provides the `argweigh` binary for working with snapshot documents
//! offline: `score` evaluates a snapshot, `export` rewrites it with canonical
//! relation lists and fresh scores, `next-id` suggests the next argument id.
//!
//! Scores come from the same `argweigh_semantics::evaluate()` pipeline the
//! HTTP server recomputes with after every mutation.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use argweigh_core::{ArgumentGraph, CoreError, SliderValue, SnapshotDocument, WeightTable};
use argweigh_semantics::{evaluate, Evaluation, SolverConfig};

/// Exit code for a snapshot whose contents do not form a valid graph.
const EXIT_INVALID_GRAPH: i32 = 1;
/// Exit code for unreadable files, malformed JSON and failed writes.
const EXIT_IO: i32 = 3;

/// Weighted argument graph scoring tools.
#[derive(Parser)]
#[command(name = "argweigh", about = "Weighted argument graph scoring tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Score a snapshot and print the evaluation as JSON.
    Score {
        /// Path to the snapshot document.
        snapshot: PathBuf,

        /// Importance slider position: 0 = economic, 1 = environmental.
        #[arg(short, long, default_value_t = 0.5)]
        slider: f64,

        /// Upper bound on solver iterations.
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Convergence tolerance on the largest per-node change.
        #[arg(long)]
        tolerance: Option<f64>,
    },

    /// Rewrite a snapshot with symmetric relations and fresh scores.
    Export {
        /// Path to the snapshot document.
        snapshot: PathBuf,

        /// Output file (default: stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Importance slider position: 0 = economic, 1 = environmental.
        #[arg(short, long, default_value_t = 0.5)]
        slider: f64,
    },

    /// Print the suggested id for the next argument.
    NextId {
        /// Path to the snapshot document.
        snapshot: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Score {
            snapshot,
            slider,
            max_iterations,
            tolerance,
        } => {
            let mut solver = SolverConfig::default();
            if let Some(n) = max_iterations {
                solver.max_iterations = n;
            }
            if let Some(t) = tolerance {
                solver.tolerance = t;
            }
            run_score(&snapshot, slider, &solver)
        }
        Commands::Export {
            snapshot,
            output,
            slider,
        } => run_export(&snapshot, output.as_deref(), slider),
        Commands::NextId { snapshot } => run_next_id(&snapshot),
    };
    process::exit(exit_code);
}

/// Execute the score subcommand.
fn run_score(path: &Path, slider: f64, solver: &SolverConfig) -> i32 {
    let graph = match load_graph(path) {
        Ok(graph) => graph,
        Err(code) => return code,
    };
    let evaluation = evaluate_at(&graph, slider, solver);

    match serde_json::to_string_pretty(&evaluation) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: failed to serialize evaluation: {}", e);
            EXIT_IO
        }
    }
}

/// Execute the export subcommand.
fn run_export(path: &Path, output: Option<&Path>, slider: f64) -> i32 {
    let graph = match load_graph(path) {
        Ok(graph) => graph,
        Err(code) => return code,
    };
    let evaluation = evaluate_at(&graph, slider, &SolverConfig::default());
    let doc = SnapshotDocument::export(
        &graph,
        Some(&evaluation.scores),
        Some(evaluation.global_scores()),
    );

    let json = match doc.to_json_pretty() {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: failed to serialize snapshot: {}", e);
            return EXIT_IO;
        }
    };

    match output {
        Some(out) => {
            if let Err(e) = fs::write(out, json + "\n") {
                eprintln!("Error: failed to write '{}': {}", out.display(), e);
                return EXIT_IO;
            }
            tracing::info!(path = %out.display(), nodes = graph.len(), "snapshot written");
            0
        }
        None => {
            println!("{}", json);
            0
        }
    }
}

/// Execute the next-id subcommand.
fn run_next_id(path: &Path) -> i32 {
    match load_graph(path) {
        Ok(graph) => {
            println!("{}", graph.suggest_next_id());
            0
        }
        Err(code) => code,
    }
}

fn evaluate_at(graph: &ArgumentGraph, slider: f64, solver: &SolverConfig) -> Evaluation {
    let weights = WeightTable::from_slider(graph.categories(), SliderValue::new(slider));
    let evaluation = evaluate(graph, &weights, solver);
    if !evaluation.convergence.converged {
        tracing::warn!(
            iterations = evaluation.convergence.iterations,
            max_delta = evaluation.convergence.max_delta,
            "solver stopped before converging"
        );
    }
    evaluation
}

/// Reads and validates a snapshot, reporting failures on stderr.
///
/// The error value is the exit code to use.
fn load_graph(path: &Path) -> Result<ArgumentGraph, i32> {
    let json = fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: failed to read '{}': {}", path.display(), e);
        EXIT_IO
    })?;
    let doc = SnapshotDocument::from_json(&json).map_err(|e| {
        eprintln!("Error: '{}' is not a snapshot document: {}", path.display(), e);
        EXIT_IO
    })?;
    doc.to_graph().map_err(|e| {
        eprintln!("Error: invalid graph in '{}': {}", path.display(), e);
        exit_code(&e)
    })
}

fn exit_code(err: &CoreError) -> i32 {
    match err {
        CoreError::Serialization(_) => EXIT_IO,
        _ => EXIT_INVALID_GRAPH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_snapshot(dir: &tempfile::TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("snapshot.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_graph(&dir.path().join("absent.json"));
        assert_eq!(result.err(), Some(EXIT_IO));
    }

    #[test]
    fn malformed_json_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(&dir, "{ not json");
        assert_eq!(load_graph(&path).err(), Some(EXIT_IO));
    }

    #[test]
    fn duplicate_ids_are_invalid_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(
            &dir,
            r#"{"cats":{"eco":"Economic"},"nodes":[
                {"id":"A1","label":"x","cat":"eco"},
                {"id":"A1","label":"y","cat":"eco"}]}"#,
        );
        assert_eq!(load_graph(&path).err(), Some(EXIT_INVALID_GRAPH));
    }

    #[test]
    fn export_writes_symmetric_snapshot_with_scores() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(
            &dir,
            r#"{"cats":{"eco":"Economic","env":"Environmental"},"nodes":[
                {"id":"A1","label":"Jobs","cat":"eco","attacks":["A2"]},
                {"id":"A2","label":"Forests","cat":"env"}]}"#,
        );
        let out = dir.path().join("out.json");

        assert_eq!(run_export(&path, Some(&out), 0.5), 0);

        let doc = SnapshotDocument::from_json(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(doc.nodes[1].attacked_by.len(), 1);
        assert_eq!(doc.nodes[1].attacked_by[0].as_str(), "A1");
        assert_eq!(doc.nodes[0].score, Some(1.0));
        assert_eq!(doc.nodes[1].score, Some(0.5));
        assert!(doc.global_scores.is_some());
    }

    #[test]
    fn slider_changes_attack_strength() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(
            &dir,
            r#"{"cats":{"eco":"Economic","env":"Environmental"},"nodes":[
                {"id":"E","label":"Jobs","cat":"eco","attacks":["V"]},
                {"id":"V","label":"Forests","cat":"env"}]}"#,
        );
        let graph = load_graph(&path).unwrap();

        let green = evaluate_at(&graph, 1.0, &SolverConfig::default());
        let growth = evaluate_at(&graph, 0.0, &SolverConfig::default());
        assert_eq!(green.scores["V"], 1.0);
        assert!((growth.scores["V"] - 1.0 / 3.0).abs() < 1e-5);
    }
}
