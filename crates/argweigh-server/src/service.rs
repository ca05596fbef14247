//! ArgumentService: the single coordinator between HTTP handlers and the
//! graph/semantics crates.
//!
//! Every mutation and every weight change runs to completion and is followed
//! by a synchronous recompute, so the held evaluation always
//! reflects the current graph and weight table. The service holds no
//! presentation state; callers keep their own selection and form state and
//! query the service for everything else.

use argweigh_core::{
    ArgumentGraph, ArgumentId, ArgumentNode, CategoryConfig, CoreError, NodeSpec, SliderValue,
    SnapshotDocument, WeightTable,
};
use argweigh_semantics::{evaluate, Evaluation, SolverConfig};

/// Owns the graph, the current weight table and the latest evaluation.
pub struct ArgumentService {
    graph: ArgumentGraph,
    slider: SliderValue,
    /// Rebuilt from `slider` whenever it or the category config changes.
    weights: WeightTable,
    solver: SolverConfig,
    evaluation: Evaluation,
}

impl ArgumentService {
    /// Creates a service over an empty graph with the slider balanced.
    pub fn new(categories: CategoryConfig, solver: SolverConfig) -> Self {
        let graph = ArgumentGraph::new(categories);
        Self::with_graph(graph, SliderValue::BALANCED, solver)
    }

    /// Creates a service from a snapshot document.
    pub fn from_snapshot(doc: &SnapshotDocument, solver: SolverConfig) -> Result<Self, CoreError> {
        let graph = doc.to_graph()?;
        tracing::info!(
            nodes = graph.len(),
            categories = graph.categories().len(),
            "loaded snapshot"
        );
        Ok(Self::with_graph(graph, SliderValue::BALANCED, solver))
    }

    fn with_graph(graph: ArgumentGraph, slider: SliderValue, solver: SolverConfig) -> Self {
        let weights = WeightTable::from_slider(graph.categories(), slider);
        let evaluation = evaluate(&graph, &weights, &solver);
        ArgumentService {
            graph,
            slider,
            weights,
            solver,
            evaluation,
        }
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn node(&self, id: &str) -> Option<&ArgumentNode> {
        self.graph.get(id)
    }

    /// Latest score of a node.
    pub fn score(&self, id: &str) -> Option<f64> {
        self.evaluation.scores.get(id).copied()
    }

    pub fn slider(&self) -> SliderValue {
        self.slider
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn suggest_next_id(&self) -> ArgumentId {
        self.graph.suggest_next_id()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Replaces the whole graph (categories included) with a snapshot's
    /// content. The slider position is kept.
    pub fn load_snapshot(&mut self, doc: &SnapshotDocument) -> Result<&Evaluation, CoreError> {
        let graph = doc.to_graph()?;
        tracing::info!(nodes = graph.len(), "replaced graph from snapshot");
        self.weights = WeightTable::from_slider(graph.categories(), self.slider);
        self.graph = graph;
        Ok(self.recompute())
    }

    pub fn create(&mut self, spec: NodeSpec) -> Result<&Evaluation, CoreError> {
        let id = spec.id.clone();
        self.graph.create(spec)?;
        tracing::info!(%id, "created argument");
        Ok(self.recompute())
    }

    pub fn update(&mut self, id: &str, spec: NodeSpec) -> Result<&Evaluation, CoreError> {
        self.graph.update(id, spec)?;
        tracing::info!(%id, "updated argument");
        Ok(self.recompute())
    }

    pub fn remove(&mut self, id: &str) -> Result<&Evaluation, CoreError> {
        self.graph.remove(id)?;
        tracing::info!(%id, "removed argument");
        Ok(self.recompute())
    }

    /// Moves the importance slider, replacing the weight table wholesale.
    pub fn set_weight_slider(&mut self, v: f64) -> &Evaluation {
        self.slider = SliderValue::new(v);
        self.weights = WeightTable::from_slider(self.graph.categories(), self.slider);
        tracing::info!(slider = %self.slider, label = %self.slider.label(), "weights changed");
        self.recompute()
    }

    /// Recomputes scores and aggregates with the current weight table.
    pub fn recompute(&mut self) -> &Evaluation {
        self.evaluation = evaluate(&self.graph, &self.weights, &self.solver);
        tracing::debug!(
            nodes = self.evaluation.scores.len(),
            final_score = ?self.evaluation.final_score,
            iterations = self.evaluation.convergence.iterations,
            "recomputed scores"
        );
        &self.evaluation
    }

    /// The current graph as a snapshot document, relations regenerated from
    /// the canonical edge list and scores from the latest evaluation.
    pub fn export_snapshot(&self) -> SnapshotDocument {
        SnapshotDocument::export(
            &self.graph,
            Some(&self.evaluation.scores),
            Some(self.evaluation.global_scores()),
        )
    }
}
