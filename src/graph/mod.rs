//! Orchestrator: the explicit task graph.
//!
//! Pipelines are declared as a DAG of task nodes with typed edges:
//!
//! - `Before(a, b)`: a must fully complete before b starts (the clean →
//!   asset-task barrier).
//! - `Concurrent(a, b)`: a and b are declared independent and must land in
//!   the same execution stage; validation rejects declarations the
//!   `Before` edges contradict.
//!
//! The graph is validated once at startup: unknown endpoints, cycles and
//! impossible `Concurrent` pairs are authoring mistakes that fail fast.

mod executor;

pub use executor::{Pipeline, PipelineOutcome, run_pipeline};

use anyhow::{Result, bail};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::task::{Registry, TaskId};

/// Typed dependency edge between two task nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Left runs to completion before right starts.
    Before(TaskId, TaskId),
    /// Both run in the same stage.
    Concurrent(TaskId, TaskId),
}

/// A declared pipeline graph.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    nodes: Vec<TaskId>,
    edges: Vec<Edge>,
}

impl TaskGraph {
    /// The standard pipeline shape shared by `dev` and `build`: clean
    /// first, then every asset task concurrently. The dev/build
    /// distinction lives in the `BuildMode`, not the graph.
    pub fn standard() -> Self {
        let mut nodes = vec![TaskId::Clean];
        nodes.extend(TaskId::ASSET_TASKS);

        let mut edges = Vec::new();
        for id in TaskId::ASSET_TASKS {
            edges.push(Edge::Before(TaskId::Clean, id));
        }
        // Asset tasks write disjoint output subtrees
        for pair in TaskId::ASSET_TASKS.windows(2) {
            edges.push(Edge::Concurrent(pair[0], pair[1]));
        }

        Self { nodes, edges }
    }

    /// Build a graph from explicit parts (used by tests and future custom
    /// pipelines).
    pub fn new(nodes: Vec<TaskId>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Validate the declaration: known endpoints, acyclic, every task
    /// registered, `Concurrent` pairs actually stage together.
    pub fn validate(&self, registry: &Registry) -> Result<()> {
        let node_set: FxHashSet<TaskId> = self.nodes.iter().copied().collect();
        if node_set.len() != self.nodes.len() {
            bail!("task graph declares a node twice");
        }

        for node in &self.nodes {
            if !registry.contains(*node) {
                bail!("task graph names unregistered task `{node}`");
            }
        }

        for edge in &self.edges {
            let (Edge::Before(a, b) | Edge::Concurrent(a, b)) = edge;
            for id in [a, b] {
                if !node_set.contains(id) {
                    bail!("edge references task `{id}` outside the graph");
                }
            }
            if a == b {
                bail!("self-edge on task `{a}`");
            }
        }

        let stages = self.stages()?;

        let mut stage_of = FxHashMap::default();
        for (index, stage) in stages.iter().enumerate() {
            for id in stage {
                stage_of.insert(*id, index);
            }
        }
        for edge in &self.edges {
            if let Edge::Concurrent(a, b) = edge
                && stage_of[a] != stage_of[b]
            {
                bail!("tasks `{a}` and `{b}` are declared concurrent but ordered apart");
            }
        }

        Ok(())
    }

    /// Topological stages (Kahn levels over `Before` edges). Each stage is
    /// a join barrier: its tasks run concurrently, the next stage starts
    /// only when all settle.
    pub fn stages(&self) -> Result<Vec<Vec<TaskId>>> {
        let mut indegree: FxHashMap<TaskId, usize> =
            self.nodes.iter().map(|id| (*id, 0)).collect();
        let mut successors: FxHashMap<TaskId, Vec<TaskId>> = FxHashMap::default();

        for edge in &self.edges {
            if let Edge::Before(a, b) = edge {
                *indegree.entry(*b).or_default() += 1;
                successors.entry(*a).or_default().push(*b);
            }
        }

        let mut stages = Vec::new();
        // Preserve declaration order inside each stage
        let mut remaining: Vec<TaskId> = self.nodes.clone();

        while !remaining.is_empty() {
            let ready: Vec<TaskId> = remaining
                .iter()
                .copied()
                .filter(|id| indegree[id] == 0)
                .collect();

            if ready.is_empty() {
                bail!("task graph contains a cycle");
            }

            for id in &ready {
                for succ in successors.get(id).map(Vec::as_slice).unwrap_or(&[]) {
                    *indegree.get_mut(succ).unwrap() -= 1;
                }
            }
            remaining.retain(|id| !ready.contains(id));
            stages.push(ready);
        }

        Ok(stages)
    }
}
