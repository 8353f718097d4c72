// src/cpm/graph.rs

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::warn;

use crate::cpm::activity::Activity;

/// Directed dependency graph of a project.
///
/// Nodes are activity names; an edge runs from a dependency to the activity
/// that depends on it. The edge weight is the duration of the *destination*
/// activity, which is the (approximate) metric the whole analysis runs on.
///
/// Dependency names that are never defined as activities still become nodes,
/// so the graph can contain dangling sources with no known duration.
#[derive(Debug, Clone)]
pub struct ActivityGraph {
    graph: DiGraph<String, u64>,
    indices: HashMap<String, NodeIndex>,
    durations: HashMap<String, u64>,
    first: Option<NodeIndex>,
}

impl ActivityGraph {
    /// Build the graph from parsed activities, preserving entry order.
    pub fn from_activities(activities: &[Activity]) -> Self {
        let mut g = Self {
            graph: DiGraph::new(),
            indices: HashMap::new(),
            durations: HashMap::new(),
            first: None,
        };

        // First pass: one node per defined activity, in entry order, so the
        // first-entered activity is the distance source.
        for activity in activities {
            let idx = g.ensure_node(&activity.name);
            g.durations.insert(activity.name.clone(), activity.duration);
            if g.first.is_none() {
                g.first = Some(idx);
            }
        }

        // Second pass: dependency edges. Unknown dependency names get a node
        // created on the fly.
        for activity in activities {
            let to = g.indices[&activity.name];
            for dep in &activity.dependencies {
                if !g.durations.contains_key(dep) {
                    warn!(
                        dependency = %dep,
                        activity = %activity.name,
                        "dependency references an undefined activity; adding a dangling node"
                    );
                }
                let from = g.ensure_node(dep);
                g.graph.add_edge(from, to, activity.duration);
            }
        }

        g
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.indices.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.indices.insert(name.to_string(), idx);
        idx
    }

    /// The underlying petgraph structure.
    pub fn graph(&self) -> &DiGraph<String, u64> {
        &self.graph
    }

    /// Name of the first-entered activity, if any activity was defined.
    pub fn first_activity(&self) -> Option<&str> {
        self.first.map(|idx| self.graph[idx].as_str())
    }

    pub(crate) fn first_index(&self) -> Option<NodeIndex> {
        self.first
    }

    /// Duration of a *defined* activity. Dangling dependency nodes have none.
    pub fn duration_of(&self, name: &str) -> Option<u64> {
        self.durations.get(name).copied()
    }

    /// Whether `name` was defined as an activity (as opposed to appearing
    /// only as a dependency).
    pub fn is_defined(&self, name: &str) -> bool {
        self.durations.contains_key(name)
    }

    /// All node names, defined or dangling, in creation order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|idx| self.graph[idx].as_str())
    }

    /// All edges as `(from, to, weight)` name triples, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].as_str(),
                self.graph[e.target()].as_str(),
                *e.weight(),
            )
        })
    }

    /// Number of nodes (defined activities plus dangling dependencies).
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}
