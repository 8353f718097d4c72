// src/cpm/analysis.rs

use std::collections::HashMap;

use petgraph::algo::{dijkstra, toposort};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::{debug, warn};

use crate::cpm::graph::ActivityGraph;
use crate::errors::{CpmError, Result};

/// Early-start / early-finish annotation for one activity.
///
/// These are derived from forward distances where every edge is weighted by
/// the duration of its destination activity. That makes the first activity's
/// distance 0, so its early start comes out negative. The metric is an
/// intentional approximation, not textbook CPM forward-pass math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeTiming {
    pub early_start: i64,
    pub early_finish: i64,
    pub duration: u64,
}

/// The maximum-accumulated-duration path through the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalPath {
    /// Activity names in path order.
    pub activities: Vec<String>,
    /// Sum of the durations of every *defined* activity on the path.
    pub total_duration: u64,
}

impl CriticalPath {
    /// Whether a named activity lies on the path.
    pub fn contains(&self, name: &str) -> bool {
        self.activities.iter().any(|a| a == name)
    }

    /// The `A -> B -> C` rendering used in the diagram summary.
    pub fn sequence(&self) -> String {
        self.activities.join(" -> ")
    }
}

/// Forward distances from the first-entered activity to every reachable
/// node, keyed by activity name.
pub fn forward_lengths(graph: &ActivityGraph) -> HashMap<String, u64> {
    let Some(source) = graph.first_index() else {
        return HashMap::new();
    };

    let distances = dijkstra(graph.graph(), source, None, |e| *e.weight());

    distances
        .into_iter()
        .map(|(idx, dist)| (graph.graph()[idx].clone(), dist))
        .collect()
}

/// Per-activity timing labels derived from forward distances.
///
/// Reachable activities get `early_finish = distance` and
/// `early_start = distance - duration`; activities unreachable from the
/// first one fall back to `(0, duration)`. Dangling dependency nodes have no
/// duration and get no timing at all.
pub fn node_timings(
    graph: &ActivityGraph,
    lengths: &HashMap<String, u64>,
) -> HashMap<String, NodeTiming> {
    let mut timings = HashMap::new();

    for name in graph.node_names() {
        let Some(duration) = graph.duration_of(name) else {
            continue;
        };

        let timing = match lengths.get(name) {
            Some(&dist) => NodeTiming {
                early_start: dist as i64 - duration as i64,
                early_finish: dist as i64,
                duration,
            },
            None => NodeTiming {
                early_start: 0,
                early_finish: duration as i64,
                duration,
            },
        };

        timings.insert(name.to_string(), timing);
    }

    timings
}

/// Longest path in the DAG by accumulated edge weight, over all start nodes.
///
/// Classic toposort + DP with predecessor walkback: each node takes the
/// maximum over its incoming edges. Ties are broken by keeping the earliest
/// candidate in iteration order, so the result is deterministic for a fixed
/// input.
pub fn critical_path(graph: &ActivityGraph) -> Result<CriticalPath> {
    if graph.node_count() == 0 {
        return Err(CpmError::EmptyProject);
    }

    let g = graph.graph();
    let order = toposort(g, None).map_err(|cycle| {
        let name = g[cycle.node_id()].clone();
        CpmError::DependencyCycle(name)
    })?;

    let mut dist: HashMap<NodeIndex, u64> = HashMap::new();
    let mut pred: HashMap<NodeIndex, NodeIndex> = HashMap::new();

    // Pull-based DP: every node with at least one incoming edge gets its
    // best predecessor, even when all candidate distances are 0 (a
    // zero-duration activity must still extend back to a source).
    for &node in &order {
        let mut best: Option<(u64, NodeIndex)> = None;
        for edge in g.edges_directed(node, Direction::Incoming) {
            let source = edge.source();
            let candidate = dist.get(&source).copied().unwrap_or(0) + *edge.weight();
            match best {
                Some((current, _)) if candidate <= current => {}
                _ => best = Some((candidate, source)),
            }
        }
        if let Some((distance, predecessor)) = best {
            dist.insert(node, distance);
            pred.insert(node, predecessor);
        }
    }

    let mut best = order[0];
    let mut best_dist = dist.get(&best).copied().unwrap_or(0);
    for &node in &order[1..] {
        let d = dist.get(&node).copied().unwrap_or(0);
        if d > best_dist {
            best = node;
            best_dist = d;
        }
    }

    let mut path_indices = vec![best];
    let mut cursor = best;
    while let Some(&prev) = pred.get(&cursor) {
        path_indices.push(prev);
        cursor = prev;
    }
    path_indices.reverse();

    let activities: Vec<String> = path_indices.iter().map(|&idx| g[idx].clone()).collect();

    let mut total_duration: u64 = 0;
    for name in &activities {
        match graph.duration_of(name) {
            Some(d) => total_duration += d,
            // A dangling dependency has no duration; count it as zero.
            None => warn!(
                activity = %name,
                "critical path passes through an undefined activity; counting duration 0"
            ),
        }
    }

    debug!(
        path = %activities.join(" -> "),
        total_duration,
        "critical path computed"
    );

    Ok(CriticalPath {
        activities,
        total_duration,
    })
}
