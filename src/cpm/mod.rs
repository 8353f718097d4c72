// src/cpm/mod.rs

//! Activity parsing and Critical Path Method analysis.
//!
//! - [`activity`] turns raw form rows into validated activities.
//! - [`graph`] holds the petgraph-backed dependency graph.
//! - [`analysis`] computes forward distances and the critical path.

pub mod activity;
pub mod analysis;
pub mod graph;

pub use activity::{parse_rows, Activity, ActivityRow};
pub use analysis::{critical_path, forward_lengths, node_timings, CriticalPath, NodeTiming};
pub use graph::ActivityGraph;
