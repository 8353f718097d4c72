// src/pipeline.rs

//! Top-level generation pipeline.
//!
//! One `Pipeline` owns the resolved layout table and runs the whole
//! parse -> build -> analyse -> render chain on each call. Nothing is cached
//! between invocations: every "generate" starts from the raw form rows.

use tracing::{debug, info};

use crate::config::model::LayoutFile;
use crate::cpm::{
    critical_path, forward_lengths, node_timings, parse_rows, ActivityGraph, ActivityRow,
};
use crate::errors::{CpmError, Result};
use crate::render;

/// Result of one generation run.
#[derive(Debug, Clone)]
pub struct Diagram {
    /// The rendered SVG document.
    pub svg: String,
    /// Critical path activity names, in path order.
    pub critical_path: Vec<String>,
    /// Sum of the durations of the path's defined activities.
    pub total_duration: u64,
}

/// Owns the layout and turns form rows into rendered diagrams.
pub struct Pipeline {
    layout: LayoutFile,
}

impl Pipeline {
    pub fn new(layout: LayoutFile) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &LayoutFile {
        &self.layout
    }

    /// Run the full pipeline on the current form contents.
    pub fn generate(&self, rows: &[ActivityRow]) -> Result<Diagram> {
        let activities = parse_rows(rows)?;
        if activities.is_empty() {
            return Err(CpmError::EmptyProject);
        }
        debug!(count = activities.len(), "activities parsed");

        let graph = ActivityGraph::from_activities(&activities);
        let critical = critical_path(&graph)?;
        let lengths = forward_lengths(&graph);
        let timings = node_timings(&graph, &lengths);

        let svg = render::render_diagram(&graph, &critical, &timings, &self.layout)?;

        info!(
            path = %critical.sequence(),
            total = critical.total_duration,
            "diagram generated"
        );

        Ok(Diagram {
            svg,
            critical_path: critical.activities,
            total_duration: critical.total_duration,
        })
    }
}
