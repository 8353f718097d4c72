// src/cpm/activity.rs

use crate::errors::{CpmError, Result};

/// One raw row of the input form, exactly as the user typed it.
#[derive(Debug, Clone, Default)]
pub struct ActivityRow {
    pub name: String,
    pub duration: String,
    pub dependencies: String,
}

/// A parsed activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    /// User-supplied name; doubles as the graph node key.
    pub name: String,
    /// Duration in days. Non-negative by construction.
    pub duration: u64,
    /// Names of activities that must precede this one. May reference names
    /// that are never defined; those become dangling graph nodes.
    pub dependencies: Vec<String>,
}

/// Parse all form rows into activities.
///
/// Rules:
/// - the duration field must parse as a non-negative integer; any failure
///   aborts the whole parse with [`CpmError::InvalidDuration`],
/// - the dependency field is split on commas, tokens trimmed, empty tokens
///   dropped,
/// - a later row reusing an earlier name overwrites that entry's duration and
///   dependencies but keeps its original position, so "first-entered"
///   ordering stays stable for the downstream distance computation,
/// - referenced dependencies are *not* checked for existence here.
pub fn parse_rows(rows: &[ActivityRow]) -> Result<Vec<Activity>> {
    let mut activities: Vec<Activity> = Vec::with_capacity(rows.len());

    for (row_idx, row) in rows.iter().enumerate() {
        let name = row.name.trim().to_string();

        let duration: u64 = row
            .duration
            .trim()
            .parse()
            .map_err(|_| CpmError::InvalidDuration {
                row: row_idx,
                value: row.duration.clone(),
            })?;

        let dependencies = split_dependencies(&row.dependencies);

        match activities.iter_mut().find(|a| a.name == name) {
            Some(existing) => {
                existing.duration = duration;
                existing.dependencies = dependencies;
            }
            None => activities.push(Activity {
                name,
                duration,
                dependencies,
            }),
        }
    }

    Ok(activities)
}

/// Split a comma-separated dependency field, trimming whitespace and
/// dropping empty tokens.
pub fn split_dependencies(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
