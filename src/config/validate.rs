// src/config/validate.rs

use anyhow::{anyhow, Result};
use tracing::warn;

use crate::config::model::LayoutFile;

/// Run basic semantic validation against a loaded layout.
///
/// This checks:
/// - there is at least one node position
/// - all coordinates are finite
/// - canvas scaling factors are positive and finite
///
/// Two nodes sharing the exact same coordinates is suspicious (their boxes
/// will overlap completely) but not fatal, so it only logs a warning.
pub fn validate_layout(layout: &LayoutFile) -> Result<()> {
    ensure_has_nodes(layout)?;
    validate_canvas(layout)?;
    validate_positions(layout)?;
    warn_on_duplicate_positions(layout);
    Ok(())
}

fn ensure_has_nodes(layout: &LayoutFile) -> Result<()> {
    if layout.node.is_empty() {
        return Err(anyhow!(
            "layout must contain at least one [node.<name>] section"
        ));
    }
    Ok(())
}

fn validate_canvas(layout: &LayoutFile) -> Result<()> {
    let c = &layout.canvas;
    for (field, value) in [
        ("x_scale", c.x_scale),
        ("y_scale", c.y_scale),
        ("margin", c.margin),
    ] {
        if !value.is_finite() {
            return Err(anyhow!("[canvas].{field} must be finite (got {value})"));
        }
    }
    if c.x_scale <= 0.0 || c.y_scale <= 0.0 {
        return Err(anyhow!(
            "[canvas].x_scale and y_scale must be > 0 (got {} and {})",
            c.x_scale,
            c.y_scale
        ));
    }
    if c.margin < 0.0 {
        return Err(anyhow!("[canvas].margin must be >= 0 (got {})", c.margin));
    }
    Ok(())
}

fn validate_positions(layout: &LayoutFile) -> Result<()> {
    for (name, pos) in layout.node.iter() {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return Err(anyhow!(
                "node '{}' has non-finite coordinates ({}, {})",
                name,
                pos.x,
                pos.y
            ));
        }
    }
    Ok(())
}

fn warn_on_duplicate_positions(layout: &LayoutFile) {
    let entries: Vec<_> = layout.node.iter().collect();
    for (i, (name_a, pos_a)) in entries.iter().enumerate() {
        for (name_b, pos_b) in entries.iter().skip(i + 1) {
            if pos_a == pos_b {
                warn!(
                    a = %name_a,
                    b = %name_b,
                    "nodes share the same layout position; their boxes will overlap"
                );
            }
        }
    }
}
