// src/render/svg.rs

//! SVG rendering of the CPM diagram.
//!
//! Nodes are drawn as rounded PMBOK-style boxes at the coordinates given by
//! the layout table, with name / early start / early finish / duration text
//! lines. Edges are arrowed lines labelled with the destination activity's
//! duration. Critical-path nodes and edges get highlight colours; a summary
//! box at the bottom spells out the full path.

use std::collections::HashMap;
use std::fmt::Write as _;

use anyhow::{anyhow, Result};
use tracing::warn;

use crate::config::model::LayoutFile;
use crate::cpm::analysis::{CriticalPath, NodeTiming};
use crate::cpm::graph::ActivityGraph;

const BOX_WIDTH: f32 = 120.0;
const BOX_HEIGHT: f32 = 92.0;
const TITLE_AREA: f32 = 52.0;
const SUMMARY_AREA: f32 = 104.0;
/// Gap between a box border and the start/end of an edge line.
const EDGE_GAP: f32 = 4.0;

const CRITICAL_COLOR: &str = "#FF5733";
const NEUTRAL_EDGE_COLOR: &str = "#808080";
const CRITICAL_FILL: &str = "#FFEBEE";
const NORMAL_FILL: &str = "#E3F2FD";

const TITLE: &str = "Diagrama de Caminho Crítico (CPM) - Layout Estilo PMBOK";

/// Render the full diagram to an SVG document.
///
/// Only nodes present in the layout table are drawn; edges with an unplaced
/// endpoint are skipped with a warning. Fails if no graph node has a layout
/// position at all, since that would produce an empty canvas.
pub fn render_diagram(
    graph: &ActivityGraph,
    critical: &CriticalPath,
    timings: &HashMap<String, NodeTiming>,
    layout: &LayoutFile,
) -> Result<String> {
    let centers = place_nodes(graph, layout)?;

    let mut svg = String::new();
    write!(
        svg,
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}" font-family="system-ui, sans-serif">
  <defs>
    <marker id="arrow-neutral" markerWidth="8" markerHeight="8" refX="6" refY="4" orient="auto" markerUnits="strokeWidth">
      <path d="M1,1 L6,4 L1,7 z" fill="{}" />
    </marker>
    <marker id="arrow-critical" markerWidth="8" markerHeight="8" refX="6" refY="4" orient="auto" markerUnits="strokeWidth">
      <path d="M1,1 L6,4 L1,7 z" fill="{}" />
    </marker>
  </defs>
  <rect width="100%" height="100%" fill="white" />
"##,
        centers.width,
        centers.height,
        centers.width,
        centers.height,
        NEUTRAL_EDGE_COLOR,
        CRITICAL_COLOR,
    )?;

    write!(
        svg,
        "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"18\" font-weight=\"bold\" fill=\"#1a1a1a\" text-anchor=\"middle\">{}</text>\n",
        centers.width / 2.0,
        TITLE_AREA / 2.0 + 6.0,
        escape_xml(TITLE)
    )?;

    render_edges(&mut svg, graph, critical, &centers)?;
    render_nodes(&mut svg, graph, critical, timings, &centers)?;
    render_summary(&mut svg, critical, &centers)?;

    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Pixel positions for every placed node plus overall canvas size.
struct Placement {
    centers: HashMap<String, (f32, f32)>,
    width: f32,
    height: f32,
}

fn place_nodes(graph: &ActivityGraph, layout: &LayoutFile) -> Result<Placement> {
    let placed: Vec<(&str, f32, f32)> = graph
        .node_names()
        .filter_map(|name| {
            layout
                .position_of(name)
                .map(|pos| (name, pos.x, pos.y))
        })
        .collect();

    for name in graph.node_names() {
        if layout.position_of(name).is_none() {
            warn!(
                node = %name,
                "activity has no layout position; it will not be drawn"
            );
        }
    }

    if placed.is_empty() {
        return Err(anyhow!(
            "none of the entered activities has a layout position; nothing to draw"
        ));
    }

    let min_x = placed.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
    let max_x = placed.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);
    let min_y = placed.iter().map(|p| p.2).fold(f32::INFINITY, f32::min);
    let max_y = placed.iter().map(|p| p.2).fold(f32::NEG_INFINITY, f32::max);

    let canvas = &layout.canvas;
    let left = canvas.margin + BOX_WIDTH / 2.0;
    let top = canvas.margin + TITLE_AREA + BOX_HEIGHT / 2.0;

    let centers = placed
        .into_iter()
        .map(|(name, x, y)| {
            let px = left + (x - min_x) * canvas.x_scale;
            // Layout y grows upward, screen y grows downward.
            let py = top + (max_y - y) * canvas.y_scale;
            (name.to_string(), (px, py))
        })
        .collect();

    let width = 2.0 * canvas.margin + (max_x - min_x) * canvas.x_scale + BOX_WIDTH;
    let height = 2.0 * canvas.margin
        + TITLE_AREA
        + (max_y - min_y) * canvas.y_scale
        + BOX_HEIGHT
        + SUMMARY_AREA;

    Ok(Placement {
        centers,
        width,
        height,
    })
}

fn render_edges(
    svg: &mut String,
    graph: &ActivityGraph,
    critical: &CriticalPath,
    placement: &Placement,
) -> Result<()> {
    for (from, to, weight) in graph.edges() {
        let (Some(&from_c), Some(&to_c)) = (
            placement.centers.get(from),
            placement.centers.get(to),
        ) else {
            warn!(from = %from, to = %to, "edge endpoint has no layout position; skipping edge");
            continue;
        };

        // Both endpoints on the path is enough; they need not be consecutive.
        let is_critical = critical.contains(from) && critical.contains(to);
        let (stroke, marker) = if is_critical {
            (CRITICAL_COLOR, "arrow-critical")
        } else {
            (NEUTRAL_EDGE_COLOR, "arrow-neutral")
        };

        let start = clip_to_box(from_c, to_c);
        let end = clip_to_box(to_c, from_c);

        write!(
            svg,
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"2\" marker-end=\"url(#{})\" />\n",
            start.0, start.1, end.0, end.1, stroke, marker
        )?;

        render_edge_label(svg, start, end, &format!("{weight} dias"))?;
    }

    Ok(())
}

fn render_edge_label(svg: &mut String, start: (f32, f32), end: (f32, f32), label: &str) -> Result<()> {
    let cx = (start.0 + end.0) / 2.0;
    let cy = (start.1 + end.1) / 2.0;

    let box_width = label.chars().count() as f32 * 7.0 + 12.0;
    let box_height = 18.0;

    write!(
        svg,
        "  <g pointer-events=\"none\">\n    <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"5\" ry=\"5\" fill=\"white\" fill-opacity=\"0.92\" />\n    <text x=\"{:.1}\" y=\"{:.1}\" fill=\"#1a1a1a\" font-size=\"12\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>\n  </g>\n",
        cx - box_width / 2.0,
        cy - box_height / 2.0,
        box_width,
        box_height,
        cx,
        cy,
        escape_xml(label)
    )?;

    Ok(())
}

fn render_nodes(
    svg: &mut String,
    graph: &ActivityGraph,
    critical: &CriticalPath,
    timings: &HashMap<String, NodeTiming>,
    placement: &Placement,
) -> Result<()> {
    for name in graph.node_names() {
        let Some(&(cx, cy)) = placement.centers.get(name) else {
            continue;
        };
        // Dangling dependency nodes have no timing and thus no box.
        let Some(timing) = timings.get(name) else {
            continue;
        };

        let fill = if critical.contains(name) {
            CRITICAL_FILL
        } else {
            NORMAL_FILL
        };

        write!(
            svg,
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"10\" ry=\"10\" fill=\"{}\" stroke=\"black\" stroke-width=\"1.5\" />\n",
            cx - BOX_WIDTH / 2.0,
            cy - BOX_HEIGHT / 2.0,
            BOX_WIDTH,
            BOX_HEIGHT,
            fill
        )?;

        let lines = [
            (
                -28.0,
                "black",
                14.0,
                " font-weight=\"bold\"",
                name.to_string(),
            ),
            (
                -6.0,
                "blue",
                12.0,
                "",
                format!("Início: {}", timing.early_start),
            ),
            (
                12.0,
                "darkred",
                12.0,
                "",
                format!("Fim: {}", timing.early_finish),
            ),
            (
                30.0,
                "darkgreen",
                11.0,
                "",
                format!("Duração: {}", timing.duration),
            ),
        ];

        for (dy, color, size, extra, text) in lines {
            write!(
                svg,
                "  <text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"{}\"{} text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>\n",
                cx,
                cy + dy,
                color,
                size,
                extra,
                escape_xml(&text)
            )?;
        }
    }

    Ok(())
}

fn render_summary(svg: &mut String, critical: &CriticalPath, placement: &Placement) -> Result<()> {
    let lines = [
        "Resumo do Caminho Crítico:".to_string(),
        critical.sequence(),
        format!("Duração Total: {} dias", critical.total_duration),
    ];

    let longest = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0) as f32;
    let box_width = (longest * 7.5 + 24.0).max(320.0);
    let box_height = 78.0;
    let x = 24.0;
    let y = placement.height - SUMMARY_AREA + 6.0;

    write!(
        svg,
        "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"8\" ry=\"8\" fill=\"white\" stroke=\"black\" stroke-width=\"1\" />\n",
        x, y, box_width, box_height
    )?;

    for (idx, line) in lines.iter().enumerate() {
        write!(
            svg,
            "  <text x=\"{:.1}\" y=\"{:.1}\" fill=\"#1a1a1a\" font-size=\"13\" dominant-baseline=\"middle\">{}</text>\n",
            x + 12.0,
            y + 18.0 + idx as f32 * 22.0,
            escape_xml(line)
        )?;
    }

    Ok(())
}

/// Point where the segment from `center` toward `toward` crosses the node
/// box border (plus a small gap), so arrowheads land on the border instead
/// of the box centre.
fn clip_to_box(center: (f32, f32), toward: (f32, f32)) -> (f32, f32) {
    let dx = toward.0 - center.0;
    let dy = toward.1 - center.1;
    let half_w = BOX_WIDTH / 2.0 + EDGE_GAP;
    let half_h = BOX_HEIGHT / 2.0 + EDGE_GAP;

    let tx = if dx.abs() < f32::EPSILON {
        f32::INFINITY
    } else {
        half_w / dx.abs()
    };
    let ty = if dy.abs() < f32::EPSILON {
        f32::INFINITY
    } else {
        half_h / dy.abs()
    };

    let t = tx.min(ty).min(1.0);
    if !t.is_finite() {
        return center;
    }
    (center.0 + dx * t, center.1 + dy * t)
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
