// src/render/mod.rs

//! Diagram rendering and export.
//!
//! - [`svg`] turns an analysed activity graph into an SVG document.
//! - [`export`] rasterises that SVG to PNG, converts it to PDF, and writes
//!   the chosen format to disk.

pub mod export;
pub mod svg;

pub use export::{ensure_extension, rasterize_rgba, render_pdf, render_png, write_diagram, ExportFormat};
pub use svg::render_diagram;
