// src/render/export.rs

//! PNG and PDF export of a rendered SVG diagram.
//!
//! PNG goes through `usvg`/`resvg` into a `tiny-skia` pixmap; the GUI preview
//! reuses the same pixmap path via [`rasterize_rgba`]. PDF goes through
//! `svg2pdf`, using its own re-exported `usvg` so the two pipelines do not
//! have to share a tree type.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use tiny_skia::{Pixmap, Transform};
use tracing::info;

/// Output formats offered by the export buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Human-readable filter name for the save dialog.
    pub fn filter_name(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG Files",
            ExportFormat::Pdf => "PDF Files",
        }
    }
}

fn rasterize(svg: &str, scale: f32) -> Result<Pixmap> {
    if scale <= 0.0 {
        bail!("scale must be greater than zero when rasterising");
    }

    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = resvg::usvg::Tree::from_str(svg, &options)
        .map_err(|err| anyhow!("failed to parse generated SVG: {err}"))?;

    let size = tree.size().to_int_size();
    let scaled_width = ((size.width() as f32) * scale).ceil();
    let scaled_height = ((size.height() as f32) * scale).ceil();

    if scaled_width < 1.0 || scaled_height < 1.0 {
        bail!("scaled dimensions collapsed below 1px; try a larger scale factor");
    }
    if scaled_width > u32::MAX as f32 || scaled_height > u32::MAX as f32 {
        bail!("scaled dimensions exceed supported limits; try a smaller scale factor");
    }

    let scaled_width = scaled_width as u32;
    let scaled_height = scaled_height as u32;

    let mut pixmap = Pixmap::new(scaled_width, scaled_height).ok_or_else(|| {
        anyhow!("failed to allocate {scaled_width}x{scaled_height} surface")
    })?;

    let transform = Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(pixmap)
}

/// Rasterise the SVG and encode it as PNG bytes.
pub fn render_png(svg: &str, scale: f32) -> Result<Vec<u8>> {
    let pixmap = rasterize(svg, scale)?;
    pixmap
        .encode_png()
        .map_err(|err| anyhow!("failed to encode PNG output: {err}"))
}

/// Rasterise the SVG and return `(width, height, premultiplied RGBA bytes)`
/// for the on-screen preview texture.
pub fn rasterize_rgba(svg: &str, scale: f32) -> Result<(u32, u32, Vec<u8>)> {
    let pixmap = rasterize(svg, scale)?;
    Ok((pixmap.width(), pixmap.height(), pixmap.data().to_vec()))
}

/// Convert the SVG to a single-page PDF.
pub fn render_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut options = svg2pdf::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = svg2pdf::usvg::Tree::from_str(svg, &options)
        .map_err(|err| anyhow!("failed to parse generated SVG for PDF export: {err}"))?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|err| anyhow!("failed to convert SVG to PDF: {err}"))
}

/// Force the extension matching the export format onto a user-chosen path.
pub fn ensure_extension(path: PathBuf, format: ExportFormat) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(format.extension()) => path,
        _ => path.with_extension(format.extension()),
    }
}

/// Encode the diagram in the requested format and write it to `path`.
///
/// Returns the path actually written (the input path with the proper
/// extension forced).
pub fn write_diagram(svg: &str, path: &Path, format: ExportFormat) -> Result<PathBuf> {
    let path = ensure_extension(path.to_path_buf(), format);

    let bytes = match format {
        ExportFormat::Png => render_png(svg, 1.0)?,
        ExportFormat::Pdf => render_pdf(svg)?,
    };

    fs::write(&path, &bytes)
        .with_context(|| format!("writing diagram to {:?}", path))?;

    info!(path = %path.display(), format = ?format, "diagram exported");
    Ok(path)
}
