// src/lib.rs

pub mod cli;
pub mod config;
pub mod cpm;
pub mod errors;
pub mod gui;
pub mod logging;
pub mod pipeline;
pub mod render;

use anyhow::{anyhow, Result};
use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::load_or_default;
use crate::config::model::LayoutFile;
use crate::gui::CpmApp;
use crate::pipeline::Pipeline;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - layout resolution (file or built-in defaults)
/// - the generation pipeline
/// - the egui window
pub fn run(args: CliArgs) -> Result<()> {
    let layout = load_or_default(args.layout.as_deref())?;

    if args.print_layout {
        print_layout(&layout);
        return Ok(());
    }

    info!(nodes = layout.node.len(), "layout resolved; opening window");

    let pipeline = Pipeline::new(layout);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 840.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Gerador de Diagrama CPM Estilo PMBOK",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(CpmApp::new(pipeline)))
        }),
    )
    .map_err(|e| anyhow!("failed to run GUI: {e}"))
}

/// Simple diagnostic output: print the resolved position table.
fn print_layout(layout: &LayoutFile) {
    println!("cpmdiag layout");
    println!(
        "  canvas: x_scale = {}, y_scale = {}, margin = {}",
        layout.canvas.x_scale, layout.canvas.y_scale, layout.canvas.margin
    );
    println!();

    println!("nodes ({}):", layout.node.len());
    for (name, pos) in layout.node.iter() {
        println!("  - {name}: ({}, {})", pos.x, pos.y);
    }
}
