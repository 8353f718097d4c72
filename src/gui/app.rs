// src/gui/app.rs

//! The application window: activity form, action buttons, diagram preview,
//! and the modal "Erro" / "Sucesso" dialogs.
//!
//! Every button press runs synchronously inside the egui update; there is no
//! background work. The whole pipeline is re-run from the raw form contents
//! on every generate/export, matching the tool's regenerate-everything
//! lifecycle.

use tracing::warn;

use crate::cpm::ActivityRow;
use crate::errors::CpmError;
use crate::pipeline::{Diagram, Pipeline};
use crate::render::{rasterize_rgba, write_diagram, ExportFormat};

/// Messages shown to the user for the two recognised failure modes.
const MSG_INVALID_DURATION: &str = "Por favor, insira durações válidas.";
const MSG_NO_PATH: &str =
    "Não foi possível calcular um caminho crítico. Verifique as dependências.";

pub struct CpmApp {
    pipeline: Pipeline,
    rows: Vec<ActivityRow>,
    preview: Option<Preview>,
    error: Option<String>,
    notice: Option<String>,
}

struct Preview {
    texture: egui::TextureHandle,
    size: egui::Vec2,
    summary: String,
}

impl CpmApp {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            // The form starts with a single empty row.
            rows: vec![ActivityRow::default()],
            preview: None,
            error: None,
            notice: None,
        }
    }

    fn add_row(&mut self) {
        self.rows.push(ActivityRow::default());
    }

    /// Run the pipeline and refresh the preview, or surface an error dialog.
    fn generate(&mut self, ctx: &egui::Context) -> Option<Diagram> {
        match self.pipeline.generate(&self.rows) {
            Ok(diagram) => {
                match self.build_preview(ctx, &diagram) {
                    Ok(preview) => self.preview = Some(preview),
                    Err(err) => {
                        warn!(error = %err, "failed to rasterise preview");
                        self.error = Some(err.to_string());
                        return None;
                    }
                }
                Some(diagram)
            }
            Err(err) => {
                self.error = Some(user_message(&err));
                None
            }
        }
    }

    fn build_preview(&self, ctx: &egui::Context, diagram: &Diagram) -> anyhow::Result<Preview> {
        let (width, height, rgba) = rasterize_rgba(&diagram.svg, 1.0)?;
        let image = egui::ColorImage::from_rgba_premultiplied(
            [width as usize, height as usize],
            &rgba,
        );
        let texture = ctx.load_texture("diagrama-cpm", image, egui::TextureOptions::LINEAR);

        let summary = format!(
            "Resumo do Caminho Crítico: {}  |  Duração Total: {} dias",
            diagram.critical_path.join(" -> "),
            diagram.total_duration
        );

        Ok(Preview {
            texture,
            size: egui::vec2(width as f32, height as f32),
            summary,
        })
    }

    /// Regenerate from the current form contents, then offer a save dialog.
    ///
    /// A cancelled dialog writes nothing.
    fn export(&mut self, ctx: &egui::Context, format: ExportFormat) {
        let Some(diagram) = self.generate(ctx) else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter(format.filter_name(), &[format.extension()])
            .set_file_name(format!("diagrama-cpm.{}", format.extension()))
            .save_file()
        else {
            return;
        };

        match write_diagram(&diagram.svg, &path, format) {
            Ok(written) => {
                self.notice = Some(format!("Diagrama salvo como {}", written.display()));
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("activity-rows")
                .num_columns(3)
                .spacing([8.0, 6.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.strong("Atividade");
                    ui.strong("Duração (dias)");
                    ui.strong("Dependências (separadas por vírgula)");
                    ui.end_row();

                    for row in &mut self.rows {
                        ui.add(egui::TextEdit::singleline(&mut row.name).desired_width(80.0));
                        ui.add(
                            egui::TextEdit::singleline(&mut row.duration).desired_width(80.0),
                        );
                        ui.add(
                            egui::TextEdit::singleline(&mut row.dependencies)
                                .desired_width(200.0),
                        );
                        ui.end_row();
                    }
                });
        });
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.error.clone() {
            egui::Window::new("Erro")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&message);
                    if ui.button("OK").clicked() {
                        self.error = None;
                    }
                });
        }

        if let Some(message) = self.notice.clone() {
            egui::Window::new("Sucesso")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&message);
                    if ui.button("OK").clicked() {
                        self.notice = None;
                    }
                });
        }
    }
}

impl eframe::App for CpmApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("actions").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Insira as Atividades, Duração e Dependências");
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("Adicionar Atividade").clicked() {
                    self.add_row();
                }
                if ui.button("Gerar Diagrama CPM").clicked() {
                    self.generate(ctx);
                }
                if ui.button("Salvar como PNG").clicked() {
                    self.export(ctx, ExportFormat::Png);
                }
                if ui.button("Salvar como PDF").clicked() {
                    self.export(ctx, ExportFormat::Pdf);
                }
            });
            ui.add_space(4.0);
        });

        egui::SidePanel::left("form")
            .min_width(420.0)
            .resizable(true)
            .show(ctx, |ui| {
                self.show_form(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            match &self.preview {
                Some(preview) => {
                    ui.label(&preview.summary);
                    ui.separator();
                    egui::ScrollArea::both().show(ui, |ui| {
                        ui.image((preview.texture.id(), preview.size));
                    });
                }
                None => {
                    ui.label(
                        "Preencha as atividades e clique em \"Gerar Diagrama CPM\".",
                    );
                }
            }
        });

        self.show_dialogs(ctx);
    }
}

/// Map pipeline errors onto the user-facing dialog messages.
fn user_message(err: &CpmError) -> String {
    match err {
        CpmError::InvalidDuration { .. } => MSG_INVALID_DURATION.to_string(),
        CpmError::EmptyProject | CpmError::DependencyCycle(_) => MSG_NO_PATH.to_string(),
        other => other.to_string(),
    }
}
