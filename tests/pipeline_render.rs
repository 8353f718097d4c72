use std::error::Error;

use cpmdiag::config::default_layout;
use cpmdiag::cpm::ActivityRow;
use cpmdiag::errors::CpmError;
use cpmdiag::pipeline::Pipeline;
use cpmdiag::render::{ensure_extension, render_pdf, render_png, write_diagram, ExportFormat};

type TestResult = Result<(), Box<dyn Error>>;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

fn row(name: &str, duration: &str, dependencies: &str) -> ActivityRow {
    ActivityRow {
        name: name.to_string(),
        duration: duration.to_string(),
        dependencies: dependencies.to_string(),
    }
}

fn diamond_rows() -> Vec<ActivityRow> {
    vec![
        row("A", "1", ""),
        row("B", "2", "A"),
        row("C", "5", "A"),
        row("D", "1", "B, C"),
    ]
}

#[test]
fn generated_svg_carries_boxes_labels_and_summary() -> TestResult {
    let pipeline = Pipeline::new(default_layout());
    let diagram = pipeline.generate(&diamond_rows())?;

    assert_eq!(diagram.critical_path, vec!["A", "C", "D"]);
    assert_eq!(diagram.total_duration, 7);

    let svg = &diagram.svg;
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("Diagrama de Caminho Crítico (CPM) - Layout Estilo PMBOK"));

    // Node annotation boxes.
    assert!(svg.contains("Início:"));
    assert!(svg.contains("Fim:"));
    assert!(svg.contains("Duração: 5"));

    // Critical vs. normal fills and edge labels.
    assert!(svg.contains("#FFEBEE"));
    assert!(svg.contains("#E3F2FD"));
    assert!(svg.contains("5 dias"));

    // Summary box ('>' is XML-escaped inside the text element).
    assert!(svg.contains("Resumo do Caminho Crítico:"));
    assert!(svg.contains("A -&gt; C -&gt; D"));
    assert!(svg.contains("Duração Total: 7 dias"));

    Ok(())
}

#[test]
fn generation_is_deterministic_for_unchanged_rows() -> TestResult {
    let pipeline = Pipeline::new(default_layout());
    let rows = diamond_rows();

    let first = pipeline.generate(&rows)?;
    let second = pipeline.generate(&rows)?;

    assert_eq!(first.svg, second.svg);
    assert_eq!(first.critical_path, second.critical_path);
    assert_eq!(first.total_duration, second.total_duration);

    Ok(())
}

#[test]
fn activity_outside_the_layout_table_gets_no_box() -> TestResult {
    let pipeline = Pipeline::new(default_layout());
    let mut rows = diamond_rows();
    rows.push(row("X", "0", ""));

    let diagram = pipeline.generate(&rows)?;
    // X is not on the critical path and has no position, so its name never
    // reaches the SVG text elements.
    assert!(!diagram.svg.contains(">X<"));

    Ok(())
}

#[test]
fn all_activities_unplaced_fails_rendering() {
    let pipeline = Pipeline::new(default_layout());
    let result = pipeline.generate(&[row("ZZZ", "2", "")]);

    assert!(matches!(result, Err(CpmError::Render(_))));
}

#[test]
fn invalid_duration_surfaces_before_any_rendering() {
    let pipeline = Pipeline::new(default_layout());
    let result = pipeline.generate(&[row("A", "um", "")]);

    assert!(matches!(result, Err(CpmError::InvalidDuration { .. })));
}

#[test]
fn empty_form_is_an_empty_project() {
    let pipeline = Pipeline::new(default_layout());
    assert!(matches!(
        pipeline.generate(&[]),
        Err(CpmError::EmptyProject)
    ));
}

#[test]
fn cyclic_dependencies_surface_before_any_rendering() {
    let pipeline = Pipeline::new(default_layout());
    let result = pipeline.generate(&[row("A", "1", "B"), row("B", "1", "A")]);

    assert!(matches!(result, Err(CpmError::DependencyCycle(_))));
}

#[test]
fn png_export_produces_a_png_file() -> TestResult {
    let pipeline = Pipeline::new(default_layout());
    let diagram = pipeline.generate(&diamond_rows())?;

    let bytes = render_png(&diagram.svg, 1.0)?;
    assert_eq!(&bytes[..8], &PNG_SIGNATURE[..]);

    Ok(())
}

#[test]
fn pdf_export_produces_a_pdf_file() -> TestResult {
    let pipeline = Pipeline::new(default_layout());
    let diagram = pipeline.generate(&diamond_rows())?;

    let bytes = render_pdf(&diagram.svg)?;
    assert!(bytes.starts_with(b"%PDF"));

    Ok(())
}

#[test]
fn write_diagram_forces_the_proper_extension() -> TestResult {
    let pipeline = Pipeline::new(default_layout());
    let diagram = pipeline.generate(&diamond_rows())?;

    let dir = tempfile::tempdir()?;
    let chosen = dir.path().join("diagrama.txt");

    let written = write_diagram(&diagram.svg, &chosen, ExportFormat::Png)?;
    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("png"));

    let bytes = std::fs::read(&written)?;
    assert_eq!(&bytes[..8], &PNG_SIGNATURE[..]);

    Ok(())
}

#[test]
fn ensure_extension_keeps_matching_extensions() {
    let path = std::path::PathBuf::from("out.PNG");
    assert_eq!(
        ensure_extension(path.clone(), ExportFormat::Png),
        std::path::PathBuf::from("out.PNG")
    );
    assert_eq!(
        ensure_extension(path, ExportFormat::Pdf),
        std::path::PathBuf::from("out.pdf")
    );
}
