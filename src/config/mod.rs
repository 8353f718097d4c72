// src/config/mod.rs

//! Layout configuration for cpmdiag.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a layout file from disk (`loader.rs`).
//! - Validate basic invariants like finite coordinates (`validate.rs`).
//!
//! The layout maps activity names to diagram coordinates. Activities missing
//! from the table get no annotated box in the rendered diagram.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default};
pub use model::{default_layout, CanvasSection, LayoutFile, NodePosition};
pub use validate::validate_layout;
