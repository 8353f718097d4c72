// src/config/loader.rs

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::model::{default_layout, LayoutFile};
use crate::config::validate::validate_layout;

/// Load a layout file from a given path and return the raw `LayoutFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (finite coordinates, etc.). Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<LayoutFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading layout file at {:?}", path))?;

    let layout: LayoutFile = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML layout from {:?}", path))?;

    Ok(layout)
}

/// Load a layout file from path and run basic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - at least one node position,
///   - finite coordinates,
///   - sane canvas scaling.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<LayoutFile> {
    let layout = load_from_path(&path)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Resolve the effective layout: a user-supplied file, or the built-in table.
pub fn load_or_default(path: Option<&str>) -> Result<LayoutFile> {
    match path {
        Some(p) => load_and_validate(p),
        None => Ok(default_layout()),
    }
}
