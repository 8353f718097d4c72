// src/errors.rs

//! Crate-wide error type.
//!
//! The GUI layer maps these variants onto the two user-facing dialog
//! messages; the variants themselves stay technical so tests and logs can
//! tell the failure modes apart.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpmError {
    #[error("invalid duration {value:?} in activity row {row}")]
    InvalidDuration { row: usize, value: String },

    #[error("no activities entered")]
    EmptyProject,

    #[error("dependency cycle detected involving activity '{0}'")]
    DependencyCycle(String),

    #[error(transparent)]
    Render(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CpmError>;
