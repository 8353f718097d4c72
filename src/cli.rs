// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The tool itself is a GUI application; the command line only configures
//! the layout table and logging before the window opens.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `cpmdiag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cpmdiag",
    version,
    about = "Generate Critical Path Method (CPM) diagrams from a project activity form.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a layout file (TOML) mapping activity names to diagram
    /// coordinates.
    ///
    /// If omitted, the built-in 13-node demo layout (A-L, FIM) is used.
    #[arg(long, value_name = "PATH")]
    pub layout: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CPMDIAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load + validate the layout, print the resolved position table and
    /// exit without opening a window.
    #[arg(long)]
    pub print_layout: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
