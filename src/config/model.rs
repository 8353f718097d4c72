// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level layout configuration as read from a TOML file.
///
/// ```toml
/// [canvas]
/// x_scale = 120.0
/// y_scale = 80.0
/// margin = 80.0
///
/// [node.A]
/// x = 0.0
/// y = 4.0
///
/// [node.B]
/// x = 2.0
/// y = 5.0
/// ```
///
/// The `[canvas]` section is optional and has reasonable defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutFile {
    /// Pixel scaling from `[canvas]`.
    #[serde(default)]
    pub canvas: CanvasSection,

    /// All node positions from `[node.<name>]`.
    ///
    /// Keys are the *activity names* (e.g. `"A"`, `"FIM"`).
    #[serde(default)]
    pub node: BTreeMap<String, NodePosition>,
}

/// `[canvas]` section: how plot-unit coordinates map to pixels.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CanvasSection {
    /// Horizontal pixels per plot unit.
    #[serde(default = "default_x_scale")]
    pub x_scale: f32,

    /// Vertical pixels per plot unit.
    #[serde(default = "default_y_scale")]
    pub y_scale: f32,

    /// Outer margin around the drawn area, in pixels.
    #[serde(default = "default_margin")]
    pub margin: f32,
}

fn default_x_scale() -> f32 {
    120.0
}

fn default_y_scale() -> f32 {
    80.0
}

fn default_margin() -> f32 {
    80.0
}

impl Default for CanvasSection {
    fn default() -> Self {
        Self {
            x_scale: default_x_scale(),
            y_scale: default_y_scale(),
            margin: default_margin(),
        }
    }
}

/// `[node.<name>]` section: one diagram position in plot units.
///
/// Larger `y` means higher up in the diagram (the renderer flips into
/// screen coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct NodePosition {
    pub x: f32,
    pub y: f32,
}

impl LayoutFile {
    /// Position of a named activity, if it appears in the table.
    pub fn position_of(&self, name: &str) -> Option<NodePosition> {
        self.node.get(name).copied()
    }
}

/// The built-in position table used when no `--layout` file is given.
///
/// These are the 13 fixed positions of the bundled demo project
/// (activities A through L plus the "FIM" end milestone).
pub fn default_layout() -> LayoutFile {
    let positions = [
        ("A", 0.0, 4.0),
        ("B", 2.0, 5.0),
        ("C", 2.0, 3.0),
        ("D", 2.0, 7.0),
        ("E", 4.0, 5.0),
        ("F", 4.0, 3.0),
        ("G", 4.0, 1.0),
        ("H", 6.0, 7.0),
        ("I", 6.0, 3.0),
        ("J", 8.0, 4.0),
        ("K", 8.0, 6.0),
        ("L", 10.0, 5.0),
        ("FIM", 12.0, 5.0),
    ];

    let node = positions
        .into_iter()
        .map(|(name, x, y)| (name.to_string(), NodePosition { x, y }))
        .collect();

    LayoutFile {
        canvas: CanvasSection::default(),
        node,
    }
}
