//! Input/output contract of the layered layout engine.
//!
//! The shape follows the usual compound-graph JSON used by layered layout
//! libraries: a root with `children`, `edges` carrying `sources`/`targets`, and a
//! `layoutOptions` block. Results come back as the same structure with `x`/`y`
//! filled in on every child.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which way generations flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ancestors above descendants.
    #[default]
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Down | Direction::Up)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeRouting {
    #[default]
    Orthogonal,
    Polyline,
    Straight,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingMinimization {
    /// Alternating barycenter sweeps, keeping the ordering with fewest crossings.
    #[default]
    LayerSweep,
    /// Keep input order within each layer.
    None,
}

/// Layered layout configuration. Every field can be overridden per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub direction: Direction,
    /// Minimum gap between neighbours in the same layer.
    pub node_spacing: f64,
    /// Gap between consecutive layers (generations).
    pub layer_spacing: f64,
    pub edge_routing: EdgeRouting,
    pub crossing_minimization: CrossingMinimization,
    /// Collapse parallel edges (same source and target) into one.
    pub merge_edges: bool,
    /// Barycenter passes for ordering and coordinate relaxation.
    pub sweeps: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Down,
            node_spacing: 30.0,
            layer_spacing: 80.0,
            edge_routing: EdgeRouting::Orthogonal,
            crossing_minimization: CrossingMinimization::LayerSweep,
            merge_edges: true,
            sweeps: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A sized box to be placed. `x`/`y` are the top-left corner once laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutChild {
    pub id: String,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl LayoutChild {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            x: None,
            y: None,
        }
    }
}

/// Routed geometry of one source/target pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSection {
    pub start_point: Point,
    pub end_point: Point,
    #[serde(default)]
    pub bend_points: Vec<Point>,
}

/// Possibly hyper-edge; each source/target pair is laid out separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub id: String,
    pub sources: Vec<String>,
    pub targets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<EdgeSection>,
}

impl LayoutEdge {
    pub fn simple(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sources: vec![source.into()],
            targets: vec![target.into()],
            sections: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutGraph {
    pub id: String,
    pub children: Vec<LayoutChild>,
    pub edges: Vec<LayoutEdge>,
    pub layout_options: LayoutOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl LayoutGraph {
    pub fn new(children: Vec<LayoutChild>, edges: Vec<LayoutEdge>, layout_options: LayoutOptions) -> Self {
        Self {
            id: "root".to_string(),
            children,
            edges,
            layout_options,
            width: None,
            height: None,
        }
    }

    pub fn child(&self, id: &str) -> Option<&LayoutChild> {
        self.children.iter().find(|c| c.id == id)
    }
}

impl fmt::Display for LayoutGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} children, {} edges)",
            self.id,
            self.children.len(),
            self.edges.len()
        )
    }
}
