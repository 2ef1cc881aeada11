//! Bounds and centering over laid-out nodes.

use serde::Serialize;

use crate::domain::entities::{Position, TreeNode};
use crate::domain::sizing::NodeSizing;

/// Axis-aligned box covering every node footprint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GraphBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl GraphBounds {
    pub fn center(&self) -> Position {
        Position::new(
            self.min_x + self.width / 2.0,
            self.min_y + self.height / 2.0,
        )
    }
}

/// Bounding box of `nodes`, treating each position as the top-left corner of
/// the node's footprint. All zeros for an empty slice.
pub fn calculate_graph_bounds(nodes: &[TreeNode], sizing: &NodeSizing) -> GraphBounds {
    if nodes.is_empty() {
        return GraphBounds::default();
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for node in nodes {
        let size = sizing.footprint(node);
        min_x = min_x.min(node.position.x);
        min_y = min_y.min(node.position.y);
        max_x = max_x.max(node.position.x + size.width);
        max_y = max_y.max(node.position.y + size.height);
    }

    GraphBounds {
        min_x,
        min_y,
        max_x,
        max_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

/// Translate every node so the bounding box centre lands on the origin.
pub fn center_graph(nodes: &[TreeNode], sizing: &NodeSizing) -> Vec<TreeNode> {
    let center = calculate_graph_bounds(nodes, sizing).center();
    nodes
        .iter()
        .map(|node| {
            let moved = Position::new(node.position.x - center.x, node.position.y - center.y);
            node.clone().with_position(moved)
        })
        .collect()
}
