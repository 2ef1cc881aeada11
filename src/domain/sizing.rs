//! Node footprint policy shared by the layout adapter and the geometry helpers.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{NodeKind, TreeNode};

/// Width and height in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Fixed footprint per node kind.
///
/// The layout engine spaces nodes from these sizes, so they must match what the
/// rendering surface actually draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSizing {
    pub person: Size,
    pub union: Size,
}

impl NodeSizing {
    pub const PERSON: Size = Size::new(180.0, 80.0);
    pub const UNION: Size = Size::new(20.0, 20.0);

    pub fn size_of(&self, kind: NodeKind) -> Size {
        match kind {
            NodeKind::Person => self.person,
            NodeKind::Union => self.union,
        }
    }

    pub fn footprint(&self, node: &TreeNode) -> Size {
        self.size_of(node.kind())
    }
}

impl Default for NodeSizing {
    fn default() -> Self {
        Self {
            person: Self::PERSON,
            union: Self::UNION,
        }
    }
}
