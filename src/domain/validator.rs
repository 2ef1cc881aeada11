//! Referential integrity check for built graphs.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::entities::{TreeEdge, TreeNode};
use crate::domain::error::DomainError;

/// Outcome of [`validate_graph`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Strict view: `Err` carrying every message when any edge dangles.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.valid {
            Ok(())
        } else {
            Err(DomainError::DanglingEdges {
                count: self.errors.len(),
                errors: self.errors,
            })
        }
    }
}

/// Check that every edge endpoint names a node in `nodes`.
///
/// One message per missing endpoint; an edge with both ends missing yields two.
/// Cycles are not checked.
pub fn validate_graph(nodes: &[TreeNode], edges: &[TreeEdge]) -> ValidationReport {
    let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let mut errors = Vec::new();

    for edge in edges {
        if !known.contains(edge.source.as_str()) {
            errors.push(format!(
                "Edge {} references non-existent source node {}",
                edge.id, edge.source
            ));
        }
        if !known.contains(edge.target.as_str()) {
            errors.push(format!(
                "Edge {} references non-existent target node {}",
                edge.id, edge.target
            ));
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}
