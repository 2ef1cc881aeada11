//! Domain-level errors (no I/O concerns)

use thiserror::Error;

/// Domain errors represent violations of graph invariants.
///
/// The builder, filters and geometry helpers are total and never return these;
/// they come from strict views such as [`ValidationReport::into_result`].
///
/// [`ValidationReport::into_result`]: crate::domain::validator::ValidationReport::into_result
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("graph has {count} dangling edge endpoint(s): {}", errors.join("; "))]
    DanglingEdges { count: usize, errors: Vec<String> },

    #[error("proband not found in graph: {0}")]
    UnknownProband(String),
}
