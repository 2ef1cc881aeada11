//! Domain layer: entities and graph algorithms
//!
//! This layer is independent of external concerns (no I/O, no async, no config loading).

pub mod builder;
pub mod entities;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod sizing;
pub mod validator;

pub use builder::build_graph;
pub use entities::*;
pub use error::DomainError;
pub use filter::{filter_graph_by_depth, filter_graph_by_lineage};
pub use geometry::{calculate_graph_bounds, center_graph, GraphBounds};
pub use sizing::{NodeSizing, Size};
pub use validator::{validate_graph, ValidationReport};
