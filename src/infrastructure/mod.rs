//! Infrastructure layer: layout engine, data sources and DI container
//!
//! This layer implements the boundary traits and wires up services.

pub mod di;
pub mod error;
pub mod layered;
pub mod layout;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use layered::LayeredLayoutEngine;
pub use layout::{
    CrossingMinimization, Direction, EdgeRouting, EdgeSection, LayoutChild, LayoutEdge,
    LayoutGraph, LayoutOptions, Point,
};
pub use traits::{JsonFileSource, LayoutEngine, RealFileSystem, StaticSource, TreeSource};
