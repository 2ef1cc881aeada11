//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on boundary traits (LayoutEngine, TreeSource)
//! but are themselves concrete structs, not traits.

mod layout;
mod orchestrator;

pub use layout::{to_layout_graph, LayoutService};
pub use orchestrator::{
    attach_callbacks, DepthWindow, LayoutOrchestrator, OrchestratorSnapshot, Phase,
};
