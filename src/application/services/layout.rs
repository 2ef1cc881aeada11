//! Layout engine adapter
//!
//! Translates tree nodes and edges into the engine's graph shape, runs the
//! engine under a timeout, and copies the resulting positions back. Any engine
//! failure degrades to the unpositioned input instead of an error.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::domain::{NodeSizing, Position, TreeEdge, TreeNode};
use crate::infrastructure::traits::LayoutEngine;
use crate::infrastructure::{InfraError, InfraResult, LayoutChild, LayoutEdge, LayoutGraph, LayoutOptions};

/// Build the engine input for `nodes` and `edges`.
///
/// Each edge becomes a simple one-source, one-target engine edge carrying the
/// tree edge id.
pub fn to_layout_graph(
    nodes: &[TreeNode],
    edges: &[TreeEdge],
    sizing: &NodeSizing,
    options: LayoutOptions,
) -> LayoutGraph {
    let children = nodes
        .iter()
        .map(|node| {
            let size = sizing.footprint(node);
            LayoutChild::new(node.id.clone(), size.width, size.height)
        })
        .collect();
    let edges = edges
        .iter()
        .map(|edge| LayoutEdge::simple(edge.id.clone(), edge.source.clone(), edge.target.clone()))
        .collect();
    LayoutGraph::new(children, edges, options)
}

/// Adapter between tree graphs and a [`LayoutEngine`].
pub struct LayoutService {
    engine: Arc<dyn LayoutEngine>,
    sizing: NodeSizing,
    timeout: Option<Duration>,
    defaults: LayoutOptions,
}

impl LayoutService {
    /// Create a new layout service with default layout options.
    pub fn new(engine: Arc<dyn LayoutEngine>, sizing: NodeSizing, timeout: Option<Duration>) -> Self {
        Self {
            engine,
            sizing,
            timeout,
            defaults: LayoutOptions::default(),
        }
    }

    /// Replace the options used when a call passes none.
    pub fn with_defaults(mut self, defaults: LayoutOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn sizing(&self) -> &NodeSizing {
        &self.sizing
    }

    /// Position `nodes` with the engine.
    ///
    /// Never fails: on engine error or timeout the input nodes are returned
    /// unchanged and a warning is logged. Nodes the engine leaves unplaced keep
    /// their current position.
    #[instrument(level = "debug", skip(self, nodes, edges, options), fields(nodes = nodes.len(), edges = edges.len()))]
    pub async fn apply_layout(
        &self,
        nodes: &[TreeNode],
        edges: &[TreeEdge],
        options: Option<LayoutOptions>,
    ) -> Vec<TreeNode> {
        if nodes.is_empty() {
            debug!("apply_layout: no nodes, skipping engine");
            return Vec::new();
        }

        let options = options.unwrap_or(self.defaults);
        let graph = to_layout_graph(nodes, edges, &self.sizing, options);

        match self.run_engine(graph).await {
            Ok(laid_out) => {
                let placed: HashMap<&str, Position> = laid_out
                    .children
                    .iter()
                    .filter_map(|c| match (c.x, c.y) {
                        (Some(x), Some(y)) => Some((c.id.as_str(), Position::new(x, y))),
                        _ => None,
                    })
                    .collect();
                debug!("apply_layout: placed {} of {} nodes", placed.len(), nodes.len());
                nodes
                    .iter()
                    .map(|node| match placed.get(node.id.as_str()) {
                        Some(&position) => node.clone().with_position(position),
                        None => node.clone(),
                    })
                    .collect()
            }
            Err(e) => {
                warn!("Layout failed, using unpositioned nodes: {}", e);
                nodes.to_vec()
            }
        }
    }

    async fn run_engine(&self, graph: LayoutGraph) -> InfraResult<LayoutGraph> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.engine.layout(graph))
                .await
                .map_err(|_| InfraError::Timeout {
                    after_ms: limit.as_millis() as u64,
                })?,
            None => self.engine.layout(graph).await,
        }
    }
}
