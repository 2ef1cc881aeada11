//! Layered (Sugiyama-style) layout engine.
//!
//! Pipeline:
//! 1. Input checks and hyper-edge expansion
//! 2. Parallel edge merging (optional)
//! 3. Cycle breaking by reversing DFS back edges
//! 4. Longest-path layering with sources pulled toward their successors
//! 5. Dummy nodes for edges spanning several layers
//! 6. Crossing minimization (barycenter sweeps)
//! 7. Coordinate assignment with spacing constraints
//! 8. Direction mapping and edge routing

mod graph;
mod order;
mod position;
mod rank;
mod route;

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::layout::{CrossingMinimization, LayoutGraph};
use crate::infrastructure::traits::LayoutEngine;

use graph::{back_edges, check_input, LayeredGraph};
use order::{minimize_crossings, Neighbours};
use position::{assign_centers, LayerMetrics};
use route::{route_chain, Frame};

/// Deterministic layered layout, run on tokio's blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayeredLayoutEngine;

impl LayeredLayoutEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LayoutEngine for LayeredLayoutEngine {
    async fn layout(&self, graph: LayoutGraph) -> InfraResult<LayoutGraph> {
        tokio::task::spawn_blocking(move || layout_sync(graph))
            .await
            .map_err(|e| InfraError::layout(format!("layout task aborted: {}", e)))?
    }
}

/// Synchronous layout of `graph`. Same input always yields the same output.
#[instrument(level = "debug", skip(graph), fields(graph = %graph))]
pub fn layout_sync(mut graph: LayoutGraph) -> InfraResult<LayoutGraph> {
    let pairs = check_input(&graph)?;
    if graph.children.is_empty() {
        graph.width = Some(0.0);
        graph.height = Some(0.0);
        return Ok(graph);
    }
    let opts = graph.layout_options;
    let n = graph.children.len();

    // One chain per distinct link; self-loops get no chain.
    let mut chain_ends: Vec<(usize, usize)> = Vec::new();
    let mut chain_of_pair: Vec<Option<usize>> = Vec::with_capacity(pairs.len());
    let mut merged: HashMap<(usize, usize), usize> = HashMap::new();
    for pair in &pairs {
        if pair.source == pair.target {
            chain_of_pair.push(None);
            continue;
        }
        let key = (pair.source, pair.target);
        let existing = if opts.merge_edges {
            merged.get(&key).copied()
        } else {
            None
        };
        let chain = match existing {
            Some(c) => c,
            None => {
                chain_ends.push(key);
                merged.insert(key, chain_ends.len() - 1);
                chain_ends.len() - 1
            }
        };
        chain_of_pair.push(Some(chain));
    }

    let reversed = back_edges(n, &chain_ends);
    let oriented: Vec<(usize, usize)> = chain_ends
        .iter()
        .zip(&reversed)
        .map(|(&(s, t), &rev)| if rev { (t, s) } else { (s, t) })
        .collect();
    let layers = rank::assign_layers(n, &oriented);

    let vertical = opts.direction.is_vertical();
    let sizes: Vec<(f64, f64)> = graph
        .children
        .iter()
        .map(|c| {
            if vertical {
                (c.width, c.height)
            } else {
                (c.height, c.width)
            }
        })
        .collect();

    let mut work = LayeredGraph::assemble(&sizes, &layers, &oriented, &reversed);
    let neighbours = Neighbours::from_links(&work.links);

    let mut groups = work.layer_groups();
    if opts.crossing_minimization == CrossingMinimization::LayerSweep {
        groups = minimize_crossings(groups, &neighbours, opts.sweeps);
    }
    assign_centers(
        &mut work.arena,
        &groups,
        &neighbours,
        opts.node_spacing,
        opts.sweeps * 2,
    );
    let metrics = LayerMetrics::compute(&work.arena, &groups, opts.layer_spacing);
    let frame = Frame {
        direction: opts.direction,
        depth: metrics.depth(),
    };

    let mut breadth = 0.0_f64;
    for (child, &idx) in graph.children.iter_mut().zip(&work.children) {
        let node = &work.arena[idx];
        let left = node.center - node.breadth / 2.0;
        let corner = frame.corner(left, metrics.node_top(node), node.thickness);
        child.x = Some(corner.x);
        child.y = Some(corner.y);
        breadth = breadth.max(left + node.breadth);
    }

    for edge in graph.edges.iter_mut() {
        edge.sections.clear();
    }
    for (pair, chain) in pairs.iter().zip(&chain_of_pair) {
        let path = match chain {
            Some(c) => work.chains[*c].clone(),
            None => vec![work.children[pair.source]],
        };
        let section = route_chain(&work.arena, &path, &metrics, opts.edge_routing, &frame);
        graph.edges[pair.edge].sections.push(section);
    }

    let (width, height) = if vertical {
        (breadth, metrics.depth())
    } else {
        (metrics.depth(), breadth)
    };
    graph.width = Some(width);
    graph.height = Some(height);

    debug!(
        "layout: {} layers, {} working nodes, {}x{}",
        groups.len(),
        work.arena.len(),
        width,
        height
    );
    Ok(graph)
}
