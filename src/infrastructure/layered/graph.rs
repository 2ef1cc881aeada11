//! Arena-backed working graph: input checks, cycle breaking, dummy insertion.

use std::collections::HashMap;

use generational_arena::{Arena, Index};

use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::layout::LayoutGraph;

/// A node of the working graph: either an input child or a dummy splitting a
/// long edge into unit-span links.
#[derive(Debug, Clone)]
pub(crate) struct LNode {
    /// Input child index, `None` for dummies.
    pub child: Option<usize>,
    /// Extent along the layer.
    pub breadth: f64,
    /// Extent across layers.
    pub thickness: f64,
    pub layer: usize,
    /// Centre on the breadth axis.
    pub center: f64,
}

/// Unit-span link, always pointing from `upper` to the next layer down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    pub upper: Index,
    pub lower: Index,
}

/// One source/target pair of an input edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pair {
    pub edge: usize,
    pub source: usize,
    pub target: usize,
}

/// Reject graphs the engine cannot place and expand edges into pairs.
pub(crate) fn check_input(graph: &LayoutGraph) -> InfraResult<Vec<Pair>> {
    let opts = &graph.layout_options;
    if !opts.node_spacing.is_finite() || opts.node_spacing < 0.0 {
        return Err(InfraError::layout(format!(
            "node spacing must be a non-negative number, got {}",
            opts.node_spacing
        )));
    }
    if !opts.layer_spacing.is_finite() || opts.layer_spacing < 0.0 {
        return Err(InfraError::layout(format!(
            "layer spacing must be a non-negative number, got {}",
            opts.layer_spacing
        )));
    }

    let mut index: HashMap<&str, usize> = HashMap::with_capacity(graph.children.len());
    for (i, child) in graph.children.iter().enumerate() {
        let sized = child.width.is_finite()
            && child.height.is_finite()
            && child.width >= 0.0
            && child.height >= 0.0;
        if !sized {
            return Err(InfraError::layout(format!(
                "child {} has invalid size {}x{}",
                child.id, child.width, child.height
            )));
        }
        if index.insert(child.id.as_str(), i).is_some() {
            return Err(InfraError::layout(format!("duplicate child id {}", child.id)));
        }
    }

    let lookup = |edge_id: &str, id: &str| {
        index.get(id).copied().ok_or_else(|| {
            InfraError::layout(format!("edge {} references unknown node {}", edge_id, id))
        })
    };

    let mut pairs = Vec::new();
    for (e, edge) in graph.edges.iter().enumerate() {
        if edge.sources.is_empty() || edge.targets.is_empty() {
            return Err(InfraError::layout(format!(
                "edge {} needs at least one source and one target",
                edge.id
            )));
        }
        for s in &edge.sources {
            let source = lookup(edge.id.as_str(), s.as_str())?;
            for t in &edge.targets {
                let target = lookup(edge.id.as_str(), t.as_str())?;
                pairs.push(Pair {
                    edge: e,
                    source,
                    target,
                });
            }
        }
    }
    Ok(pairs)
}

/// Flags the links that must be reversed to make `links` acyclic.
///
/// Iterative DFS in input order; an edge into a node still on the stack is a
/// back edge and gets reversed.
pub(crate) fn back_edges(n: usize, links: &[(usize, usize)]) -> Vec<bool> {
    let mut out: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, &(u, _)) in links.iter().enumerate() {
        out[u].push(i);
    }

    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Active,
        Done,
    }

    let mut mark = vec![Mark::New; n];
    let mut reversed = vec![false; links.len()];

    for root in 0..n {
        if mark[root] != Mark::New {
            continue;
        }
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        mark[root] = Mark::Active;
        while let Some(top) = stack.last_mut() {
            let node = top.0;
            if let Some(&link) = out[node].get(top.1) {
                top.1 += 1;
                let target = links[link].1;
                match mark[target] {
                    Mark::New => {
                        mark[target] = Mark::Active;
                        stack.push((target, 0));
                    }
                    Mark::Active => reversed[link] = true,
                    Mark::Done => {}
                }
            } else {
                mark[node] = Mark::Done;
                stack.pop();
            }
        }
    }
    reversed
}

/// Working graph after layering: real nodes, dummies and unit-span links.
pub(crate) struct LayeredGraph {
    pub arena: Arena<LNode>,
    /// Arena index of each input child, by input position.
    pub children: Vec<Index>,
    pub links: Vec<Link>,
    /// Path of every chain in original edge direction.
    pub chains: Vec<Vec<Index>>,
}

impl LayeredGraph {
    /// Insert real nodes and split every oriented chain into unit-span links.
    ///
    /// `oriented[i]` must point from a lower layer number to a higher one;
    /// `reversed[i]` tells whether that is against the original direction.
    pub fn assemble(
        sizes: &[(f64, f64)],
        layers: &[usize],
        oriented: &[(usize, usize)],
        reversed: &[bool],
    ) -> Self {
        let mut arena = Arena::with_capacity(sizes.len());
        let children: Vec<Index> = sizes
            .iter()
            .zip(layers)
            .enumerate()
            .map(|(i, (&(breadth, thickness), &layer))| {
                arena.insert(LNode {
                    child: Some(i),
                    breadth,
                    thickness,
                    layer,
                    center: 0.0,
                })
            })
            .collect();

        let mut links = Vec::new();
        let mut chains = Vec::with_capacity(oriented.len());
        for (&(u, v), &rev) in oriented.iter().zip(reversed) {
            let mut path = vec![children[u]];
            for layer in layers[u] + 1..layers[v] {
                path.push(arena.insert(LNode {
                    child: None,
                    breadth: 0.0,
                    thickness: 0.0,
                    layer,
                    center: 0.0,
                }));
            }
            path.push(children[v]);

            links.extend(path.windows(2).map(|w| Link {
                upper: w[0],
                lower: w[1],
            }));

            if rev {
                path.reverse();
            }
            chains.push(path);
        }

        Self {
            arena,
            children,
            links,
            chains,
        }
    }

    /// Node indices grouped by layer, in arena insertion order.
    pub fn layer_groups(&self) -> Vec<Vec<Index>> {
        let depth = self
            .arena
            .iter()
            .map(|(_, n)| n.layer + 1)
            .max()
            .unwrap_or(0);
        let mut groups = vec![Vec::new(); depth];
        for (idx, node) in self.arena.iter() {
            groups[node.layer].push(idx);
        }
        groups
    }
}
