//! Subgraph extraction around a proband.
//!
//! Both filters are pure: they return new vectors and keep the input order of
//! surviving nodes and edges.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::domain::entities::{EdgeKind, Graph, NodeKind, TreeEdge, TreeMode, TreeNode, TreeQuery};

/// Keep every node within `max_depth` hops of `proband_id`, ignoring edge direction.
///
/// Distances are plain BFS layers over a symmetric adjacency map, so the first
/// (shortest) distance wins. Edges survive only if both endpoints do. A missing
/// proband yields the empty graph.
pub fn filter_graph_by_depth(
    nodes: &[TreeNode],
    edges: &[TreeEdge],
    proband_id: &str,
    max_depth: usize,
) -> Graph {
    if !nodes.iter().any(|n| n.id == proband_id) {
        debug!("filter_graph_by_depth: proband {} not in graph", proband_id);
        return Graph::default();
    }

    let adjacency = undirected_adjacency(edges);
    let mut distance: HashMap<&str, usize> = HashMap::new();
    let mut queue = VecDeque::new();

    distance.insert(proband_id, 0);
    queue.push_back(proband_id);

    while let Some(current) = queue.pop_front() {
        let d = distance[current];
        if d >= max_depth {
            continue;
        }
        for &next in adjacency.get(current).into_iter().flatten() {
            if !distance.contains_key(next) {
                distance.insert(next, d + 1);
                queue.push_back(next);
            }
        }
    }

    let kept: HashSet<&str> = distance.keys().copied().collect();
    let graph = retain(nodes, edges, &kept);
    debug!(
        "filter_graph_by_depth: {} -> {} nodes within {} hops of {}",
        nodes.len(),
        graph.nodes.len(),
        max_depth,
        proband_id
    );
    graph
}

/// Directed lineage extraction following the data-source query modes.
///
/// `depth` counts generations: stepping onto a person costs one, stepping onto a
/// union node is free. Ancestors walk edges backwards, descendants forwards, and
/// hourglass is the union of both walks. Walking down through a union also keeps
/// that union's other partners, without expanding from them.
pub fn filter_graph_by_lineage(nodes: &[TreeNode], edges: &[TreeEdge], query: &TreeQuery) -> Graph {
    let proband = query.proband_id.as_str();
    if !nodes.iter().any(|n| n.id == proband) {
        debug!("filter_graph_by_lineage: proband {} not in graph", proband);
        return Graph::default();
    }

    let kinds: HashMap<&str, NodeKind> = nodes.iter().map(|n| (n.id.as_str(), n.kind())).collect();
    let mut forward: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut backward: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        forward.entry(&edge.source).or_default().push(&edge.target);
        backward.entry(&edge.target).or_default().push(&edge.source);
    }

    let mut kept: HashSet<&str> = HashSet::new();
    kept.insert(proband);

    if matches!(query.mode, TreeMode::Ancestors | TreeMode::Hourglass) {
        kept.extend(generations_walk(proband, &backward, &kinds, query.depth));
    }
    if matches!(query.mode, TreeMode::Descendants | TreeMode::Hourglass) {
        let reached = generations_walk(proband, &forward, &kinds, query.depth);
        let partners: Vec<&str> = edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Partner && reached.contains(e.target.as_str()))
            .map(|e| e.source.as_str())
            .collect();
        kept.extend(reached);
        kept.extend(partners);
    }

    retain(nodes, edges, &kept)
}

/// 0-1 BFS over one edge direction, returning every node at most `depth`
/// generations away.
fn generations_walk<'a>(
    start: &'a str,
    adjacency: &HashMap<&'a str, Vec<&'a str>>,
    kinds: &HashMap<&'a str, NodeKind>,
    depth: usize,
) -> HashSet<&'a str> {
    let mut generation: HashMap<&str, usize> = HashMap::new();
    let mut queue = VecDeque::new();
    generation.insert(start, 0);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let g = generation[current];
        // persons at the boundary are leaves; unions carry their generation through
        if g >= depth && kinds.get(current) == Some(&NodeKind::Person) {
            continue;
        }
        for &next in adjacency.get(current).into_iter().flatten() {
            let cost = match kinds.get(next) {
                Some(NodeKind::Union) => 0,
                Some(NodeKind::Person) => 1,
                None => continue,
            };
            let candidate = g + cost;
            if candidate > depth {
                continue;
            }
            let better = generation.get(next).map_or(true, |&known| candidate < known);
            if better {
                generation.insert(next, candidate);
                if cost == 0 {
                    queue.push_front(next);
                } else {
                    queue.push_back(next);
                }
            }
        }
    }

    generation.into_keys().collect()
}

/// Symmetric adjacency: every edge is entered under both endpoints.
fn undirected_adjacency(edges: &[TreeEdge]) -> HashMap<&str, Vec<&str>> {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        adjacency.entry(&edge.source).or_default().push(&edge.target);
        adjacency.entry(&edge.target).or_default().push(&edge.source);
    }
    adjacency
}

fn retain(nodes: &[TreeNode], edges: &[TreeEdge], kept: &HashSet<&str>) -> Graph {
    let nodes = nodes
        .iter()
        .filter(|n| kept.contains(n.id.as_str()))
        .cloned()
        .collect();
    let edges = edges
        .iter()
        .filter(|e| kept.contains(e.source.as_str()) && kept.contains(e.target.as_str()))
        .cloned()
        .collect();
    Graph::new(nodes, edges)
}
