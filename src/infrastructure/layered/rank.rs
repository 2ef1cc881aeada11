//! Layer assignment.

use std::collections::VecDeque;

/// Longest-path layering of an acyclic edge list.
///
/// Sources are then pulled down to sit directly above their nearest successor,
/// so a partner who married into the family shares a layer with their spouse
/// instead of floating at the top. Layers are normalized to start at zero.
pub(crate) fn assign_layers(n: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut succ: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut indegree = vec![0usize; n];
    for &(u, v) in edges {
        succ[u].push(v);
        indegree[v] += 1;
    }
    let is_source: Vec<bool> = indegree.iter().map(|&d| d == 0).collect();

    let mut layer = vec![0usize; n];
    let mut queue: VecDeque<usize> = (0..n).filter(|&v| indegree[v] == 0).collect();
    while let Some(u) = queue.pop_front() {
        for &v in &succ[u] {
            layer[v] = layer[v].max(layer[u] + 1);
            indegree[v] -= 1;
            if indegree[v] == 0 {
                queue.push_back(v);
            }
        }
    }

    for u in 0..n {
        if !is_source[u] {
            continue;
        }
        if let Some(nearest) = succ[u].iter().map(|&v| layer[v]).min() {
            layer[u] = nearest - 1;
        }
    }

    let min = layer.iter().copied().min().unwrap_or(0);
    layer.iter_mut().for_each(|l| *l -= min);
    layer
}
