//! Crossing minimization by alternating barycenter sweeps.

use std::cmp::Ordering;
use std::collections::HashMap;

use generational_arena::Index;

use super::graph::Link;

/// Upper and lower neighbour lists per node, built from unit-span links.
#[derive(Debug, Default)]
pub(crate) struct Neighbours {
    pub upper: HashMap<Index, Vec<Index>>,
    pub lower: HashMap<Index, Vec<Index>>,
}

impl Neighbours {
    pub fn from_links(links: &[Link]) -> Self {
        let mut n = Self::default();
        for link in links {
            n.lower.entry(link.upper).or_default().push(link.lower);
            n.upper.entry(link.lower).or_default().push(link.upper);
        }
        n
    }

    pub fn above(&self, idx: Index) -> &[Index] {
        self.upper.get(&idx).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn below(&self, idx: Index) -> &[Index] {
        self.lower.get(&idx).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Reorder layers to reduce crossings, returning the best ordering seen.
///
/// Even sweeps go top-down using upper neighbours, odd sweeps bottom-up using
/// lower neighbours. Ties keep their current relative order, which makes the
/// result deterministic for a given input order.
pub(crate) fn minimize_crossings(
    mut layers: Vec<Vec<Index>>,
    neighbours: &Neighbours,
    sweeps: usize,
) -> Vec<Vec<Index>> {
    let mut best = layers.clone();
    let mut best_crossings = count_crossings(&layers, neighbours);

    for sweep in 0..sweeps {
        if best_crossings == 0 {
            break;
        }
        let downward = sweep % 2 == 0;
        let order: Vec<usize> = if downward {
            (1..layers.len()).collect()
        } else {
            (0..layers.len().saturating_sub(1)).rev().collect()
        };

        for l in order {
            let fixed = if downward { l - 1 } else { l + 1 };
            let positions = positions_of(&layers[fixed]);
            let current = std::mem::take(&mut layers[l]);
            layers[l] = reorder(current, &positions, |idx| {
                if downward {
                    neighbours.above(idx)
                } else {
                    neighbours.below(idx)
                }
            });
        }

        let crossings = count_crossings(&layers, neighbours);
        if crossings < best_crossings {
            best_crossings = crossings;
            best = layers.clone();
        }
    }

    best
}

fn positions_of(layer: &[Index]) -> HashMap<Index, usize> {
    layer.iter().enumerate().map(|(i, &idx)| (idx, i)).collect()
}

/// Stable sort by barycenter; nodes without neighbours keep their slot value.
fn reorder<'a, F>(layer: Vec<Index>, fixed: &HashMap<Index, usize>, neighbours_of: F) -> Vec<Index>
where
    F: Fn(Index) -> &'a [Index],
{
    let mut keyed: Vec<(f64, Index)> = layer
        .iter()
        .enumerate()
        .map(|(slot, &idx)| {
            let ns: Vec<usize> = neighbours_of(idx)
                .iter()
                .filter_map(|n| fixed.get(n).copied())
                .collect();
            let key = if ns.is_empty() {
                slot as f64
            } else {
                ns.iter().sum::<usize>() as f64 / ns.len() as f64
            };
            (key, idx)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    keyed.into_iter().map(|(_, idx)| idx).collect()
}

/// Total number of pairwise link crossings between adjacent layers.
pub(crate) fn count_crossings(layers: &[Vec<Index>], neighbours: &Neighbours) -> usize {
    let mut total = 0;
    for pair in layers.windows(2) {
        let upper = positions_of(&pair[0]);
        let lower = positions_of(&pair[1]);
        let mut segments: Vec<(usize, usize)> = Vec::new();
        for idx in &pair[0] {
            for n in neighbours.below(*idx) {
                if let Some(&p) = lower.get(n) {
                    segments.push((upper[idx], p));
                }
            }
        }
        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                if (a.0 < b.0 && a.1 > b.1) || (a.0 > b.0 && a.1 < b.1) {
                    total += 1;
                }
            }
        }
    }
    total
}
