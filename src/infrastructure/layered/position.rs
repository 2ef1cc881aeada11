//! Coordinate assignment along and across layers.

use generational_arena::{Arena, Index};

use super::graph::LNode;
use super::order::Neighbours;

/// Where each layer sits on the depth axis.
#[derive(Debug, Clone, Default)]
pub(crate) struct LayerMetrics {
    pub top: Vec<f64>,
    pub thickness: Vec<f64>,
    pub spacing: f64,
}

impl LayerMetrics {
    pub fn compute(arena: &Arena<LNode>, layers: &[Vec<Index>], spacing: f64) -> Self {
        let thickness: Vec<f64> = layers
            .iter()
            .map(|layer| {
                layer
                    .iter()
                    .map(|&idx| arena[idx].thickness)
                    .fold(0.0, f64::max)
            })
            .collect();
        let mut top = Vec::with_capacity(layers.len());
        let mut cursor = 0.0;
        for t in &thickness {
            top.push(cursor);
            cursor += t + spacing;
        }
        Self {
            top,
            thickness,
            spacing,
        }
    }

    /// Total extent on the depth axis.
    pub fn depth(&self) -> f64 {
        match (self.top.last(), self.thickness.last()) {
            (Some(top), Some(t)) => top + t,
            _ => 0.0,
        }
    }

    /// Top edge of a node, centred within its layer's thickness.
    pub fn node_top(&self, node: &LNode) -> f64 {
        self.top[node.layer] + (self.thickness[node.layer] - node.thickness) / 2.0
    }

    pub fn layer_middle(&self, layer: usize) -> f64 {
        self.top[layer] + self.thickness[layer] / 2.0
    }

    /// Middle of the gap below `layer`.
    pub fn gap_below(&self, layer: usize) -> f64 {
        self.top[layer] + self.thickness[layer] + self.spacing / 2.0
    }
}

/// Assign breadth-axis centres: pack each layer, then relax every node toward
/// the mean centre of its neighbours while keeping order and spacing.
pub(crate) fn assign_centers(
    arena: &mut Arena<LNode>,
    layers: &[Vec<Index>],
    neighbours: &Neighbours,
    spacing: f64,
    rounds: usize,
) {
    for layer in layers {
        let mut left = 0.0;
        for &idx in layer {
            let node = &mut arena[idx];
            node.center = left + node.breadth / 2.0;
            left += node.breadth + spacing;
        }
    }

    for round in 0..rounds {
        let use_upper = round % 2 == 0;
        let order: Vec<usize> = if use_upper {
            (1..layers.len()).collect()
        } else {
            (0..layers.len().saturating_sub(1)).rev().collect()
        };
        for l in order {
            let desired: Vec<f64> = layers[l]
                .iter()
                .map(|&idx| {
                    let ns = if use_upper {
                        neighbours.above(idx)
                    } else {
                        neighbours.below(idx)
                    };
                    if ns.is_empty() {
                        arena[idx].center
                    } else {
                        ns.iter().map(|&n| arena[n].center).sum::<f64>() / ns.len() as f64
                    }
                })
                .collect();
            let breadths: Vec<f64> = layers[l].iter().map(|&idx| arena[idx].breadth).collect();
            let placed = place_in_order(&desired, &breadths, spacing);
            for (&idx, center) in layers[l].iter().zip(placed) {
                arena[idx].center = center;
            }
        }
    }

    let min_left = arena
        .iter()
        .map(|(_, n)| n.center - n.breadth / 2.0)
        .fold(f64::INFINITY, f64::min);
    if min_left.is_finite() {
        for (_, node) in arena.iter_mut() {
            node.center -= min_left;
        }
    }
}

/// Closest order-preserving placement to `desired` with minimum separation.
///
/// A left-to-right pass and a right-to-left pass each produce a feasible
/// placement; their average is feasible too and is not biased to either side.
pub(crate) fn place_in_order(desired: &[f64], breadths: &[f64], spacing: f64) -> Vec<f64> {
    let n = desired.len();
    if n == 0 {
        return Vec::new();
    }
    let sep = |i: usize| (breadths[i - 1] + breadths[i]) / 2.0 + spacing;

    let mut from_left = vec![0.0; n];
    from_left[0] = desired[0];
    for i in 1..n {
        from_left[i] = desired[i].max(from_left[i - 1] + sep(i));
    }

    let mut from_right = vec![0.0; n];
    from_right[n - 1] = desired[n - 1];
    for i in (0..n - 1).rev() {
        from_right[i] = desired[i].min(from_right[i + 1] - sep(i + 1));
    }

    from_left
        .iter()
        .zip(&from_right)
        .map(|(l, r)| (l + r) / 2.0)
        .collect()
}
