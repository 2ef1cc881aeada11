//! Edge routing and direction mapping.

use generational_arena::{Arena, Index};

use super::graph::LNode;
use super::position::LayerMetrics;
use crate::infrastructure::layout::{Direction, EdgeRouting, EdgeSection, Point};

/// Maps (breadth, depth) working coordinates onto the requested direction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub direction: Direction,
    pub depth: f64,
}

impl Frame {
    pub fn point(&self, breadth: f64, depth: f64) -> Point {
        match self.direction {
            Direction::Down => Point::new(breadth, depth),
            Direction::Up => Point::new(breadth, self.depth - depth),
            Direction::Right => Point::new(depth, breadth),
            Direction::Left => Point::new(self.depth - depth, breadth),
        }
    }

    /// Top-left corner of a box whose near edges sit at `left` and `top`.
    pub fn corner(&self, left: f64, top: f64, thickness: f64) -> Point {
        match self.direction {
            Direction::Down => Point::new(left, top),
            Direction::Up => Point::new(left, self.depth - top - thickness),
            Direction::Right => Point::new(top, left),
            Direction::Left => Point::new(self.depth - top - thickness, left),
        }
    }
}

/// Route one chain (original edge direction) into a section.
pub(crate) fn route_chain(
    arena: &Arena<LNode>,
    path: &[Index],
    metrics: &LayerMetrics,
    routing: EdgeRouting,
    frame: &Frame,
) -> EdgeSection {
    let first = &arena[path[0]];
    let last = &arena[path[path.len() - 1]];

    if path.len() < 2 {
        let p = frame.point(first.center, metrics.node_top(first) + first.thickness);
        return EdgeSection {
            start_point: p,
            end_point: p,
            bend_points: Vec::new(),
        };
    }

    let heading_down = arena[path[1]].layer > first.layer;
    let start = (first.center, port_depth(first, metrics, heading_down));
    let arriving_down = last.layer > arena[path[path.len() - 2]].layer;
    let end = (last.center, port_depth(last, metrics, !arriving_down));

    let mut points = vec![start];
    match routing {
        EdgeRouting::Straight => {}
        EdgeRouting::Polyline => {
            for &idx in &path[1..path.len() - 1] {
                let node = &arena[idx];
                points.push((node.center, metrics.layer_middle(node.layer)));
            }
        }
        EdgeRouting::Orthogonal => {
            for w in path.windows(2) {
                let (a, b) = (&arena[w[0]], &arena[w[1]]);
                let mid = metrics.gap_below(a.layer.min(b.layer));
                points.push((a.center, mid));
                points.push((b.center, mid));
            }
        }
    }
    points.push(end);

    let points = simplify(points);
    let bend_points = points[1..points.len() - 1]
        .iter()
        .map(|&(b, d)| frame.point(b, d))
        .collect();

    EdgeSection {
        start_point: frame.point(start.0, start.1),
        end_point: frame.point(end.0, end.1),
        bend_points,
    }
}

/// Bottom of the node when leaving toward a lower layer, top otherwise.
fn port_depth(node: &LNode, metrics: &LayerMetrics, bottom: bool) -> f64 {
    if node.child.is_none() {
        return metrics.layer_middle(node.layer);
    }
    let top = metrics.node_top(node);
    if bottom {
        top + node.thickness
    } else {
        top
    }
}

/// Drop repeated points and the middle of any three collinear axis-aligned points.
fn simplify(points: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    const EPS: f64 = 1e-9;
    let same = |a: f64, b: f64| (a - b).abs() < EPS;

    let mut out: Vec<(f64, f64)> = Vec::with_capacity(points.len());
    for p in points {
        if let Some(&last) = out.last() {
            if same(last.0, p.0) && same(last.1, p.1) {
                continue;
            }
        }
        if out.len() >= 2 {
            let a = out[out.len() - 2];
            let b = out[out.len() - 1];
            let collinear = (same(a.0, b.0) && same(b.0, p.0)) || (same(a.1, b.1) && same(b.1, p.1));
            if collinear {
                out.pop();
            }
        }
        out.push(p);
    }
    if out.len() == 1 {
        out.push(out[0]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplify_removes_duplicates_and_collinear_points() {
        let pts = vec![(0.0, 0.0), (0.0, 5.0), (0.0, 5.0), (0.0, 10.0), (4.0, 10.0)];
        assert_eq!(simplify(pts), vec![(0.0, 0.0), (0.0, 10.0), (4.0, 10.0)]);
    }

    #[test]
    fn frame_flips_depth_for_upward_layouts() {
        let frame = Frame {
            direction: Direction::Up,
            depth: 100.0,
        };
        assert_eq!(frame.point(5.0, 10.0), Point::new(5.0, 90.0));
        assert_eq!(frame.corner(5.0, 10.0, 30.0), Point::new(5.0, 60.0));
    }
}
