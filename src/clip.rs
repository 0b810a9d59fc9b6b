//! Clipping edges to the output rectangle.

use arrayvec::ArrayVec;

use crate::edges::Edge;
use crate::geom::{Bounds, Point};
use crate::num::Precision;

/// How far past the end of a rectangle side we still count an intersection.
const SIDE_SLOP: f64 = 1e-9;

/// The parameters (along `edge`) and positions where `edge` crosses the sides of `bounds`.
///
/// A crossing at a corner shows up once for each of the two sides.
fn side_crossings(edge: &Edge, bounds: &Bounds) -> ArrayVec<(f64, Point), 4> {
    let p0 = edge.start.to_kurbo();
    let d = edge.end.to_kurbo() - p0;
    let mut ret = ArrayVec::new();

    for side in bounds.sides() {
        let s = side.p1 - side.p0;
        let denom = d.cross(s);
        if denom == 0.0 {
            // Parallel sides never cross (and a colinear overlap always
            // reaches one of the adjacent sides).
            continue;
        }
        let w = side.p0 - p0;
        let t = w.cross(s) / denom;
        let u = w.cross(d) / denom;
        let on_segment = -SIDE_SLOP..=1.0 + SIDE_SLOP;
        if on_segment.contains(&t) && on_segment.contains(&u) {
            let t = t.clamp(0.0, 1.0);
            ret.push((t, Point::from(p0 + d * t)));
        }
    }
    ret
}

/// Clips `edge` to `bounds`.
///
/// Endpoints outside `bounds` move to the nearest side crossing along the
/// edge, and all endpoints are rounded to `precision`. Returns `None` if
/// nothing is left, including when the edge only touches `bounds` at a
/// single point.
pub fn clip_edge(edge: &Edge, bounds: &Bounds, precision: &Precision) -> Option<Edge> {
    let start_inside = bounds.contains(&edge.start, precision);
    let end_inside = bounds.contains(&edge.end, precision);

    let mut clipped = *edge;
    if !start_inside || !end_inside {
        let crossings = side_crossings(edge, bounds);
        let first = crossings.iter().min_by(|a, b| a.0.total_cmp(&b.0))?;
        let last = crossings.iter().max_by(|a, b| a.0.total_cmp(&b.0))?;
        if !start_inside {
            clipped.start = first.1;
        }
        if !end_inside {
            clipped.end = last.1;
        }
    }

    clipped.start = clipped.start.rounded(precision);
    clipped.end = clipped.end.rounded(precision);
    (clipped.start != clipped.end).then_some(clipped)
}

/// Clips every edge, dropping the ones that miss `bounds`.
pub fn clip_edges(edges: &[Edge], bounds: &Bounds, precision: &Precision) -> Vec<Edge> {
    edges
        .iter()
        .filter_map(|e| clip_edge(e, bounds, precision))
        .collect()
}
