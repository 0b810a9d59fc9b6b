//! Half-edges traced by the beach line's breakpoints, and their assembly into
//! diagram edges.

use std::collections::HashMap;

use kurbo::Vec2;

use crate::beach_line::BeachLine;
use crate::geom::{breakpoint, Point};
use crate::num::Precision;

typed_vec!(
    /// Every half-edge opened during one sweep, in creation order.
    HalfEdgeVec,
    HalfEdgeIdx,
    "h"
);

impl serde::Serialize for HalfEdgeIdx {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.index() as u64)
    }
}

/// The piece of the diagram traced by one breakpoint.
///
/// Its start is known when the breakpoint appears; its end is set when the
/// breakpoint disappears (at a circle event, or when the sweep is done).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HalfEdge {
    /// Where the breakpoint appeared.
    pub start: Point,
    /// Where the breakpoint vanished, once it has.
    pub end: Option<Point>,
    /// The sweep position when the breakpoint appeared.
    pub born_at: f64,
    /// The sweep position when the breakpoint vanished.
    pub finished_at: Option<f64>,
    /// The two sites that this half-edge separates.
    pub sites: (Point, Point),
    /// The half-edge that appeared at the same point, heading the other way.
    pub twin: Option<HalfEdgeIdx>,
}

impl HalfEdge {
    /// Has the end been set?
    pub fn is_finished(&self) -> bool {
        self.end.is_some()
    }
}

/// An edge of the Voronoi diagram.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    /// One endpoint.
    pub start: Point,
    /// The other endpoint.
    pub end: Point,
    /// The sweep position when the first part of this edge appeared.
    pub born_at: f64,
    /// The sweep position when the last part of this edge was finished.
    pub finished_at: f64,
    /// Two sites that this edge is equidistant from.
    pub sites: (Point, Point),
}

impl Edge {
    /// The Euclidean length.
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// This edge as a `kurbo` line.
    pub fn to_kurbo(&self) -> kurbo::Line {
        kurbo::Line::new(self.start.to_kurbo(), self.end.to_kurbo())
    }
}

/// Creates, finishes, and finally assembles half-edges.
#[derive(Clone, Debug, Default)]
pub struct EdgeBuilder {
    half_edges: HalfEdgeVec<HalfEdge>,
    finalized: bool,
}

impl std::ops::Index<HalfEdgeIdx> for EdgeBuilder {
    type Output = HalfEdge;

    fn index(&self, idx: HalfEdgeIdx) -> &HalfEdge {
        &self.half_edges[idx]
    }
}

impl EdgeBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of half-edges opened so far.
    pub fn len(&self) -> usize {
        self.half_edges.len()
    }

    /// Have no half-edges been opened?
    pub fn is_empty(&self) -> bool {
        self.half_edges.is_empty()
    }

    /// Iterates over all half-edges in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (HalfEdgeIdx, &HalfEdge)> + '_ {
        self.half_edges.iter()
    }

    /// Opens a half-edge starting at `start`.
    pub fn open(&mut self, start: Point, born_at: f64, sites: (Point, Point)) -> HalfEdgeIdx {
        self.half_edges.push(HalfEdge {
            start,
            end: None,
            born_at,
            finished_at: None,
            sites,
            twin: None,
        })
    }

    /// Opens two half-edges at the same point, heading in opposite directions.
    pub fn open_twins(
        &mut self,
        start: Point,
        born_at: f64,
        sites: (Point, Point),
    ) -> (HalfEdgeIdx, HalfEdgeIdx) {
        let a = self.open(start, born_at, sites);
        let b = self.open(start, born_at, sites);
        self.half_edges[a].twin = Some(b);
        self.half_edges[b].twin = Some(a);
        (a, b)
    }

    /// Ends a half-edge at `end`.
    ///
    /// A half-edge only ends once: if it was already finished, this does
    /// nothing and returns `false`.
    pub fn finish(&mut self, idx: HalfEdgeIdx, end: Point, finished_at: f64) -> bool {
        let h = &mut self.half_edges[idx];
        if h.is_finished() {
            return false;
        }
        h.end = Some(end);
        h.finished_at = Some(finished_at);
        true
    }

    /// Ends every half-edge that's still on the beach line, as though the
    /// sweep-line had moved on to `far_x`.
    ///
    /// This only does anything the first time it's called; returns whether it did.
    pub fn finalize_all(&mut self, beach: &BeachLine, far_x: f64) -> bool {
        if self.finalized {
            return false;
        }
        self.finalized = true;

        for arc in beach.iter() {
            let a = &beach[arc];
            if let (Some(next), Some(edge)) = (a.next, a.right_edge) {
                let end = breakpoint(&a.site, &beach[next].site, far_x);
                self.finish(edge, end, far_x);
            }
        }
        true
    }

    /// Has [`EdgeBuilder::finalize_all`] run?
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Turns the finished half-edges into diagram edges.
    ///
    /// Half-edges that round to a single point are dropped. Half-edges that
    /// continue each other in a straight line through a shared (rounded)
    /// endpoint are merged, which always covers twins and also covers the
    /// straight lines through degenerate vertices, where more than three
    /// edges meet. Edges come out in the creation order of their first
    /// half-edge.
    pub fn assemble(&self, precision: &Precision) -> Vec<Edge> {
        // (index, rounded start, rounded end) for each surviving half-edge.
        let pieces: Vec<(HalfEdgeIdx, Point, Point)> = self
            .half_edges
            .iter()
            .filter_map(|(idx, h)| {
                let start = h.start.rounded(precision);
                let end = h.end?.rounded(precision);
                (start != end).then_some((idx, start, end))
            })
            .collect();
        let position: HashMap<HalfEdgeIdx, usize> = pieces
            .iter()
            .enumerate()
            .map(|(i, (idx, _, _))| (*idx, i))
            .collect();

        let mut components = UnionFind::new(pieces.len());
        let mut by_endpoint: HashMap<Point, Vec<(usize, Vec2)>> = HashMap::new();
        for (i, &(idx, start, end)) in pieces.iter().enumerate() {
            if let Some(&j) = self.half_edges[idx].twin.and_then(|t| position.get(&t)) {
                components.union(i, j);
            }
            let away = end.to_kurbo() - start.to_kurbo();
            by_endpoint.entry(start).or_default().push((i, away));
            by_endpoint.entry(end).or_default().push((i, -away));
        }

        for incident in by_endpoint.values() {
            for (k, &(i, away_i)) in incident.iter().enumerate() {
                for &(j, away_j) in &incident[k + 1..] {
                    let opposite = away_i.dot(away_j) < 0.0;
                    if opposite && self.same_bisector_direction(pieces[i].0, pieces[j].0) {
                        components.union(i, j);
                    }
                }
            }
        }

        let mut groups: Vec<Vec<usize>> = vec![Vec::new(); pieces.len()];
        for i in 0..pieces.len() {
            groups[components.find(i)].push(i);
        }
        // Each group lists its pieces in creation order, so sorting on the
        // first entry orders edges by their first half-edge.
        groups.retain(|g| !g.is_empty());
        groups.sort_by_key(|g| g[0]);

        groups
            .into_iter()
            .map(|group| {
                let first = pieces[group[0]].0;
                self.merge(first, group[1..].iter().map(|&i| pieces[i].0))
            })
            .collect()
    }

    /// Are the site pairs of `a` and `b` separated along parallel directions?
    fn same_bisector_direction(&self, a: HalfEdgeIdx, b: HalfEdgeIdx) -> bool {
        let diff = |h: &HalfEdge| h.sites.1.to_kurbo() - h.sites.0.to_kurbo();
        let da = diff(&self.half_edges[a]);
        let db = diff(&self.half_edges[b]);
        da.cross(db).abs() <= 1e-9 * da.hypot() * db.hypot()
    }

    /// Merges colinear half-edges into one edge spanning all of them.
    ///
    /// The direction of `first` decides which extreme is the start.
    fn merge(&self, first: HalfEdgeIdx, rest: impl Iterator<Item = HalfEdgeIdx>) -> Edge {
        let h = &self.half_edges[first];
        let h_end = h.end.unwrap_or(h.start);
        let dir = h_end.to_kurbo() - h.start.to_kurbo();
        let proj = |p: &Point| dir.dot(p.to_kurbo().to_vec2());

        let mut edge = Edge {
            start: h.start,
            end: h_end,
            born_at: h.born_at,
            finished_at: h.finished_at.unwrap_or(h.born_at),
            sites: h.sites,
        };
        for idx in rest {
            let h = &self.half_edges[idx];
            edge.born_at = edge.born_at.min(h.born_at);
            if let Some(f) = h.finished_at {
                edge.finished_at = edge.finished_at.max(f);
            }
            for p in [Some(h.start), h.end].into_iter().flatten() {
                if proj(&p) < proj(&edge.start) {
                    edge.start = p;
                }
                if proj(&p) > proj(&edge.end) {
                    edge.end = p;
                }
            }
        }
        edge
    }
}

/// A disjoint-set forest over `0..n`, with path halving.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    /// Joins the sets of `i` and `j`. The smaller root wins, so every
    /// root is the first piece of its set.
    fn union(&mut self, i: usize, j: usize) {
        let (ri, rj) = (self.find(i), self.find(j));
        let (lo, hi) = (ri.min(rj), ri.max(rj));
        self.parent[hi] = lo;
    }
}
