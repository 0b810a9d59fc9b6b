//! The beach line: the sequence of parabolic arcs closest to the sweep-line.

use crate::edges::HalfEdgeIdx;
use crate::geom::{breakpoint, parabola_at_y, Point};
use crate::num::Precision;
use crate::Error;

typed_vec!(
    /// The arena that owns every arc that was ever on the beach line.
    ArcVec,
    ArcIdx,
    "a"
);

/// A pending circle event: `arc` will vanish when the sweep-line reaches the
/// rightmost point of the circle centered at `vertex`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CircleEvent {
    /// The arc that gets squeezed out.
    pub arc: ArcIdx,
    /// The Voronoi vertex that appears when it does.
    pub vertex: Point,
}

/// One parabolic arc.
///
/// Arcs are linked bottom-to-top. The half-edge between an arc and its
/// `prev` neighbor is its `left_edge`, and the one between it and its
/// `next` neighbor is its `right_edge`; both neighbors refer to the same
/// half-edge.
#[derive(Clone, Debug)]
pub struct Arc {
    /// The site whose parabola this is.
    pub site: Point,
    /// The arc below this one.
    pub prev: Option<ArcIdx>,
    /// The arc above this one.
    pub next: Option<ArcIdx>,
    /// The half-edge traced by the breakpoint with `prev`.
    pub left_edge: Option<HalfEdgeIdx>,
    /// The half-edge traced by the breakpoint with `next`.
    pub right_edge: Option<HalfEdgeIdx>,
    /// The queued circle event that would remove this arc, if any.
    pub circle: Option<CircleEvent>,
    /// Cleared when a circle event removes the arc.
    pub alive: bool,
}

impl Arc {
    fn new(site: Point) -> Self {
        Arc {
            site,
            prev: None,
            next: None,
            left_edge: None,
            right_edge: None,
            circle: None,
            alive: true,
        }
    }
}

/// Where a new site lands on the beach line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Location {
    /// There are no arcs yet.
    Empty,
    /// The site lands on `arc`, and `at` is the point on `arc` level with the site.
    Split {
        /// The arc that owns the site.
        arc: ArcIdx,
        /// The start point of the two new half-edges.
        at: Point,
    },
    /// No arc owns the site; it goes on top of `last`.
    Append {
        /// The current topmost arc.
        last: ArcIdx,
    },
}

/// The beach line, as a linked list of arcs in an arena.
///
/// Arcs are never removed from the arena, only unlinked, so an [`ArcIdx`]
/// stays valid (if possibly dead) forever.
#[derive(Clone, Debug, Default)]
pub struct BeachLine {
    arcs: ArcVec<Arc>,
    head: Option<ArcIdx>,
}

impl std::ops::Index<ArcIdx> for BeachLine {
    type Output = Arc;

    fn index(&self, idx: ArcIdx) -> &Arc {
        &self.arcs[idx]
    }
}

impl std::ops::IndexMut<ArcIdx> for BeachLine {
    fn index_mut(&mut self, idx: ArcIdx) -> &mut Arc {
        &mut self.arcs[idx]
    }
}

impl BeachLine {
    /// An empty beach line.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bottom arc.
    pub fn head(&self) -> Option<ArcIdx> {
        self.head
    }

    /// The number of arcs ever created, dead or alive.
    pub fn arena_len(&self) -> usize {
        self.arcs.len()
    }

    /// Iterates over the live arcs, bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = ArcIdx> + '_ {
        std::iter::successors(self.head, |&idx| self.arcs[idx].next)
    }

    /// Does `arc` own the point `p` when the sweep-line is at `p.x`?
    ///
    /// If so, returns the point on `arc` directly level with `p`.
    fn owner_point(&self, arc: ArcIdx, p: &Point, precision: &Precision) -> Option<Point> {
        let a = &self.arcs[arc];
        if a.site.x == p.x {
            return None;
        }

        let above_lower = a.prev.map_or(true, |prev| {
            let lo = breakpoint(&self.arcs[prev].site, &a.site, p.x);
            precision.le(lo.y, p.y)
        });
        let below_upper = a.next.map_or(true, |next| {
            let hi = breakpoint(&a.site, &self.arcs[next].site, p.x);
            precision.le(p.y, hi.y)
        });

        (above_lower && below_upper).then(|| parabola_at_y(&a.site, p.y, p.x))
    }

    /// Finds the arc that a new site at `p` splits.
    ///
    /// This is a linear scan from the bottom; the first arc that owns `p`
    /// wins, so a site exactly on a breakpoint goes to the lower arc.
    pub fn locate(&self, p: &Point, precision: &Precision) -> Location {
        let mut last = match self.head {
            None => return Location::Empty,
            Some(head) => head,
        };
        for arc in self.iter() {
            if let Some(at) = self.owner_point(arc, p, precision) {
                return Location::Split { arc, at };
            }
            last = arc;
        }
        Location::Append { last }
    }

    /// Creates the first arc.
    pub fn push_first(&mut self, site: Point) -> ArcIdx {
        debug_assert!(self.head.is_none());
        let idx = self.arcs.push(Arc::new(site));
        self.head = Some(idx);
        idx
    }

    /// Splits `arc` in two and puts a new arc for `site` in between.
    ///
    /// The arcs end up as `arc`, then the new arc, then a copy of `arc`.
    /// `lower_edge` and `upper_edge` are the half-edges traced by the two new
    /// breakpoints. The copy inherits `arc`'s upper neighbor and right edge.
    ///
    /// Returns the new arc and the copy.
    pub fn split(
        &mut self,
        arc: ArcIdx,
        site: Point,
        lower_edge: HalfEdgeIdx,
        upper_edge: HalfEdgeIdx,
    ) -> (ArcIdx, ArcIdx) {
        let old = self.arcs[arc].clone();
        let new = self.arcs.push(Arc::new(site));
        let copy = self.arcs.push(Arc {
            prev: Some(new),
            next: old.next,
            left_edge: Some(upper_edge),
            right_edge: old.right_edge,
            ..Arc::new(old.site)
        });
        if let Some(next) = old.next {
            self.arcs[next].prev = Some(copy);
        }

        let new_arc = &mut self.arcs[new];
        new_arc.prev = Some(arc);
        new_arc.next = Some(copy);
        new_arc.left_edge = Some(lower_edge);
        new_arc.right_edge = Some(upper_edge);

        let arc = &mut self.arcs[arc];
        arc.next = Some(new);
        arc.right_edge = Some(lower_edge);

        (new, copy)
    }

    /// Puts a new arc for `site` on top of `last`, separated by `edge`.
    pub fn append(&mut self, last: ArcIdx, site: Point, edge: HalfEdgeIdx) -> ArcIdx {
        debug_assert!(self.arcs[last].next.is_none());
        let new = self.arcs.push(Arc {
            prev: Some(last),
            left_edge: Some(edge),
            ..Arc::new(site)
        });
        let last = &mut self.arcs[last];
        last.next = Some(new);
        last.right_edge = Some(edge);
        new
    }

    /// Unlinks `arc`, which must have neighbors on both sides.
    ///
    /// Returns the two neighbors, which are now adjacent. The caller is
    /// responsible for giving them a shared edge with
    /// [`BeachLine::join`].
    pub fn remove(&mut self, arc: ArcIdx) -> Result<(ArcIdx, ArcIdx), Error> {
        let a = &self.arcs[arc];
        let (Some(prev), Some(next)) = (a.prev, a.next) else {
            return Err(Error::StaleArc(arc));
        };
        if !a.alive {
            return Err(Error::StaleArc(arc));
        }

        let a = &mut self.arcs[arc];
        a.alive = false;
        a.prev = None;
        a.next = None;
        a.circle = None;
        self.arcs[prev].next = Some(next);
        self.arcs[next].prev = Some(prev);
        Ok((prev, next))
    }

    /// Records that `edge` separates the adjacent arcs `lower` and `upper`.
    pub fn join(&mut self, lower: ArcIdx, upper: ArcIdx, edge: HalfEdgeIdx) {
        debug_assert_eq!(self.arcs[lower].next, Some(upper));
        self.arcs[lower].right_edge = Some(edge);
        self.arcs[upper].left_edge = Some(edge);
    }

    /// The sites of the arcs on either side of `arc`, if it has two neighbors.
    pub fn neighbor_sites(&self, arc: ArcIdx) -> Option<(Point, Point)> {
        let a = &self.arcs[arc];
        Some((self.arcs[a.prev?].site, self.arcs[a.next?].site))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::{EdgeBuilder, HalfEdgeIdx};
    use assert_matches::assert_matches;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn two_edges() -> (HalfEdgeIdx, HalfEdgeIdx) {
        let mut edges = EdgeBuilder::new();
        edges.open_twins(p(0.0, 0.0), 0.0, (p(0.0, 0.0), p(1.0, 1.0)))
    }

    fn sites(beach: &BeachLine) -> Vec<Point> {
        beach.iter().map(|a| beach[a].site).collect()
    }

    #[test]
    fn first_site() {
        let mut beach = BeachLine::new();
        let prec = Precision::default();
        assert_eq!(beach.locate(&p(0.0, 0.0), &prec), Location::Empty);

        let a = beach.push_first(p(0.0, 0.0));
        assert_eq!(beach.head(), Some(a));
        assert_eq!(
            beach.locate(&p(5.0, 10.0), &prec),
            Location::Split {
                arc: a,
                at: p(-7.5, 10.0)
            }
        );
    }

    #[test]
    fn same_x_appends() {
        let mut beach = BeachLine::new();
        let prec = Precision::default();
        let a = beach.push_first(p(0.0, 0.0));
        assert_eq!(
            beach.locate(&p(0.0, 5.0), &prec),
            Location::Append { last: a }
        );

        let (e, _) = two_edges();
        let b = beach.append(a, p(0.0, 5.0), e);
        assert_eq!(beach[a].right_edge, Some(e));
        assert_eq!(beach[b].left_edge, Some(e));
        assert_eq!(sites(&beach), vec![p(0.0, 0.0), p(0.0, 5.0)]);

        // A later site between the two stacked sites belongs to the lower arc
        // if it's on the boundary, and to the upper arc above it.
        assert_matches!(
            beach.locate(&p(1.0, 2.5), &prec),
            Location::Split { arc, .. } if arc == a
        );
        assert_matches!(
            beach.locate(&p(1.0, 3.0), &prec),
            Location::Split { arc, .. } if arc == b
        );
    }

    #[test]
    fn split_and_remove() {
        let mut beach = BeachLine::new();
        let a = beach.push_first(p(0.0, 0.0));
        let (lo, hi) = two_edges();
        let (new, copy) = beach.split(a, p(5.0, 10.0), lo, hi);

        assert_eq!(
            sites(&beach),
            vec![p(0.0, 0.0), p(5.0, 10.0), p(0.0, 0.0)]
        );
        assert_eq!(beach[a].right_edge, Some(lo));
        assert_eq!(beach[new].left_edge, Some(lo));
        assert_eq!(beach[new].right_edge, Some(hi));
        assert_eq!(beach[copy].left_edge, Some(hi));
        assert_eq!(beach[copy].right_edge, None);
        assert_eq!(
            beach.neighbor_sites(new),
            Some((p(0.0, 0.0), p(0.0, 0.0)))
        );
        assert_eq!(beach.neighbor_sites(a), None);

        assert_matches!(beach.remove(a), Err(Error::StaleArc(_)));
        assert_eq!(beach.remove(new).unwrap(), (a, copy));
        assert!(!beach[new].alive);
        assert_eq!(sites(&beach), vec![p(0.0, 0.0), p(0.0, 0.0)]);
        assert_matches!(beach.remove(new), Err(Error::StaleArc(_)));

        let (joined, _) = two_edges();
        beach.join(a, copy, joined);
        assert_eq!(beach[a].right_edge, Some(joined));
        assert_eq!(beach[copy].left_edge, Some(joined));
        assert_eq!(beach.arena_len(), 3);
    }
}
