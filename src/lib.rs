#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod typed_vec;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
pub mod beach_line;
pub mod clip;
pub mod edges;
pub mod frames;
mod geom;
mod num;
pub mod sweep;

#[cfg(feature = "generators")]
pub mod generators;

// pub so that we can use it in fuzz tests, but it's really private
#[doc(hidden)]
pub mod queue;

pub use beach_line::ArcIdx;
pub use edges::{Edge, HalfEdge};
pub use geom::{Bounds, Point};
pub use num::Precision;
pub use sweep::{SweepConfig, SweepObserver, SweepState, Sweeper};

/// Things that can go wrong while sweeping.
///
/// Only [`Error::NaN`] and [`Error::Infinity`] are caused by bad input; the
/// others mean that the sweep itself has a bug.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// An event queue was empty when we asked for its next event.
    #[error("tried to take an event from an empty queue")]
    EmptyQueue,
    /// A circle event referred to an arc that had already left the beach line.
    #[error("circle event for arc {0:?}, which is no longer on the beach line")]
    StaleArc(ArcIdx),
    /// At least one of the inputs was infinite.
    #[error("one of the inputs was infinite")]
    Infinity,
    /// At least one of the inputs was not a number.
    #[error("one of the inputs had a NaN")]
    NaN,
}

/// Computes the Voronoi diagram of `sites`, clipped to `bounds`.
///
/// This is a shortcut for [`Sweeper::new`] followed by [`Sweeper::run`].
/// Duplicate sites are ignored.
pub fn voronoi<P: Into<Point>>(
    sites: impl IntoIterator<Item = P>,
    bounds: Bounds,
) -> Result<Vec<Edge>, Error> {
    let sites: Vec<Point> = sites.into_iter().map(Into::into).collect();
    let edges = Sweeper::new(sites.iter().copied(), bounds)?.run()?;

    #[cfg(feature = "debug-svg")]
    {
        if let Err(e) = svg::save("out.svg", &debug_svg(&sites, &edges, &bounds)) {
            tracing::warn!("failed to write out.svg: {e}");
        }
    }

    Ok(edges)
}

#[cfg(feature = "debug-svg")]
fn debug_svg(sites: &[Point], edges: &[Edge], bounds: &Bounds) -> svg::Document {
    let pad = 1.0;
    let stroke_width = bounds.width().max(bounds.height()) / 512.0;
    let mut doc = svg::Document::new().set(
        "viewBox",
        (
            bounds.min_x() - pad,
            bounds.min_y() - pad,
            bounds.width() + 2.0 * pad,
            bounds.height() + 2.0 * pad,
        ),
    );

    doc = doc.add(
        svg::node::element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("stroke", "gray")
            .set("stroke-width", stroke_width)
            .set("fill", "none"),
    );
    for e in edges {
        doc = doc.add(
            svg::node::element::Line::new()
                .set("x1", e.start.x)
                .set("y1", e.start.y)
                .set("x2", e.end.x)
                .set("y2", e.end.y)
                .set("stroke", "black")
                .set("stroke-width", stroke_width),
        );
    }
    for p in sites {
        doc = doc.add(
            svg::node::element::Circle::new()
                .set("cx", p.x)
                .set("cy", p.y)
                .set("r", 2.0 * stroke_width)
                .set("fill", "red"),
        );
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// The edges as unordered endpoint pairs, sorted, for order-insensitive comparison.
    fn segments(edges: &[Edge]) -> Vec<(Point, Point)> {
        let mut ret: Vec<_> = edges
            .iter()
            .map(|e| (e.start.min(e.end), e.start.max(e.end)))
            .collect();
        ret.sort();
        ret
    }

    #[test]
    fn single_site() {
        let edges = voronoi([(3.0, 4.0)], Bounds::new((0.0, 0.0), 10.0, 10.0)).unwrap();
        assert!(edges.is_empty());
    }

    #[test]
    fn no_sites() {
        let edges = voronoi(Vec::<Point>::new(), Bounds::new((0.0, 0.0), 10.0, 10.0)).unwrap();
        assert!(edges.is_empty());
    }

    #[test]
    fn two_sites() {
        let bounds = Bounds::new((0.0, 0.0), 10.0, 10.0);
        let edges = voronoi([(2.0, 5.0), (8.0, 5.0)], bounds).unwrap();
        assert_eq!(segments(&edges), vec![(p(5.0, 0.0), p(5.0, 10.0))]);
        assert_eq!(edges[0].born_at, 8.0);
        assert_eq!(edges[0].sites, (p(2.0, 5.0), p(8.0, 5.0)));
    }

    #[test]
    fn three_sites() {
        let bounds = Bounds::new((0.0, 0.0), 10.0, 10.0);
        let edges = voronoi([(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)], bounds).unwrap();
        assert_eq!(
            segments(&edges),
            vec![
                (p(0.0, 6.25), p(5.0, 3.75)),
                (p(5.0, 0.0), p(5.0, 3.75)),
                (p(5.0, 3.75), p(10.0, 6.25)),
            ]
        );

        // In creation order: the twins from the second site, the twins from
        // the third site, and then the edge from the circle event.
        assert_eq!(edges[0].born_at, 5.0);
        assert_eq!(edges[1].born_at, 10.0);
        assert_eq!(edges[2].born_at, 11.25);
        assert!(edges.iter().all(|e| e.finished_at > 11.25));
    }

    #[test]
    fn square() {
        let bounds = Bounds::new((-5.0, -5.0), 20.0, 20.0);
        let edges = voronoi(
            [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
            bounds,
        )
        .unwrap();
        assert_eq!(
            segments(&edges),
            vec![
                (p(-5.0, 5.0), p(15.0, 5.0)),
                (p(5.0, -5.0), p(5.0, 15.0)),
            ]
        );
    }

    #[test]
    fn duplicates() {
        let bounds = Bounds::new((0.0, 0.0), 10.0, 10.0);
        let once = voronoi([(2.0, 5.0), (8.0, 5.0), (0.0, 0.0)], bounds).unwrap();
        let repeated = voronoi(
            [(2.0, 5.0), (8.0, 5.0), (2.0, 5.0), (-0.0, 0.0), (0.0, -0.0)],
            bounds,
        )
        .unwrap();
        assert_eq!(once, repeated);
    }

    #[test]
    fn row_and_column() {
        let bounds = Bounds::new((0.0, 0.0), 10.0, 10.0);
        let row = voronoi([(1.0, 5.0), (5.0, 5.0), (9.0, 5.0)], bounds).unwrap();
        assert_eq!(
            segments(&row),
            vec![
                (p(3.0, 0.0), p(3.0, 10.0)),
                (p(7.0, 0.0), p(7.0, 10.0)),
            ]
        );

        let column = voronoi([(5.0, 1.0), (5.0, 9.0), (5.0, 5.0)], bounds).unwrap();
        assert_eq!(
            segments(&column),
            vec![
                (p(0.0, 3.0), p(10.0, 3.0)),
                (p(0.0, 7.0), p(10.0, 7.0)),
            ]
        );
    }

    #[test]
    fn site_on_breakpoint() {
        // The third site lands exactly on the breakpoint between the first two.
        let bounds = Bounds::new((0.0, 0.0), 10.0, 10.0);
        let edges = voronoi([(0.0, 0.0), (5.0, 0.0), (5.0, 1.0)], bounds).unwrap();
        assert_eq!(edges.len(), 3);
        for e in &edges {
            assert!(e.start == p(2.5, 0.5) || e.end == p(2.5, 0.5), "{e:?}");
        }
    }

    #[test]
    fn errors() {
        let bounds = Bounds::new((0.0, 0.0), 10.0, 10.0);
        assert_eq!(voronoi([(f64::NAN, 0.0)], bounds), Err(Error::NaN));
        assert_eq!(
            voronoi([(0.0, f64::NEG_INFINITY)], bounds),
            Err(Error::Infinity)
        );
        assert_eq!(
            Error::EmptyQueue.to_string(),
            "tried to take an event from an empty queue"
        );
    }
}
