use beachline::{Bounds, Point, SweepState, Sweeper};
use proptest::prelude::*;

fn circumcenter(a: Point, b: Point, c: Point) -> Option<(Point, f64)> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d == 0.0 {
        return None;
    }
    let sq = |p: Point| p.x * p.x + p.y * p.y;
    let x = (sq(a) * (b.y - c.y) + sq(b) * (c.y - a.y) + sq(c) * (a.y - b.y)) / d;
    let y = (sq(a) * (c.x - b.x) + sq(b) * (a.x - c.x) + sq(c) * (b.x - a.x)) / d;
    let center = Point::new(x, y);
    Some((center, center.distance(&a)))
}

/// Counts Delaunay triangles and edges by testing every circle through three sites.
///
/// Only meaningful when no four sites are co-circular.
fn brute_force_delaunay(sites: &[Point]) -> (usize, usize) {
    let mut triangles = 0;
    let mut edges = std::collections::HashSet::new();
    let n = sites.len();
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let Some((center, r)) = circumcenter(sites[i], sites[j], sites[k]) else {
                    continue;
                };
                let empty = (0..n)
                    .filter(|&m| m != i && m != j && m != k)
                    .all(|m| sites[m].distance(&center) > r * (1.0 + 1e-9));
                if empty {
                    triangles += 1;
                    edges.extend([(i, j), (i, k), (j, k)]);
                }
            }
        }
    }
    (triangles, edges.len())
}

fn generic_sites(max: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 3..max)
        .prop_map(|v| v.into_iter().map(Point::from).collect())
}

fn grid_sites(max: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((0..=10u8, 0..=10u8), 0..max).prop_map(|v| {
        v.into_iter()
            .map(|(x, y)| Point::new(x as f64, y as f64))
            .collect()
    })
}

fn clip_rect() -> Bounds {
    Bounds::new((-50.0, -50.0), 100.0, 100.0)
}

proptest! {
    #[test]
    fn matches_brute_force(sites in generic_sites(10)) {
        let mut sweeper = Sweeper::new(sites.iter().copied(), clip_rect()).unwrap();
        sweeper.run().unwrap();

        let (triangles, delaunay_edges) = brute_force_delaunay(&sites);
        prop_assert_eq!(sweeper.edges_unclipped().len(), delaunay_edges);
        // One event per site, and one per Voronoi vertex.
        prop_assert_eq!(sweeper.events_handled(), sites.len() + triangles);
    }

    #[test]
    fn endpoints_on_bisectors(sites in grid_sites(20)) {
        let bounds = Bounds::new((0.0, 0.0), 10.0, 10.0);
        let mut sweeper = Sweeper::new(sites.iter().copied(), bounds).unwrap();
        let clipped = sweeper.run().unwrap();

        for e in sweeper.edges_unclipped().iter().chain(&clipped) {
            let (a, b) = e.sites;
            prop_assert_ne!(e.start, e.end);
            for p in [e.start, e.end] {
                let (da, db) = (p.distance(&a), p.distance(&b));
                prop_assert!((da - db).abs() <= 1e-5 * da.max(1.0), "{:?}", e);
            }
        }
    }

    #[test]
    fn half_edges_all_finished(sites in generic_sites(12)) {
        let mut sweeper = Sweeper::new(sites, clip_rect()).unwrap();
        while sweeper.step().unwrap() != SweepState::Finished {
            prop_assert!(!sweeper.half_edges().is_finalized());
        }
        prop_assert!(sweeper.half_edges().iter().all(|(_, h)| h.is_finished()));
        for (_, h) in sweeper.half_edges().iter() {
            prop_assert!(h.born_at <= h.finished_at.unwrap());
        }
    }

    #[test]
    fn deterministic(sites in grid_sites(20)) {
        let bounds = Bounds::new((0.0, 0.0), 10.0, 10.0);
        let a = beachline::voronoi(sites.iter().copied(), bounds).unwrap();
        let b = beachline::voronoi(sites.iter().copied(), bounds).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn site_order_is_irrelevant(sites in generic_sites(10)) {
        let forward = beachline::voronoi(sites.iter().copied(), clip_rect()).unwrap();
        let backward = beachline::voronoi(sites.iter().rev().copied(), clip_rect()).unwrap();
        prop_assert_eq!(forward, backward);
    }
}
