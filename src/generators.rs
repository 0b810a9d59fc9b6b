//! Utilities for generating site sets for examples, benchmarks, and test cases.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Bounds, Point};

/// `count` sites with integer coordinates in `[0, width] x [0, height]`.
///
/// The same seed always gives the same sites. Integer coordinates mean that
/// large counts produce plenty of duplicates and co-circular quadruples.
pub fn random_sites(count: usize, width: u32, height: u32, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let x = rng.random_range(0..=width);
            let y = rng.random_range(0..=height);
            Point::new(x as f64, y as f64)
        })
        .collect()
}

/// `count` sites spread uniformly over `bounds`, with no rounding.
///
/// Unlike [`random_sites`], these are almost surely in general position.
pub fn uniform_sites(count: usize, bounds: &Bounds, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Point::new(
                bounds.min_x() + rng.random::<f64>() * bounds.width(),
                bounds.min_y() + rng.random::<f64>() * bounds.height(),
            )
        })
        .collect()
}

/// An `n` by `n` grid of sites, `spacing` apart, with the first one at the origin.
///
/// Every cell of a grid is a square, so this is about as degenerate as it
/// gets: every vertex has four edges.
pub fn grid(n: usize, spacing: f64) -> Vec<Point> {
    let mut ret = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            ret.push(Point::new(i as f64 * spacing, j as f64 * spacing));
        }
    }
    ret
}

/// `n` sites evenly spaced on a circle of radius `radius` around `center`.
///
/// All the edges meet at a single vertex near the center.
pub fn circle(n: usize, center: Point, radius: f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / n as f64;
            Point::new(
                center.x + radius * theta.cos(),
                center.y + radius * theta.sin(),
            )
        })
        .collect()
}
