//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::{Bounds, Point};

/// Generate an arbitrary float in some range.
pub fn float_in_range(
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let num: u32 = u.arbitrary()?;
    let t = num as f64 / u32::MAX as f64;
    Ok((1.0 - t) * start + t * end)
}

/// Generate a float in some range, but give it a chance to equal another float.
///
/// Sites that share a coordinate exercise the degenerate paths of the sweep.
pub fn another_float_in_range(
    orig: f64,
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    if u.arbitrary()? {
        Ok(orig.clamp(start, end))
    } else {
        float_in_range(start, end, u)
    }
}

/// A site with coordinates in `[-size, size]`.
pub fn site(size: f64, u: &mut Unstructured<'_>) -> Result<Point, arbitrary::Error> {
    Ok(Point::new(
        float_in_range(-size, size, u)?,
        float_in_range(-size, size, u)?,
    ))
}

/// A set of at most `max_len` sites with coordinates in `[-size, size]`.
///
/// Some of the sites might share an `x` or `y` coordinate with an earlier
/// site, or be an exact duplicate.
pub fn sites(
    size: f64,
    max_len: usize,
    u: &mut Unstructured<'_>,
) -> Result<Vec<Point>, arbitrary::Error> {
    let len = u.int_in_range(0..=max_len)?;
    let mut ret: Vec<Point> = Vec::with_capacity(len);
    for _ in 0..len {
        let p = match ret.last() {
            Some(prev) => Point::new(
                another_float_in_range(prev.x, -size, size, u)?,
                another_float_in_range(prev.y, -size, size, u)?,
            ),
            None => site(size, u)?,
        };
        ret.push(p);
    }
    Ok(ret)
}

/// Sites on a small integer grid, which are full of co-circular and colinear subsets.
pub fn grid_sites(
    size: u8,
    max_len: usize,
    u: &mut Unstructured<'_>,
) -> Result<Vec<Point>, arbitrary::Error> {
    let len = u.int_in_range(0..=max_len)?;
    (0..len)
        .map(|_| {
            Ok(Point::new(
                u.int_in_range(0..=size)? as f64,
                u.int_in_range(0..=size)? as f64,
            ))
        })
        .collect()
}

/// A non-empty clip rectangle inside `[-size, size] x [-size, size]`.
pub fn bounds(size: f64, u: &mut Unstructured<'_>) -> Result<Bounds, arbitrary::Error> {
    let p0 = site(size, u)?;
    let p1 = site(size, u)?;
    let bounds = Bounds::from_corners(p0, p1);
    if bounds.width() == 0.0 || bounds.height() == 0.0 {
        return Ok(bounds.inflate(1.0, 1.0));
    }
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::Precision;
    use crate::Sweeper;

    fn check_bisectors(sites: &[Point], bounds: Bounds) {
        let mut sweeper = Sweeper::new(sites.iter().copied(), bounds).unwrap();
        let clipped = sweeper.run().unwrap();
        let prec = Precision::default();

        for e in &clipped {
            assert!(bounds.contains(&e.start, &prec), "{e:?}");
            assert!(bounds.contains(&e.end, &prec), "{e:?}");
        }
        for e in sweeper.edges_unclipped() {
            let (a, b) = e.sites;
            for p in [e.start, e.end] {
                let (da, db) = (p.distance(&a), p.distance(&b));
                assert!((da - db).abs() <= 1e-6 * da.max(1.0), "{e:?}: {da} vs {db}");
            }
        }
    }

    #[test]
    fn arbitrary_sites() {
        arbtest::arbtest(|u| {
            let sites = sites(100.0, 12, u)?;
            let bounds = bounds(100.0, u)?;
            check_bisectors(&sites, bounds);
            Ok(())
        })
        .budget_ms(2_000);
    }

    #[test]
    fn arbitrary_grid_sites() {
        arbtest::arbtest(|u| {
            let sites = grid_sites(8, 16, u)?;
            check_bisectors(&sites, Bounds::new((0.0, 0.0), 8.0, 8.0));
            Ok(())
        })
        .budget_ms(2_000);
    }
}
