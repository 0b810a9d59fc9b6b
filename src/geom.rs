//! Geometric primitives, like points, parabola breakpoints and circumcircles.
//!
//! Our sweep-line moves in increasing `x`, so a site's parabola at sweep
//! position `l` is the set of points equidistant from the site and the
//! vertical line `x = l`. "Below" and "above" refer to smaller and larger
//! `y`, and the beach line is ordered bottom-to-top.

use crate::num::{CheapOrderedFloat, Precision};

/// A two-dimensional point.
///
/// Points are sorted by `x` and then by `y`, for the convenience of our
/// sweep-line algorithm (which moves in increasing `x`).
///
/// Equality and hashing are by bit pattern (with `-0.0` treated as `0.0`),
/// which is what lets the site queue recognize duplicate sites.
#[derive(Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate; the sweep direction.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    ///
    /// Non-finite coordinates are allowed here; the sweep rejects them.
    pub fn new(x: f64, y: f64) -> Self {
        Point { x: x + 0.0, y: y + 0.0 }
    }

    fn bits(&self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Are both coordinates finite?
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// This point with both coordinates rounded to `precision`.
    pub fn rounded(&self, precision: &Precision) -> Point {
        Point {
            x: precision.round(self.x),
            y: precision.round(self.y),
        }
    }

    /// Converts to a `kurbo` point.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Point {}

impl std::hash::Hash for Point {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bits().hash(state)
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (
            CheapOrderedFloat::from(self.x),
            CheapOrderedFloat::from(self.y),
        )
            .cmp(&(
                CheapOrderedFloat::from(other.x),
                CheapOrderedFloat::from(other.y),
            ))
    }
}

impl PartialOrd for Point {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Does the path `a -> b -> c` make a strict clockwise turn?
///
/// Colinear triples (including `a == c`) don't.
pub fn turns_clockwise(a: &Point, b: &Point, c: &Point) -> bool {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y) < 0.0
}

/// The center of the circle through `a`, `b` and `c`, or `None` if they're colinear.
///
/// This intersects two perpendicular bisectors by solving the 2x2 system in closed
/// form (O'Rourke, *Computational Geometry in C*, 2nd ed., p. 189).
pub fn circumcenter(a: &Point, b: &Point, c: &Point) -> Option<Point> {
    let ab_x = b.x - a.x;
    let ab_y = b.y - a.y;
    let ac_x = c.x - a.x;
    let ac_y = c.y - a.y;
    let e = ab_x * (a.x + b.x) + ab_y * (a.y + b.y);
    let f = ac_x * (a.x + c.x) + ac_y * (a.y + c.y);
    let g = 2.0 * (ab_x * (c.y - b.y) - ab_y * (c.x - b.x));

    if g == 0.0 {
        return None;
    }

    let center = Point::new((ac_y * e - ab_y * f) / g, (ab_x * f - ac_x * e) / g);
    center.is_finite().then_some(center)
}

/// If the arcs of `a`, `b` and `c` (bottom to top) could ever squeeze out `b`,
/// returns the sweep position at which that happens, along with the Voronoi vertex
/// that appears there.
///
/// The sweep position is the rightmost point of the circumcircle.
pub fn circle_event(a: &Point, b: &Point, c: &Point) -> Option<(f64, Point)> {
    if !turns_clockwise(a, b, c) {
        return None;
    }
    let center = circumcenter(a, b, c)?;
    Some((center.x + center.distance(a), center))
}

/// The point on `focus`'s parabola at height `y`, for the sweep-line at `sweep_x`.
///
/// The focus must be strictly behind the sweep-line.
pub fn parabola_at_y(focus: &Point, y: f64, sweep_x: f64) -> Point {
    debug_assert!(focus.x != sweep_x);
    let dy = focus.y - y;
    let x = (focus.x * focus.x + dy * dy - sweep_x * sweep_x) / (2.0 * focus.x - 2.0 * sweep_x);
    Point { x, y }
}

/// The breakpoint between the parabolas of `lower` and `upper` (in that order on
/// the beach line) for the sweep-line at `sweep_x`.
pub fn breakpoint(lower: &Point, upper: &Point, sweep_x: f64) -> Point {
    let mut focus = lower;
    let y = if lower.x == upper.x {
        (lower.y + upper.y) / 2.0
    } else if upper.x == sweep_x {
        upper.y
    } else if lower.x == sweep_x {
        focus = upper;
        lower.y
    } else {
        // Subtract the two parabolas (written as quadratics in y) and take the
        // root that belongs to this ordering of the arcs.
        let z0 = 2.0 * (lower.x - sweep_x);
        let z1 = 2.0 * (upper.x - sweep_x);

        let a = 1.0 / z0 - 1.0 / z1;
        let b = -2.0 * (lower.y / z0 - upper.y / z1);
        let c = (lower.y * lower.y + lower.x * lower.x - sweep_x * sweep_x) / z0
            - (upper.y * upper.y + upper.x * upper.x - sweep_x * sweep_x) / z1;

        let disc = (b * b - 4.0 * a * c).max(0.0);
        (-b - disc.sqrt()) / (2.0 * a)
    };

    if focus.x == sweep_x {
        // Both foci are on the sweep-line, stacked vertically. The boundary
        // between them is still a horizontal ray that ends at the sweep-line.
        return Point { x: sweep_x, y };
    }
    parabola_at_y(focus, y, sweep_x)
}

/// An axis-aligned rectangle, the region that emitted edges get clipped to.
///
/// Points on the border count as inside.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    rect: kurbo::Rect,
}

impl Bounds {
    /// A rectangle with top-left corner (smallest coordinates) at `origin`.
    pub fn new(origin: impl Into<Point>, width: f64, height: f64) -> Self {
        let origin = origin.into();
        Bounds {
            rect: kurbo::Rect::from_origin_size(origin.to_kurbo(), (width, height)).abs(),
        }
    }

    /// The rectangle spanned by two opposite corners.
    pub fn from_corners(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Bounds {
            rect: kurbo::Rect::from_points(p0.into().to_kurbo(), p1.into().to_kurbo()),
        }
    }

    /// The smallest rectangle containing every one of `points`, if there are any.
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?.to_kurbo();
        let rect = points.fold(kurbo::Rect::from_points(first, first), |r, p| {
            r.union_pt(p.to_kurbo())
        });
        Some(Bounds { rect })
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            rect: self.rect.union(other.rect),
        }
    }

    /// Grows the rectangle by `dx` on the left and right, and `dy` on the top and bottom.
    pub fn inflate(&self, dx: f64, dy: f64) -> Bounds {
        Bounds {
            rect: self.rect.inflate(dx, dy),
        }
    }

    /// The smallest `x` coordinate.
    pub fn min_x(&self) -> f64 {
        self.rect.x0
    }

    /// The largest `x` coordinate.
    pub fn max_x(&self) -> f64 {
        self.rect.x1
    }

    /// The smallest `y` coordinate.
    pub fn min_y(&self) -> f64 {
        self.rect.y0
    }

    /// The largest `y` coordinate.
    pub fn max_y(&self) -> f64 {
        self.rect.y1
    }

    /// The horizontal extent.
    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    /// The vertical extent.
    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    /// Are all the corners finite?
    pub fn is_finite(&self) -> bool {
        self.rect.is_finite()
    }

    /// Is any corner NaN?
    pub fn is_nan(&self) -> bool {
        self.rect.is_nan()
    }

    /// Is `p` inside or on the border, up to `precision`?
    pub fn contains(&self, p: &Point, precision: &Precision) -> bool {
        precision.le(self.rect.x0, p.x)
            && precision.le(p.x, self.rect.x1)
            && precision.le(self.rect.y0, p.y)
            && precision.le(p.y, self.rect.y1)
    }

    /// The four sides, counter-clockwise starting from the bottom-left corner.
    pub fn sides(&self) -> [kurbo::Line; 4] {
        let kurbo::Rect { x0, y0, x1, y1 } = self.rect;
        [
            kurbo::Line::new((x0, y0), (x1, y0)),
            kurbo::Line::new((x1, y0), (x1, y1)),
            kurbo::Line::new((x1, y1), (x0, y1)),
            kurbo::Line::new((x0, y1), (x0, y0)),
        ]
    }

    /// Converts to a `kurbo` rectangle.
    pub fn to_kurbo(self) -> kurbo::Rect {
        self.rect
    }
}

impl From<kurbo::Rect> for Bounds {
    fn from(rect: kurbo::Rect) -> Self {
        Bounds { rect: rect.abs() }
    }
}
