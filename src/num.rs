//! Float ordering and the fixed rounding precision used for comparisons.

use std::hash::Hash;

/// A wrapper for `f64` that implements `Ord`.
///
/// Unlike the more principled wrappers in the `ordered_float` crate, this
/// one just treats incomparable values as equal -- it doesn't order NaNs,
/// nor does it guard against them on construction. We reject non-finite
/// input before the sweep starts, so every key that reaches a queue is
/// comparable.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CheapOrderedFloat(f64);

impl Hash for CheapOrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state)
    }
}

impl CheapOrderedFloat {
    /// Retrieve the inner `f64`.
    pub fn into_inner(self) -> f64 {
        self.0
    }
}

// Now comes the fishy stuff.
impl Eq for CheapOrderedFloat {}

impl PartialOrd for CheapOrderedFloat {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CheapOrderedFloat {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 < other.0 {
            std::cmp::Ordering::Less
        } else if self.0 > other.0 {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    }
}

impl From<f64> for CheapOrderedFloat {
    fn from(value: f64) -> Self {
        CheapOrderedFloat(value)
    }
}

/// A fixed number of decimal places.
///
/// Every ordering or equality test on a coordinate goes through
/// [`Precision::round`] first, so that two computations of the same
/// quantity along different paths (say, the circumcenter of the same
/// circle found from two different triples of sites) compare equal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Precision {
    decimals: u32,
    scale: f64,
}

impl Default for Precision {
    fn default() -> Self {
        Precision::new(6)
    }
}

impl Precision {
    /// The most decimal places we'll honor; beyond this, `f64` has no digits left.
    pub const MAX_DECIMALS: u32 = 15;

    /// Round to `decimals` places (clamped to [`Precision::MAX_DECIMALS`]).
    pub fn new(decimals: u32) -> Self {
        let decimals = decimals.min(Self::MAX_DECIMALS);
        Precision {
            decimals,
            scale: 10f64.powi(decimals as i32),
        }
    }

    /// The number of decimal places we round to.
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Rounds `x` to our number of decimal places.
    ///
    /// Negative zero comes out as positive zero, so rounded values can be
    /// compared by their bits. Values too large to scale are returned as-is.
    pub fn round(&self, x: f64) -> f64 {
        let scaled = x * self.scale;
        if !scaled.is_finite() {
            return x;
        }
        scaled.round() / self.scale + 0.0
    }

    /// The rounded value of `x`, as a totally ordered key.
    pub fn key(&self, x: f64) -> CheapOrderedFloat {
        CheapOrderedFloat(self.round(x))
    }

    /// Do `a` and `b` agree up to our precision?
    pub fn eq(&self, a: f64, b: f64) -> bool {
        self.key(a) == self.key(b)
    }

    /// Is `a` at most `b`, up to our precision?
    pub fn le(&self, a: f64, b: f64) -> bool {
        self.key(a) <= self.key(b)
    }

    /// Is `a` strictly less than `b`, even after rounding?
    pub fn lt(&self, a: f64, b: f64) -> bool {
        self.key(a) < self.key(b)
    }
}
