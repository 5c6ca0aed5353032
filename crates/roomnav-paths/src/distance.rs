use roomnav_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn euclidean_squared(a: Point, b: Point) -> i32 {
    let d = a - b;
    d.x * d.x + d.y * d.y
}

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    f64::from(euclidean_squared(a, b)).sqrt()
}

/// Interchangeable step-cost / remaining-cost estimate.
///
/// Only [`Manhattan`](Heuristic::Manhattan) is admissible for unit-cost
/// 4-connected movement; the others are offered for callers that accept
/// non-optimal routes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    #[default]
    Manhattan,
    Chebyshev,
    EuclideanSquared,
    Euclidean,
}

impl Heuristic {
    /// Evaluate the heuristic between `a` and `b`.
    #[inline]
    pub fn eval(self, a: Point, b: Point) -> f64 {
        match self {
            Self::Manhattan => f64::from(manhattan(a, b)),
            Self::Chebyshev => f64::from(chebyshev(a, b)),
            Self::EuclideanSquared => f64::from(euclidean_squared(a, b)),
            Self::Euclidean => euclidean(a, b),
        }
    }
}
