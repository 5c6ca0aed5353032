//! [`FlatKey`]: a single-integer encoding of a bounded grid coordinate.
//!
//! Coordinates in `[MIN, MAX] × [MIN, MAX]` map bijectively onto keys in
//! `0..DOMAIN_LEN`. The row stride equals the domain width, so moving a
//! coordinate by `(dx, dy)` is plain key arithmetic: see [`FlatKey::shift`].

use crate::geom::Point;

/// Flattened grid coordinate used as the hash key on every hot path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatKey(i32);

impl FlatKey {
    /// Smallest coordinate value (either axis) inside the domain.
    pub const MIN: i32 = -2;
    /// Largest coordinate value (either axis) inside the domain.
    pub const MAX: i32 = 29;
    /// Row stride: the width of the domain.
    pub const STRIDE: i32 = Self::MAX - Self::MIN + 1;
    /// Number of distinct keys in the domain.
    pub const DOMAIN_LEN: usize = (Self::STRIDE * Self::STRIDE) as usize;

    /// Whether `p` can be encoded without aliasing.
    #[inline]
    pub const fn in_domain(p: Point) -> bool {
        p.x >= Self::MIN && p.x <= Self::MAX && p.y >= Self::MIN && p.y <= Self::MAX
    }

    /// Encode a coordinate. Only meaningful when [`in_domain`](Self::in_domain)
    /// holds for `p`.
    #[inline]
    pub const fn encode(p: Point) -> Self {
        Self((p.x - Self::MIN) + (p.y - Self::MIN) * Self::STRIDE)
    }

    /// Decode back to a coordinate.
    #[inline]
    pub const fn decode(self) -> Point {
        let row = self.0.div_euclid(Self::STRIDE);
        let col = self.0.rem_euclid(Self::STRIDE);
        Point::new(col + Self::MIN, row + Self::MIN)
    }

    /// Translate by `(dx, dy)` without decoding.
    ///
    /// Equals `encode(decode(self) + (dx, dy))` whenever the destination is
    /// in the domain. Walking off the domain wraps into a neighbouring row
    /// (or outside `0..DOMAIN_LEN`), so callers must re-check bounds on the
    /// decoded result before trusting it.
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self(self.0 + dx + dy * Self::STRIDE)
    }

    /// The four cardinal neighbour keys, in the order left, right, up, down.
    #[inline]
    pub const fn neighbors_4(self) -> [FlatKey; 4] {
        [
            self.shift(-1, 0),
            self.shift(1, 0),
            self.shift(0, -1),
            self.shift(0, 1),
        ]
    }

    /// Dense slot for domain-sized tables, or `None` if the key lies outside
    /// `0..DOMAIN_LEN`.
    #[inline]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0)
            .ok()
            .filter(|&i| i < Self::DOMAIN_LEN)
    }
}
