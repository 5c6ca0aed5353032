//! Room layouts and their in-bounds predicates.
//!
//! Every layout lives inside a 26×14 (or smaller) box anchored at the
//! origin. Narrow layouts keep only a band of rows or columns; L layouts
//! drop one 13×7 quadrant.

use std::fmt;

use crate::geom::{Point, Range};

/// Width of a single-screen room.
const W1: i32 = 13;
/// Height of a single-screen room.
const H1: i32 = 7;

/// Layout of the room a [`crate::Room`] describes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomShape {
    /// 13×7.
    #[default]
    OneByOne,
    /// Horizontal corridor: 13 wide, row 3 only.
    IH,
    /// Vertical corridor: columns 4..9, 7 tall.
    IV,
    /// 13×14.
    OneByTwo,
    /// Long vertical corridor: columns 4..9, 14 tall.
    IIV,
    /// 26×7.
    TwoByOne,
    /// Long horizontal corridor: 26 wide, row 3 only.
    IIH,
    /// 26×14.
    TwoByTwo,
    /// 26×14 without the top-left quadrant.
    LTL,
    /// 26×14 without the top-right quadrant.
    LTR,
    /// 26×14 without the bottom-left quadrant.
    LBL,
    /// 26×14 without the bottom-right quadrant.
    LBR,
}

impl RoomShape {
    /// Every layout, in declaration order.
    pub const ALL: [RoomShape; 12] = [
        Self::OneByOne,
        Self::IH,
        Self::IV,
        Self::OneByTwo,
        Self::IIV,
        Self::TwoByOne,
        Self::IIH,
        Self::TwoByTwo,
        Self::LTL,
        Self::LTR,
        Self::LBL,
        Self::LBR,
    ];

    /// Bounding box of the valid cells.
    pub const fn bounds(self) -> Range {
        match self {
            Self::OneByOne => Range::new_const(0, 0, W1, H1),
            Self::IH => Range::new_const(0, 3, W1, 4),
            Self::IV => Range::new_const(4, 0, 9, H1),
            Self::OneByTwo => Range::new_const(0, 0, W1, 2 * H1),
            Self::IIV => Range::new_const(4, 0, 9, 2 * H1),
            Self::TwoByOne => Range::new_const(0, 0, 2 * W1, H1),
            Self::IIH => Range::new_const(0, 3, 2 * W1, 4),
            Self::TwoByTwo | Self::LTL | Self::LTR | Self::LBL | Self::LBR => {
                Range::new_const(0, 0, 2 * W1, 2 * H1)
            }
        }
    }

    /// The quadrant an L layout removes from its bounding box.
    const fn excluded(self) -> Option<Range> {
        match self {
            Self::LTL => Some(Range::new_const(0, 0, W1, H1)),
            Self::LTR => Some(Range::new_const(W1, 0, 2 * W1, H1)),
            Self::LBL => Some(Range::new_const(0, H1, W1, 2 * H1)),
            Self::LBR => Some(Range::new_const(W1, H1, 2 * W1, 2 * H1)),
            _ => None,
        }
    }

    /// Whether `p` is a valid cell of this layout.
    pub fn contains(self, p: Point) -> bool {
        if !self.bounds().contains(p) {
            return false;
        }
        match self.excluded() {
            Some(hole) => !hole.contains(p),
            None => true,
        }
    }

    /// Columns `[x0, x1)` that are valid on row `y`, or `None` if the row is
    /// outside the layout.
    pub fn row_span(self, y: i32) -> Option<(i32, i32)> {
        let b = self.bounds();
        if y < b.min.y || y >= b.max.y {
            return None;
        }
        let span = match self.excluded() {
            Some(hole) if y >= hole.min.y && y < hole.max.y => {
                if hole.min.x == b.min.x {
                    (hole.max.x, b.max.x)
                } else {
                    (b.min.x, hole.min.x)
                }
            }
            _ => (b.min.x, b.max.x),
        };
        Some(span)
    }

    /// Raster iterator over every valid cell, row by row.
    pub fn cells(self) -> ShapeCells {
        let b = self.bounds();
        let (x0, x1) = self.row_span(b.min.y).unwrap_or((0, 0));
        ShapeCells {
            shape: self,
            cur: Point::new(x0, b.min.y),
            row_end: x1,
        }
    }

    /// Number of valid cells.
    pub fn cell_count(self) -> usize {
        let hole = self.excluded().map_or(0, Range::len);
        self.bounds().len() - hole
    }
}

impl fmt::Display for RoomShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Raster iterator over the cells of a [`RoomShape`].
///
/// On each row wrap the cursor jumps to the first valid column of the next
/// row, which is how L layouts skip their missing quadrant.
#[derive(Clone, Debug)]
pub struct ShapeCells {
    shape: RoomShape,
    cur: Point,
    row_end: i32,
}

impl Iterator for ShapeCells {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.cur.x >= self.row_end {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.row_end {
            let y = self.cur.y + 1;
            match self.shape.row_span(y) {
                Some((x0, x1)) => {
                    self.cur = Point::new(x0, y);
                    self.row_end = x1;
                }
                None => self.row_end = i32::MIN,
            }
        }
        Some(p)
    }
}
