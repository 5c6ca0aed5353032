//! The [`Room`] host interface and the in-memory [`GridRoom`].
//!
//! A `Room` is whatever the host uses to answer "what occupies this cell
//! right now?". `GridRoom` stores the answers in a dense buffer and is what
//! headless hosts and tests use.

use std::fmt;

use crate::cell::{CellKind, CellState, state};
use crate::geom::{Point, Range};
use crate::shape::RoomShape;

/// Live view of the cells of the current room.
pub trait Room {
    /// Layout of the room.
    fn shape(&self) -> RoomShape;

    /// Current contents of the cell at `p`. Cells outside the layout read as
    /// [`CellState::EMPTY`]; callers bound-check with the shape first.
    fn cell_at(&self, p: Point) -> CellState;
}

impl<R: Room + ?Sized> Room for &R {
    fn shape(&self) -> RoomShape {
        (**self).shape()
    }

    fn cell_at(&self, p: Point) -> CellState {
        (**self).cell_at(p)
    }
}

/// A dense in-memory room.
///
/// Deserialization rebuilds the bounds from the shape and rejects a cell
/// buffer of the wrong length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StoredRoom"))]
pub struct GridRoom {
    shape: RoomShape,
    bounds: Range,
    cells: Vec<CellState>,
}

impl GridRoom {
    /// Create an empty room of the given layout.
    pub fn new(shape: RoomShape) -> Self {
        let bounds = shape.bounds();
        Self {
            shape,
            bounds,
            cells: vec![CellState::EMPTY; bounds.len()],
        }
    }

    /// Parse a room from one string per row of the layout's bounding box.
    ///
    /// | char | cell |
    /// |---|---|
    /// | `.` or ` ` | empty |
    /// | `#` | wall |
    /// | `r` / `R` | rock, intact / broken |
    /// | `o` / `=` | pit, open / bridged |
    /// | `p` / `_` | poop, intact / destroyed |
    /// | `t` / `x` | TNT, intact / exploded |
    /// | `^` | spikes |
    /// | `w` | spider web |
    /// | `b` | block |
    ///
    /// Characters on cells outside the layout are ignored.
    pub fn parse(shape: RoomShape, rows: &[&str]) -> Result<Self, LayoutError> {
        let mut room = Self::new(shape);
        let b = room.bounds;
        if rows.len() != b.height() as usize {
            return Err(LayoutError::RowCount {
                expected: b.height() as usize,
                got: rows.len(),
            });
        }
        for (dy, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width != b.width() as usize {
                return Err(LayoutError::RowWidth {
                    row: dy,
                    expected: b.width() as usize,
                    got: width,
                });
            }
            for (dx, ch) in row.chars().enumerate() {
                let p = Point::new(b.min.x + dx as i32, b.min.y + dy as i32);
                let cell = match ch {
                    '.' | ' ' => CellState::EMPTY,
                    '#' => CellState::new(CellKind::Wall, 0),
                    'r' => CellState::new(CellKind::Rock, state::ROCK_UNBROKEN),
                    'R' => CellState::new(CellKind::Rock, 2),
                    'o' => CellState::new(CellKind::Pit, state::PIT_OPEN),
                    '=' => CellState::new(CellKind::Pit, state::PIT_BRIDGED),
                    'p' => CellState::new(CellKind::Poop, 0),
                    '_' => CellState::new(CellKind::Poop, state::POOP_DESTROYED),
                    't' => CellState::new(CellKind::Tnt, 0),
                    'x' => CellState::new(CellKind::Tnt, state::TNT_EXPLODED),
                    '^' => CellState::new(CellKind::Spikes, 0),
                    'w' => CellState::new(CellKind::SpiderWeb, 0),
                    'b' => CellState::new(CellKind::Block, 0),
                    _ => return Err(LayoutError::InvalidChar { ch, pos: p }),
                };
                room.set(p, cell);
            }
        }
        Ok(room)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.shape.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.bounds.width() as usize + x)
    }

    /// Read the cell at `p`, or [`CellState::EMPTY`] outside the layout.
    pub fn get(&self, p: Point) -> CellState {
        self.index(p)
            .and_then(|i| self.cells.get(i))
            .copied()
            .unwrap_or_default()
    }

    /// Set the cell at `p`. No-op outside the layout.
    pub fn set(&mut self, p: Point, cell: CellState) {
        if let Some(slot) = self.index(p).and_then(|i| self.cells.get_mut(i)) {
            *slot = cell;
        }
    }

    /// Empty the cell at `p`.
    pub fn clear(&mut self, p: Point) {
        self.set(p, CellState::EMPTY);
    }

    /// Set every cell of the layout to `cell`.
    pub fn fill(&mut self, cell: CellState) {
        for p in self.shape.cells() {
            self.set(p, cell);
        }
    }
}

/// Serialized form of a [`GridRoom`]. Any stored `bounds` field is ignored.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StoredRoom {
    shape: RoomShape,
    cells: Vec<CellState>,
}

#[cfg(feature = "serde")]
impl TryFrom<StoredRoom> for GridRoom {
    type Error = LayoutError;

    fn try_from(stored: StoredRoom) -> Result<Self, LayoutError> {
        let bounds = stored.shape.bounds();
        if stored.cells.len() != bounds.len() {
            return Err(LayoutError::CellCount {
                expected: bounds.len(),
                got: stored.cells.len(),
            });
        }
        Ok(Self {
            shape: stored.shape,
            bounds,
            cells: stored.cells,
        })
    }
}

impl Room for GridRoom {
    fn shape(&self) -> RoomShape {
        self.shape
    }

    fn cell_at(&self, p: Point) -> CellState {
        self.get(p)
    }
}

/// Errors from [`GridRoom::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Number of rows differs from the layout height.
    RowCount { expected: usize, got: usize },
    /// A row's length differs from the layout width.
    RowWidth {
        row: usize,
        expected: usize,
        got: usize,
    },
    /// A character outside the legend.
    InvalidChar { ch: char, pos: Point },
    /// A stored cell buffer does not cover the layout's bounding box.
    CellCount { expected: usize, got: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowCount { expected, got } => {
                write!(f, "room layout: expected {expected} rows, got {got}")
            }
            Self::RowWidth { row, expected, got } => {
                write!(f, "room layout: row {row} is {got} wide, expected {expected}")
            }
            Self::InvalidChar { ch, pos } => {
                write!(f, "room layout: invalid char \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::CellCount { expected, got } => {
                write!(f, "room layout: expected {expected} cells, got {got}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
