//! Conversion between host world positions and grid coordinates.

use crate::geom::Point;

/// A position in host world units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Linear world↔grid mapping: `grid = round(world / tile_size - offset)`
/// and `world = (grid + offset) * tile_size`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridScale {
    /// World units per grid cell. Must be positive.
    pub tile_size: f32,
    /// Grid-space offset of the world origin.
    pub offset: Point,
}

impl Default for GridScale {
    fn default() -> Self {
        Self {
            tile_size: 40.0,
            offset: Point::new(2, 4),
        }
    }
}

impl GridScale {
    /// Grid cell containing `pos`.
    pub fn to_grid(&self, pos: WorldPos) -> Point {
        Point::new(
            (pos.x / self.tile_size - self.offset.x as f32).round() as i32,
            (pos.y / self.tile_size - self.offset.y as f32).round() as i32,
        )
    }

    /// World position of the centre of cell `p`.
    pub fn to_world(&self, p: Point) -> WorldPos {
        WorldPos::new(
            (p.x + self.offset.x) as f32 * self.tile_size,
            (p.y + self.offset.y) as f32 * self.tile_size,
        )
    }
}
