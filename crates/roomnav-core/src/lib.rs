//! **roomnav-core**: primitives for navigating bounded room grids.
//!
//! This crate holds the leaf types shared by the search and connectivity
//! code in `roomnav-paths`: geometry, the flat coordinate codec, room
//! layouts, cell snapshots with their movement rules, and the [`Room`]
//! trait through which the host exposes live cell contents.

pub mod cell;
pub mod flat;
pub mod geom;
pub mod room;
pub mod scale;
pub mod shape;

pub use cell::{CellKind, CellState, MovementProfile};
pub use flat::FlatKey;
pub use geom::{Point, Range};
pub use room::{GridRoom, LayoutError, Room};
pub use scale::{GridScale, WorldPos};
pub use shape::{RoomShape, ShapeCells};
