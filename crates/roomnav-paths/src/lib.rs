//! Connectivity tracking and weighted A* for room grids.
//!
//! This crate answers two questions about a room exposed through
//! [`roomnav_core::Room`]:
//!
//! - **Can a mover get there at all?** [`ConnectivityMap`] labels the
//!   4-connected passable regions of the room for every
//!   [`MovementProfile`](roomnav_core::MovementProfile), rebuilt once per room
//!   and patched once per tick with [`ConnectivityMap::incremental_update`].
//! - **Which way?** [`Pathfinder`] runs a weighted A* search, after first
//!   rejecting requests whose endpoints carry different region labels.
//!
//! ```
//! use roomnav_core::{GridRoom, MovementProfile, Point, RoomShape};
//! use roomnav_paths::{ConnectivityMap, Pathfinder};
//!
//! let mut map = ConnectivityMap::new(GridRoom::new(RoomShape::OneByOne));
//! let mut mover = Pathfinder::new();
//! assert!(mover.pathfind(&map, Point::new(0, 0), Point::new(3, 2), MovementProfile::Ground));
//! assert_eq!(mover.poll_path(), Some(Point::new(0, 0)));
//!
//! // Once per tick, after the host changed the room:
//! map.incremental_update();
//! ```
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | step cost |
//! | [`AstarPather`] : [`WeightedPather`] | remaining-cost estimate, for [`astar_path`] |

mod astar;
mod config;
mod connectivity;
mod distance;
mod error;
mod fastmap;
mod heap;
mod neighbors;
mod pathfinder;
mod traits;

pub use astar::{SearchStats, astar_path};
pub use config::PathfinderConfig;
pub use connectivity::{ConnectivityMap, IMPASSABLE, RegionLabel, RoomGeneration};
pub use distance::{Heuristic, chebyshev, euclidean, euclidean_squared, manhattan};
pub use error::{ConfigError, PathError};
pub use fastmap::{FastMap, FastSet};
pub use heap::MinPriorityQueue;
pub use neighbors::Neighbors;
pub use pathfinder::Pathfinder;
pub use traits::{AstarPather, Pather, WeightedPather};
