//! Error types for path queries and configuration.

use roomnav_core::{MovementProfile, Point};
use thiserror::Error;

/// Why a pathfind request produced no route.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// An endpoint lies outside the room.
    #[error("{0} is outside the room")]
    OutOfBounds(Point),

    /// The connectivity labels put the endpoints in different regions (or
    /// one of them on an impassable cell). No search was run.
    #[error("no {profile} route from {start} to {goal}: different regions")]
    Unreachable {
        start: Point,
        goal: Point,
        profile: MovementProfile,
    },

    /// The labels said a route exists but the search found none.
    #[error("{profile} search from {start} to {goal} exhausted its open set")]
    SearchExhausted {
        start: Point,
        goal: Point,
        profile: MovementProfile,
    },
}

/// Rejected [`PathfinderConfig`](crate::PathfinderConfig) values.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("heuristic inflation must be finite and at least 1, got {0}")]
    InvalidEpsilon(f64),

    #[error("tile size must be finite and positive, got {0}")]
    InvalidTileSize(f32),
}
