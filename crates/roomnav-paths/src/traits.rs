use roomnav_core::{FlatKey, Point};

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append the neighbors of `key` that a search toward `goal` may enter
    /// into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, key: FlatKey, goal: FlatKey, buf: &mut Vec<FlatKey>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> f64;
}

/// Full A* pather.
pub trait AstarPather: WeightedPather {
    /// Estimate of the remaining cost from `from` to `to`, before any
    /// inflation factor is applied.
    fn estimate(&self, from: Point, to: Point) -> f64;
}
