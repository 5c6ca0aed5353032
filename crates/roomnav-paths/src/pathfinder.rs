//! The per-mover pathfinding engine.

use log::{debug, warn};
use roomnav_core::{FlatKey, MovementProfile, Point, Room, WorldPos};

use crate::astar::{SearchStats, astar_path};
use crate::config::PathfinderConfig;
use crate::connectivity::{ConnectivityMap, RoomGeneration};
use crate::distance::Heuristic;
use crate::error::{ConfigError, PathError};
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Finds and stores a route for one mover.
///
/// A `Pathfinder` holds no reference to the room: every query takes the
/// [`ConnectivityMap`] explicitly. The stored route is tagged with the map's
/// [`RoomGeneration`], and a query against a different map generation
/// discards it before searching.
///
/// The route is kept goal first; [`peek_path`](Self::peek_path) and
/// [`poll_path`](Self::poll_path) work from the start end.
#[derive(Debug, Clone, Default)]
pub struct Pathfinder {
    config: PathfinderConfig,
    path: Vec<Point>,
    generation: Option<RoomGeneration>,
    stats: SearchStats,
}

impl Pathfinder {
    /// An engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with `config`, after validating it.
    pub fn with_config(config: PathfinderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    /// Search for a route from `start` to `goal` for a mover with `profile`
    /// and store it on success, returning the number of moves.
    ///
    /// On failure the previously stored route is kept, unless it belonged
    /// to another map generation.
    pub fn try_pathfind<R: Room>(
        &mut self,
        map: &ConnectivityMap<R>,
        start: Point,
        goal: Point,
        profile: MovementProfile,
    ) -> Result<usize, PathError> {
        self.stats = SearchStats::default();
        if !self.is_path_current(map) {
            self.clear_path();
        }

        for p in [start, goal] {
            if !map.shape().contains(p) {
                debug!("pathfind {start} -> {goal}: {p} outside {}", map.shape());
                return Err(PathError::OutOfBounds(p));
            }
        }
        if !map.is_path_possible(start, goal, profile) {
            debug!("pathfind {start} -> {goal}: no {profile} region in common");
            return Err(PathError::Unreachable { start, goal, profile });
        }

        let pather = ProfilePather {
            map,
            profile,
            heuristic: self.config.heuristic,
        };
        match astar_path(&pather, start, goal, self.config.epsilon, &mut self.stats) {
            Some(path) => {
                let moves = path.len() - 1;
                self.path = path;
                self.generation = Some(map.generation());
                Ok(moves)
            }
            None => {
                warn!(
                    "pathfind {start} -> {goal}: {profile} labels agree but search failed after {} pops",
                    self.stats.heap_pops
                );
                Err(PathError::SearchExhausted { start, goal, profile })
            }
        }
    }

    /// Like [`try_pathfind`](Self::try_pathfind), reporting only success.
    pub fn pathfind<R: Room>(
        &mut self,
        map: &ConnectivityMap<R>,
        start: Point,
        goal: Point,
        profile: MovementProfile,
    ) -> bool {
        self.try_pathfind(map, start, goal, profile).is_ok()
    }

    /// [`pathfind`](Self::pathfind) between two world positions, converted
    /// with the configured [`GridScale`](roomnav_core::GridScale).
    pub fn pathfind_world<R: Room>(
        &mut self,
        map: &ConnectivityMap<R>,
        start: WorldPos,
        goal: WorldPos,
        profile: MovementProfile,
    ) -> bool {
        let scale = self.config.scale;
        self.pathfind(map, scale.to_grid(start), scale.to_grid(goal), profile)
    }

    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Next waypoint from the mover's side.
    pub fn peek_path(&self) -> Option<Point> {
        self.path.last().copied()
    }

    /// Remove and return the next waypoint.
    pub fn poll_path(&mut self) -> Option<Point> {
        self.path.pop()
    }

    /// The stored route in grid coordinates, goal first.
    pub fn raw_path(&self) -> &[Point] {
        &self.path
    }

    /// The stored route in world coordinates, start first.
    pub fn get_path(&self) -> Vec<WorldPos> {
        let scale = self.config.scale;
        self.path.iter().rev().map(|&p| scale.to_world(p)).collect()
    }

    /// Generation of the map the stored route was computed on.
    pub fn path_generation(&self) -> Option<RoomGeneration> {
        self.generation
    }

    /// Whether the stored route was computed on `map`'s current generation.
    pub fn is_path_current<R>(&self, map: &ConnectivityMap<R>) -> bool
    where
        R: Room,
    {
        self.generation == Some(map.generation())
    }

    /// Heap counters of the most recent query.
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
        self.generation = None;
    }
}

/// Adapts a connectivity map and profile to the pather traits.
struct ProfilePather<'a, R> {
    map: &'a ConnectivityMap<R>,
    profile: MovementProfile,
    heuristic: Heuristic,
}

impl<R: Room> Pather for ProfilePather<'_, R> {
    fn neighbors(&self, key: FlatKey, goal: FlatKey, buf: &mut Vec<FlatKey>) {
        for n in key.neighbors_4() {
            // The goal itself may be entered even if it is blocked.
            if n == goal || self.map.is_passable(n.decode(), self.profile) {
                buf.push(n);
            }
        }
    }
}

impl<R: Room> WeightedPather for ProfilePather<'_, R> {
    fn cost(&self, from: Point, to: Point) -> f64 {
        self.heuristic.eval(from, to)
    }
}

impl<R: Room> AstarPather for ProfilePather<'_, R> {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        self.heuristic.eval(from, to)
    }
}
