//! Per-profile connected-component labelling of a room, kept up to date
//! incrementally.
//!
//! For every [`MovementProfile`] each valid cell of the room carries a
//! [`RegionLabel`]: [`IMPASSABLE`] for cells the profile cannot enter, and
//! otherwise a positive label shared by the cells of one 4-connected
//! passable region. A reachability query is then a label comparison.
//!
//! The map is built in full once per room ([`ConnectivityMap::new`]) and
//! then patched once per tick by [`ConnectivityMap::incremental_update`],
//! which only touches cells whose contents changed and only repairs the
//! profiles whose passability verdict actually flipped.
//!
//! # Merge gap
//!
//! When a cell becomes passable it joins the region of its *first* labelled
//! neighbor (left, right, up, down) and nothing else is relabelled. If the
//! new cell bridges two or more regions, they keep distinct labels until a
//! later split repair or a full rebuild touches them. Reachability answers
//! can therefore be false negatives for bridged regions, never false
//! positives.

use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};
use roomnav_core::{CellState, FlatKey, MovementProfile, Point, Room, RoomShape};

use crate::fastmap::FastSet;
use crate::neighbors::Neighbors;

/// Label of a connected passable region. Positive for regions.
pub type RegionLabel = i32;

/// Label of cells the profile cannot enter. Never equal to itself for the
/// purpose of [`ConnectivityMap::is_path_possible`].
pub const IMPASSABLE: RegionLabel = -1;

/// Slot value for keys that are not (yet) labelled.
const UNLABELED: RegionLabel = 0;

/// Opaque token naming one build of a [`ConnectivityMap`].
///
/// Every construction or full rebuild draws a fresh, process-unique token,
/// so a route tagged with one can be recognised as belonging to an older
/// room.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RoomGeneration(u64);

impl RoomGeneration {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Where a flood fill reads cell contents from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Source {
    /// The snapshot taken by the last rebuild / update.
    Cached,
    /// The room, right now.
    Live,
}

/// Which neighbors a flood fill may enter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Spread {
    /// Any cell not already carrying the fill label.
    Relabel,
    /// Only cells that are impassable or unlabelled; existing regions are
    /// left alone.
    Unclaimed,
}

/// Connected-region labels of one room, for every movement profile.
///
/// The map owns the room handle it was built from, so live passability is
/// always read from the same room its labels describe.
pub struct ConnectivityMap<R> {
    room: R,
    shape: RoomShape,
    generation: RoomGeneration,
    /// Valid cells in raster order.
    order: Vec<FlatKey>,
    /// Last seen contents, indexed by `FlatKey::index`.
    cache: Vec<CellState>,
    /// Labels per profile, indexed by `FlatKey::index`.
    labels: [Vec<RegionLabel>; MovementProfile::COUNT],
    next_label: [RegionLabel; MovementProfile::COUNT],
    // flood-fill scratch
    stack: Vec<FlatKey>,
    queued: FastSet<FlatKey>,
    nbuf: Neighbors,
}

impl<R: Room> ConnectivityMap<R> {
    /// Snapshot `room` and label it for every profile.
    pub fn new(room: R) -> Self {
        let shape = room.shape();
        let mut map = Self {
            room,
            shape,
            generation: RoomGeneration::next(),
            order: Vec::new(),
            cache: vec![CellState::EMPTY; FlatKey::DOMAIN_LEN],
            labels: std::array::from_fn(|_| vec![UNLABELED; FlatKey::DOMAIN_LEN]),
            next_label: [1; MovementProfile::COUNT],
            stack: Vec::new(),
            queued: FastSet::new(),
            nbuf: Neighbors::new(),
        };
        map.rebuild();
        map
    }

    /// Discard every label and rebuild from the room's current contents.
    ///
    /// Draws a new [`RoomGeneration`].
    pub fn rebuild(&mut self) {
        self.shape = self.room.shape();
        self.generation = RoomGeneration::next();
        self.order.clear();
        self.order.extend(self.shape.cells().map(FlatKey::encode));

        self.cache.fill(CellState::EMPTY);
        for &key in &self.order {
            if let Some(i) = key.index() {
                self.cache[i] = self.room.cell_at(key.decode());
            }
        }

        for labels in self.labels.iter_mut() {
            labels.fill(UNLABELED);
        }
        self.next_label = [1; MovementProfile::COUNT];

        for profile in MovementProfile::ALL {
            let pi = profile.index();
            for n in 0..self.order.len() {
                let key = self.order[n];
                let Some(i) = key.index() else {
                    continue;
                };
                if self.labels[pi][i] != UNLABELED {
                    continue;
                }
                if !profile.allows(&self.cache[i]) {
                    self.labels[pi][i] = IMPASSABLE;
                    continue;
                }
                let label = self.alloc_label(profile);
                self.flood_fill(profile, key, label, Spread::Relabel, Source::Cached);
            }
        }

        debug!(
            "connectivity rebuilt: shape={} cells={} regions={:?}",
            self.shape,
            self.order.len(),
            MovementProfile::ALL.map(|p| self.region_count(p)),
        );
    }

    /// Re-read every cell and repair the labels where a profile's verdict
    /// flipped. Returns the number of cells whose contents changed.
    pub fn incremental_update(&mut self) -> usize {
        let mut changed = 0;
        for n in 0..self.order.len() {
            let key = self.order[n];
            let Some(i) = key.index() else {
                continue;
            };
            let p = key.decode();
            let cached = self.cache[i];
            let live = self.room.cell_at(p);
            if live == cached {
                continue;
            }
            changed += 1;

            for profile in MovementProfile::ALL {
                let now = profile.allows(&live);
                if profile.allows(&cached) == now {
                    continue;
                }
                trace!("{p} {cached} -> {live}: {profile} passable={now}");
                if now {
                    self.add_passable_tile(p, profile);
                } else {
                    // A fill for an earlier change this tick may already have
                    // marked `p` impassable; the split check still has to run.
                    self.cut(p, profile);
                }
            }
            self.cache[i] = live;
        }
        changed
    }

    /// Record that `p` became passable for `profile`.
    ///
    /// Expects the room to already show the new contents. No-op unless `p`
    /// is currently labelled [`IMPASSABLE`]. The cell takes the label of its
    /// first labelled neighbor; see the module docs for the merge gap this
    /// leaves.
    pub fn add_passable_tile(&mut self, p: Point, profile: MovementProfile) {
        let pi = profile.index();
        let key = FlatKey::encode(p);
        let Some(i) = self.slot(p) else {
            return;
        };
        if self.labels[pi][i] != IMPASSABLE {
            return;
        }

        let shape = self.shape;
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let joined = nbuf
            .cardinal(key, |k| shape.contains(k.decode()))
            .iter()
            .filter_map(|k| k.index())
            .map(|ni| self.labels[pi][ni])
            .find(|&l| l != IMPASSABLE && l != UNLABELED);
        self.nbuf = nbuf;

        let label = match joined {
            Some(label) => {
                trace!("{p} joins region {label} for {profile}");
                self.flood_fill(profile, key, label, Spread::Unclaimed, Source::Live);
                label
            }
            None => {
                let label = self.alloc_label(profile);
                trace!("{p} opens isolated region {label} for {profile}");
                label
            }
        };
        self.labels[pi][i] = label;
    }

    /// Record that `p` stopped being passable for `profile`.
    ///
    /// Expects the room to already show the new contents. No-op if `p` is
    /// already [`IMPASSABLE`]. When `p` had more than one labelled neighbor
    /// the region may have split, so each distinct neighboring region is
    /// re-flooded under a fresh label.
    pub fn remove_passable_tile(&mut self, p: Point, profile: MovementProfile) {
        match self.slot(p) {
            Some(i) if self.labels[profile.index()][i] != IMPASSABLE => self.cut(p, profile),
            _ => {}
        }
    }

    /// Mark `p` impassable and re-flood its labelled neighbors if there is
    /// more than one of them.
    fn cut(&mut self, p: Point, profile: MovementProfile) {
        let pi = profile.index();
        let key = FlatKey::encode(p);
        let Some(i) = self.slot(p) else {
            return;
        };

        let shape = self.shape;
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut adjacent = [key; 4];
        let mut count = 0;
        for &n in nbuf.cardinal(key, |k| shape.contains(k.decode())) {
            let Some(ni) = n.index() else {
                continue;
            };
            let l = self.labels[pi][ni];
            if l != IMPASSABLE && l != UNLABELED {
                adjacent[count] = n;
                count += 1;
            }
        }
        self.nbuf = nbuf;

        if count > 1 {
            let mut refilled: FastSet<RegionLabel> = FastSet::new();
            for &n in &adjacent[..count] {
                let Some(ni) = n.index() else {
                    continue;
                };
                if refilled.has(&self.labels[pi][ni]) {
                    continue;
                }
                let fresh = self.alloc_label(profile);
                trace!("{p} removed: re-flooding from {} as {fresh} for {profile}", n.decode());
                self.flood_fill(profile, n, fresh, Spread::Relabel, Source::Live);
                refilled.add(fresh);
            }
        }

        self.labels[pi][i] = IMPASSABLE;
    }

    /// Whether a mover with `profile` can get from `a` to `b` according to
    /// the current labels.
    pub fn is_path_possible(&self, a: Point, b: Point, profile: MovementProfile) -> bool {
        match (self.label_at(a, profile), self.label_at(b, profile)) {
            (Some(la), Some(lb)) => la == lb && la != IMPASSABLE,
            _ => false,
        }
    }

    /// Label of `p` for `profile`, or `None` outside the room.
    pub fn label_at(&self, p: Point, profile: MovementProfile) -> Option<RegionLabel> {
        let i = self.slot(p)?;
        match self.labels[profile.index()][i] {
            UNLABELED => None,
            l => Some(l),
        }
    }

    /// Whether `p` is inside the room and passable for `profile` right now.
    ///
    /// Reads the room, not the label table.
    pub fn is_passable(&self, p: Point, profile: MovementProfile) -> bool {
        self.shape.contains(p) && profile.allows(&self.room.cell_at(p))
    }

    /// Number of distinct region labels currently in use for `profile`.
    pub fn region_count(&self, profile: MovementProfile) -> usize {
        let labels = &self.labels[profile.index()];
        let mut seen = FastSet::new();
        for key in &self.order {
            if let Some(i) = key.index() {
                let l = labels[i];
                if l != IMPASSABLE && l != UNLABELED {
                    seen.add(l);
                }
            }
        }
        seen.len()
    }

    /// Number of valid cells in the room.
    pub fn cell_count(&self) -> usize {
        self.order.len()
    }

    /// The token of the current build.
    pub fn generation(&self) -> RoomGeneration {
        self.generation
    }

    /// Layout of the room as of the last rebuild.
    pub fn shape(&self) -> RoomShape {
        self.shape
    }

    /// The room handle.
    pub fn room(&self) -> &R {
        &self.room
    }

    /// Mutable access to the room, for hosts that change cells between
    /// ticks. Changes become visible to the labels on the next
    /// [`incremental_update`](Self::incremental_update).
    pub fn room_mut(&mut self) -> &mut R {
        &mut self.room
    }

    /// Give back the room handle.
    pub fn into_room(self) -> R {
        self.room
    }

    // -----------------------------------------------------------------------
    // internals
    // -----------------------------------------------------------------------

    #[inline]
    fn slot(&self, p: Point) -> Option<usize> {
        if !self.shape.contains(p) {
            return None;
        }
        FlatKey::encode(p).index()
    }

    fn alloc_label(&mut self, profile: MovementProfile) -> RegionLabel {
        let slot = &mut self.next_label[profile.index()];
        let label = *slot;
        *slot += 1;
        label
    }

    fn passable_in(&self, key: FlatKey, i: usize, profile: MovementProfile, source: Source) -> bool {
        match source {
            Source::Cached => profile.allows(&self.cache[i]),
            Source::Live => profile.allows(&self.room.cell_at(key.decode())),
        }
    }

    /// Iterative flood fill from `start`, writing `fill` into every passable
    /// cell reached and [`IMPASSABLE`] into every blocked cell visited.
    fn flood_fill(
        &mut self,
        profile: MovementProfile,
        start: FlatKey,
        fill: RegionLabel,
        spread: Spread,
        source: Source,
    ) {
        let pi = profile.index();
        let shape = self.shape;
        let mut stack = std::mem::take(&mut self.stack);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        stack.clear();
        self.queued.clear();

        stack.push(start);
        self.queued.add(start);

        while let Some(key) = stack.pop() {
            self.queued.delete(&key);
            let Some(i) = key.index() else {
                continue;
            };
            if !self.passable_in(key, i, profile, source) {
                self.labels[pi][i] = IMPASSABLE;
                continue;
            }
            self.labels[pi][i] = fill;

            for &n in nbuf.cardinal(key, |k| shape.contains(k.decode())) {
                let Some(ni) = n.index() else {
                    continue;
                };
                let l = self.labels[pi][ni];
                let enter = match spread {
                    Spread::Relabel => l != fill,
                    Spread::Unclaimed => l == IMPASSABLE || l == UNLABELED,
                };
                if enter && !self.queued.has(&n) {
                    stack.push(n);
                    self.queued.add(n);
                }
            }
        }

        self.stack = stack;
        self.nbuf = nbuf;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngExt, SeedableRng};
    use roomnav_core::cell::state;
    use roomnav_core::{CellKind, GridRoom};
    use std::collections::{HashSet, VecDeque};

    use MovementProfile::*;

    const ROCK: CellState = CellState::new(CellKind::Rock, state::ROCK_UNBROKEN);
    const PIT: CellState = CellState::new(CellKind::Pit, state::PIT_OPEN);

    fn room(rows: &[&str]) -> GridRoom {
        GridRoom::parse(RoomShape::OneByOne, rows).unwrap()
    }

    /// Cells reachable from `a` by BFS over the room's live contents.
    fn flood(map: &ConnectivityMap<GridRoom>, a: Point, profile: MovementProfile) -> HashSet<Point> {
        let mut seen = HashSet::new();
        if !map.is_passable(a, profile) {
            return seen;
        }
        seen.insert(a);
        let mut queue = VecDeque::from([a]);
        while let Some(p) = queue.pop_front() {
            for n in p.neighbors_4() {
                if map.is_passable(n, profile) && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen
    }

    fn reachable(map: &ConnectivityMap<GridRoom>, a: Point, b: Point, profile: MovementProfile) -> bool {
        flood(map, a, profile).contains(&b)
    }

    /// Labels agree with true connectivity for every pair of cells.
    fn assert_sound(map: &ConnectivityMap<GridRoom>, profile: MovementProfile) {
        let cells: Vec<Point> = map.shape().cells().collect();
        for &a in &cells {
            let la = map.label_at(a, profile).unwrap();
            assert_eq!(la == IMPASSABLE, !map.is_passable(a, profile), "{a} {profile}");
        }
        for &a in &cells {
            let region = flood(map, a, profile);
            for &b in &cells {
                assert_eq!(
                    map.is_path_possible(a, b, profile),
                    region.contains(&b),
                    "{a} -> {b} under {profile}"
                );
            }
        }
    }

    #[test]
    fn empty_room_is_one_region_except_for_pit_movers() {
        let map = ConnectivityMap::new(GridRoom::new(RoomShape::OneByOne));
        assert_eq!(map.cell_count(), 91);
        for profile in [Walls, NoPits, Ground] {
            assert_eq!(map.region_count(profile), 1);
            assert!(map.is_path_possible(Point::new(0, 0), Point::new(12, 6), profile));
        }
        assert_eq!(map.region_count(PitsOnly), 0);
        assert!(!map.is_path_possible(Point::new(0, 0), Point::new(12, 6), PitsOnly));
    }

    #[test]
    fn rock_wall_splits_ground_but_not_flight() {
        let map = ConnectivityMap::new(room(&[
            "......r......",
            "......r......",
            "......r......",
            "......r......",
            "......r......",
            "......r......",
            "......r......",
        ]));
        let (a, b) = (Point::new(0, 3), Point::new(12, 3));
        assert!(!map.is_path_possible(a, b, Ground));
        assert!(!map.is_path_possible(a, b, NoPits));
        assert!(map.is_path_possible(a, b, Walls));
        assert_eq!(map.region_count(Ground), 2);
        assert_eq!(map.label_at(Point::new(6, 0), Ground), Some(IMPASSABLE));
    }

    #[test]
    fn impassable_never_matches_itself() {
        let map = ConnectivityMap::new(room(&[
            "r...........r",
            ".............",
            ".............",
            ".............",
            ".............",
            ".............",
            ".............",
        ]));
        let (a, b) = (Point::new(0, 0), Point::new(12, 0));
        assert_eq!(map.label_at(a, Ground), Some(IMPASSABLE));
        assert_eq!(map.label_at(b, Ground), Some(IMPASSABLE));
        assert!(!map.is_path_possible(a, b, Ground));
        assert!(!map.is_path_possible(a, a, Ground));
    }

    #[test]
    fn outside_the_room_is_unreachable() {
        let map = ConnectivityMap::new(GridRoom::new(RoomShape::LTL));
        let hole = Point::new(3, 3);
        assert_eq!(map.label_at(hole, Walls), None);
        assert!(!map.is_passable(hole, Walls));
        assert!(!map.is_path_possible(hole, hole, Walls));
        assert!(!map.is_path_possible(Point::new(-1, 0), Point::new(20, 10), Walls));
        assert!(map.is_path_possible(Point::new(13, 0), Point::new(0, 13), Walls));
    }

    #[test]
    fn pit_movers_get_their_own_regions() {
        let map = ConnectivityMap::new(room(&[
            "oo...........",
            "oo...........",
            ".............",
            ".............",
            "..........o..",
            "..........oo.",
            ".............",
        ]));
        assert_eq!(map.region_count(PitsOnly), 2);
        assert!(map.is_path_possible(Point::new(0, 0), Point::new(1, 1), PitsOnly));
        assert!(!map.is_path_possible(Point::new(0, 0), Point::new(10, 4), PitsOnly));
        assert!(map.is_path_possible(Point::new(0, 0), Point::new(12, 6), NoPits));
        assert!(map.is_path_possible(Point::new(2, 0), Point::new(12, 6), Ground));
    }

    #[test]
    fn full_rebuild_is_sound_on_random_rooms() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..8 {
            let mut grid = GridRoom::new(RoomShape::OneByOne);
            for p in RoomShape::OneByOne.cells() {
                match rng.random_range(0..10) {
                    0..=2 => grid.set(p, ROCK),
                    3 => grid.set(p, PIT),
                    _ => {}
                }
            }
            let map = ConnectivityMap::new(grid);
            for profile in MovementProfile::ALL {
                assert_sound(&map, profile);
            }
        }
    }

    #[test]
    fn l_shaped_room_connects_around_the_corner() {
        let map = ConnectivityMap::new(GridRoom::new(RoomShape::LBR));
        assert_eq!(map.region_count(Ground), 1);
        assert!(map.is_path_possible(Point::new(25, 0), Point::new(0, 13), Ground));
        assert_eq!(map.label_at(Point::new(20, 10), Ground), None);
    }

    #[test]
    fn unchanged_room_reports_no_changes() {
        let mut map = ConnectivityMap::new(room(&[
            "......r......",
            ".............",
            ".............",
            ".............",
            ".............",
            ".............",
            ".............",
        ]));
        let before = map.label_at(Point::new(0, 0), Ground);
        assert_eq!(map.incremental_update(), 0);
        assert_eq!(map.label_at(Point::new(0, 0), Ground), before);
    }

    #[test]
    fn breaking_a_rock_joins_the_only_neighbor_region() {
        let mut map = ConnectivityMap::new(room(&[
            ".............",
            ".............",
            "......r......",
            ".............",
            ".............",
            ".............",
            ".............",
        ]));
        let rock = Point::new(6, 2);
        let region = map.label_at(Point::new(0, 0), Ground).unwrap();
        assert_eq!(map.label_at(rock, Ground), Some(IMPASSABLE));

        map.room_mut().clear(rock);
        assert_eq!(map.incremental_update(), 1);
        assert_eq!(map.label_at(rock, Ground), Some(region));
        assert_eq!(map.region_count(Ground), 1);
        assert_sound(&map, Ground);
    }

    #[test]
    fn cell_with_no_passable_neighbors_gets_a_fresh_region() {
        let mut map = ConnectivityMap::new(room(&[
            ".....rrr.....",
            ".....rrr.....",
            ".....rrr.....",
            ".............",
            ".............",
            ".............",
            ".............",
        ]));
        let center = Point::new(6, 1);
        map.room_mut().clear(center);
        map.incremental_update();
        let label = map.label_at(center, Ground).unwrap();
        assert!(label > 0);
        assert_ne!(Some(label), map.label_at(Point::new(0, 0), Ground));
        assert_eq!(map.region_count(Ground), 2);
        assert!(!map.is_path_possible(center, Point::new(0, 0), Ground));
    }

    #[test]
    fn placing_a_rock_that_cuts_a_corridor_splits_the_region() {
        let mut map = ConnectivityMap::new(room(&[
            "rrrrrrrrrrrrr",
            "rrrrrrrrrrrrr",
            "rrrrrrrrrrrrr",
            ".............",
            "rrrrrrrrrrrrr",
            "rrrrrrrrrrrrr",
            "rrrrrrrrrrrrr",
        ]));
        let (a, b) = (Point::new(0, 3), Point::new(12, 3));
        assert!(map.is_path_possible(a, b, Ground));

        map.room_mut().set(Point::new(6, 3), ROCK);
        map.incremental_update();
        assert!(!map.is_path_possible(a, b, Ground));
        assert_ne!(map.label_at(a, Ground), map.label_at(b, Ground));
        assert_eq!(map.region_count(Ground), 2);
        assert_sound(&map, Ground);
        // Flyers were never blocked by rocks and are untouched.
        assert!(map.is_path_possible(a, b, Walls));
    }

    #[test]
    fn removing_a_corner_cell_relabels_but_keeps_one_region() {
        let mut map = ConnectivityMap::new(GridRoom::new(RoomShape::OneByOne));
        let before = map.label_at(Point::new(5, 5), Ground);
        map.room_mut().set(Point::new(0, 0), ROCK);
        map.incremental_update();
        // Two labelled neighbors trigger the split check, which re-floods
        // under a fresh label.
        assert_eq!(map.region_count(Ground), 1);
        assert_ne!(map.label_at(Point::new(5, 5), Ground), before);
        assert_eq!(map.label_at(Point::new(0, 0), Ground), Some(IMPASSABLE));
        assert_sound(&map, Ground);
    }

    #[test]
    fn direct_tile_calls_are_noops_when_nothing_flips() {
        let mut map = ConnectivityMap::new(room(&[
            "......r......",
            ".............",
            ".............",
            ".............",
            ".............",
            ".............",
            ".............",
        ]));
        let open = map.label_at(Point::new(0, 0), Ground);
        map.add_passable_tile(Point::new(0, 0), Ground);
        assert_eq!(map.label_at(Point::new(0, 0), Ground), open);
        map.remove_passable_tile(Point::new(6, 0), Ground);
        assert_eq!(map.label_at(Point::new(6, 0), Ground), Some(IMPASSABLE));
        map.add_passable_tile(Point::new(40, 40), Ground);
        assert_eq!(map.region_count(Ground), 1);
    }

    #[test]
    fn bridging_regions_leaves_them_unmerged_until_rebuild() {
        // Three one-cell islands (left, right, up) around a rock at (6, 3).
        let mut map = ConnectivityMap::new(room(&[
            "rrrrrrrrrrrrr",
            "rrrrrrrrrrrrr",
            "rrrrrr.rrrrrr",
            "rrrrr.r.rrrrr",
            "rrrrrrrrrrrrr",
            "rrrrrrrrrrrrr",
            "rrrrrrrrrrrrr",
        ]));
        let left = Point::new(5, 3);
        let right = Point::new(7, 3);
        let up = Point::new(6, 2);
        let center = Point::new(6, 3);
        assert_eq!(map.region_count(Ground), 3);
        let left_label = map.label_at(left, Ground);

        map.room_mut().clear(center);
        map.incremental_update();

        // The center joined the first labelled neighbor (left) only.
        assert_eq!(map.label_at(center, Ground), left_label);
        assert!(map.is_path_possible(left, center, Ground));
        assert!(!map.is_path_possible(left, right, Ground));
        assert!(!map.is_path_possible(left, up, Ground));
        assert!(!map.is_path_possible(right, up, Ground));
        assert_eq!(map.region_count(Ground), 3);

        // Ground truth says they are all connected now.
        assert!(reachable(&map, left, right, Ground));
        assert!(reachable(&map, right, up, Ground));

        map.rebuild();
        assert!(map.is_path_possible(left, right, Ground));
        assert!(map.is_path_possible(right, up, Ground));
        assert_eq!(map.region_count(Ground), 1);
    }

    #[test]
    fn split_repair_coalesces_regions_left_apart_by_a_merge() {
        let mut map = ConnectivityMap::new(room(&[
            "rrrrrrrrrrrrr",
            "rrrrrrrrrrrrr",
            "rrrrrr.rrrrrr",
            "rrrr..r..rrrr",
            "rrrrrr.rrrrrr",
            "rrrrrrrrrrrrr",
            "rrrrrrrrrrrrr",
        ]));
        map.room_mut().clear(Point::new(6, 3));
        map.incremental_update();
        assert_eq!(map.region_count(Ground), 4);

        // Blocking the left arm next to the center re-floods from the center,
        // which now sweeps through every island.
        map.room_mut().set(Point::new(5, 3), ROCK);
        map.incremental_update();
        assert!(map.is_path_possible(Point::new(6, 2), Point::new(8, 3), Ground));
        assert!(map.is_path_possible(Point::new(6, 4), Point::new(7, 3), Ground));
        assert!(!map.is_path_possible(Point::new(4, 3), Point::new(6, 3), Ground));
        assert_eq!(map.region_count(Ground), 2);
    }

    #[test]
    fn random_single_edits_never_claim_false_connections() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        let mut grid = GridRoom::new(RoomShape::OneByOne);
        for p in RoomShape::OneByOne.cells() {
            if rng.random_range(0..3) == 0 {
                grid.set(p, ROCK);
            }
        }
        let mut map = ConnectivityMap::new(grid);
        let cells: Vec<Point> = RoomShape::OneByOne.cells().collect();
        for _ in 0..150 {
            let p = cells[rng.random_range(0..cells.len())];
            let cell = if map.room().get(p) == ROCK {
                CellState::EMPTY
            } else {
                ROCK
            };
            map.room_mut().set(p, cell);
            assert_eq!(map.incremental_update(), 1);

            let a = cells[rng.random_range(0..cells.len())];
            let region = flood(&map, a, Ground);
            for &b in &cells {
                if map.is_path_possible(a, b, Ground) {
                    assert!(region.contains(&b), "{a} -> {b}");
                }
                let lb = map.label_at(b, Ground).unwrap();
                assert_eq!(lb == IMPASSABLE, !map.is_passable(b, Ground), "{b}");
            }
        }
    }

    #[test]
    fn several_edits_in_one_tick_stay_sound_for_cuts() {
        // An open ring; closing two cells in one tick splits it in two.
        let mut map = ConnectivityMap::new(room(&[
            ".............",
            ".rrrrrrrrrrr.",
            ".rrrrrrrrrrr.",
            ".rrrrrrrrrrr.",
            ".rrrrrrrrrrr.",
            ".rrrrrrrrrrr.",
            ".............",
        ]));
        assert_eq!(map.region_count(Ground), 1);
        map.room_mut().set(Point::new(6, 0), ROCK);
        map.room_mut().set(Point::new(6, 6), ROCK);
        assert_eq!(map.incremental_update(), 2);
        assert_eq!(map.region_count(Ground), 2);
        assert!(!map.is_path_possible(Point::new(0, 0), Point::new(12, 0), Ground));
        assert_sound(&map, Ground);
    }

    #[test]
    fn rebuild_draws_a_new_generation() {
        let mut map = ConnectivityMap::new(GridRoom::new(RoomShape::IH));
        let first = map.generation();
        map.incremental_update();
        assert_eq!(map.generation(), first);
        map.rebuild();
        assert_ne!(map.generation(), first);
        let other = ConnectivityMap::new(GridRoom::new(RoomShape::IH));
        assert_ne!(other.generation(), map.generation());
    }

    #[test]
    fn swapping_the_room_and_rebuilding_picks_up_the_new_shape() {
        let mut map = ConnectivityMap::new(GridRoom::new(RoomShape::IH));
        assert_eq!(map.cell_count(), 13);
        *map.room_mut() = GridRoom::new(RoomShape::TwoByOne);
        map.rebuild();
        assert_eq!(map.shape(), RoomShape::TwoByOne);
        assert_eq!(map.cell_count(), 26 * 7);
        assert!(map.is_path_possible(Point::new(0, 0), Point::new(25, 6), Ground));
        let room = map.into_room();
        assert_eq!(room.shape(), RoomShape::TwoByOne);
    }
}
