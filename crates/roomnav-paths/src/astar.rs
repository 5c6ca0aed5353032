//! Weighted A* over flat grid keys.
//!
//! All scratch state (predecessors, g/f scores, the open set) lives for one
//! call only. The open set has no decrease-priority: a node that is already
//! queued keeps its original priority when a cheaper route to it is found.
//! Its g-score and predecessor are still updated, so the route it reports
//! when finally popped is the best one known, at the cost of some
//! out-of-order expansion.

use roomnav_core::{FlatKey, Point};

use crate::fastmap::FastMap;
use crate::heap::MinPriorityQueue;
use crate::traits::AstarPather;

/// Counters for the most recent search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Entries pushed onto the open set.
    pub heap_pushes: usize,
    /// Entries popped from the open set.
    pub heap_pops: usize,
}

/// Compute a route from `start` to `goal` using A* with heuristic inflation
/// factor `epsilon` (≥ 1).
///
/// Returns the route ordered **goal first**, both endpoints included, or
/// `None` if the open set runs dry. `stats` is overwritten.
pub fn astar_path<P: AstarPather>(
    pather: &P,
    start: Point,
    goal: Point,
    epsilon: f64,
    stats: &mut SearchStats,
) -> Option<Vec<Point>> {
    *stats = SearchStats::default();
    let start_key = FlatKey::encode(start);
    let goal_key = FlatKey::encode(goal);

    let mut came_from: FastMap<FlatKey, FlatKey> = FastMap::new();
    let mut g_score: FastMap<FlatKey, f64> = FastMap::new();
    // Current f per key. For a node still queued under an older priority
    // this is the lower, up-to-date value.
    let mut f_score: FastMap<FlatKey, f64> = FastMap::new();
    let mut open: MinPriorityQueue<FlatKey, f64> = MinPriorityQueue::new();

    g_score.set(start_key, 0.0);
    let start_f = epsilon * pather.estimate(start, goal);
    f_score.set(start_key, start_f);
    open.insert(start_key, start_f);
    stats.heap_pushes += 1;

    let mut nbuf = Vec::with_capacity(4);

    while let Some(current) = open.pop() {
        stats.heap_pops += 1;
        debug_assert!(f_score.has(&current), "{current:?} popped without an f-score");
        if current == goal_key {
            return Some(reconstruct(&came_from, start_key, current));
        }

        let current_point = current.decode();
        let Some(current_g) = g_score.get(&current) else {
            continue;
        };

        nbuf.clear();
        pather.neighbors(current, goal_key, &mut nbuf);

        for &nk in nbuf.iter() {
            let np = nk.decode();
            let tentative = current_g + pather.cost(current_point, np);
            if g_score.get(&nk).is_some_and(|g| tentative >= g) {
                continue;
            }

            came_from.set(nk, current);
            g_score.set(nk, tentative);
            let f = tentative + epsilon * pather.estimate(np, goal);
            f_score.set(nk, f);
            if !open.has(&nk) {
                open.insert(nk, f);
                stats.heap_pushes += 1;
            }
        }
    }

    None
}

fn reconstruct(came_from: &FastMap<FlatKey, FlatKey>, start: FlatKey, goal: FlatKey) -> Vec<Point> {
    let mut path = vec![goal.decode()];
    let mut cur = goal;
    while cur != start {
        let Some(prev) = came_from.get(&cur) else {
            break;
        };
        path.push(prev.decode());
        cur = prev;
    }
    path
}
