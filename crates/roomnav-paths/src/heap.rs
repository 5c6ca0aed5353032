//! Binary min-heap with O(1) membership, used as the A* open set.

use std::hash::Hash;

use crate::fastmap::FastSet;

#[derive(Debug, Clone, Copy)]
struct Entry<T, P> {
    priority: P,
    item: T,
}

/// Min-priority queue over `(item, priority)` pairs.
///
/// There is no decrease-priority operation. Among equal priorities the pop
/// order is unspecified. Membership is tracked per item: inserting an item
/// that is already queued adds a second entry, and popping either entry
/// clears membership, so callers that need exact membership (A* does) check
/// [`has`](Self::has) before inserting.
#[derive(Debug, Clone)]
pub struct MinPriorityQueue<T, P> {
    heap: Vec<Entry<T, P>>,
    members: FastSet<T>,
}

impl<T, P> Default for MinPriorityQueue<T, P> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            members: FastSet::default(),
        }
    }
}

#[inline]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[inline]
fn left(i: usize) -> usize {
    2 * i + 1
}

impl<T: Copy + Hash + Eq, P: Copy + PartialOrd> MinPriorityQueue<T, P> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Some minimum-priority item, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<T> {
        self.heap.first().map(|e| e.item)
    }

    /// Whether `item` is currently queued.
    #[inline]
    pub fn has(&self, item: &T) -> bool {
        self.members.has(item)
    }

    /// Queue `item` with `priority`. O(log n).
    pub fn insert(&mut self, item: T, priority: P) {
        self.heap.push(Entry { priority, item });
        self.members.add(item);

        let mut cur = self.heap.len() - 1;
        while cur > 0 {
            let up = parent(cur);
            if self.heap[up].priority <= self.heap[cur].priority {
                break;
            }
            self.heap.swap(cur, up);
            cur = up;
        }
    }

    /// Remove and return some minimum-priority item. O(log n).
    pub fn pop(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let top = self.heap.pop()?;
        self.members.delete(&top.item);

        let len = self.heap.len();
        let mut cur = 0;
        while left(cur) < len {
            let mut child = left(cur);
            let right = child + 1;
            if right < len && self.heap[right].priority < self.heap[child].priority {
                child = right;
            }
            if self.heap[child].priority >= self.heap[cur].priority {
                break;
            }
            self.heap.swap(cur, child);
            cur = child;
        }

        Some(top.item)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.members.clear();
    }
}
