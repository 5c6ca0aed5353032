//! Thin associative containers for the search hot path.
//!
//! Both wrap Fx-hashed std collections: keys here are small integers
//! ([`FlatKey`](roomnav_core::FlatKey), region labels), which is exactly
//! the case FxHash is fast for.

use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

/// Key→value map with `get`/`set`/`has`/`delete`.
///
/// `has(k)` is defined as "`get(k)` returns something", so the two can
/// never disagree. Absence is `None`; no value of `V` is reserved.
#[derive(Debug, Clone)]
pub struct FastMap<K, V> {
    table: FxHashMap<K, V>,
}

impl<K, V> Default for FastMap<K, V> {
    fn default() -> Self {
        Self {
            table: FxHashMap::default(),
        }
    }
}

impl<K: Hash + Eq, V: Copy> FastMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for `n` entries.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            table: FxHashMap::with_capacity_and_hasher(n, Default::default()),
        }
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<V> {
        self.table.get(key).copied()
    }

    #[inline]
    pub fn set(&mut self, key: K, value: V) {
        self.table.insert(key, value);
    }

    #[inline]
    pub fn has(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key`, returning its value if it was present.
    #[inline]
    pub fn delete(&mut self, key: &K) -> Option<V> {
        self.table.remove(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }
}

/// Membership set with `add`/`has`/`delete`.
#[derive(Debug, Clone)]
pub struct FastSet<K> {
    table: FxHashSet<K>,
}

impl<K> Default for FastSet<K> {
    fn default() -> Self {
        Self {
            table: FxHashSet::default(),
        }
    }
}

impl<K: Hash + Eq> FastSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key`. Returns `false` if it was already present.
    #[inline]
    pub fn add(&mut self, key: K) -> bool {
        self.table.insert(key)
    }

    #[inline]
    pub fn has(&self, key: &K) -> bool {
        self.table.contains(key)
    }

    /// Remove `key`. Returns `false` if it was absent.
    #[inline]
    pub fn delete(&mut self, key: &K) -> bool {
        self.table.remove(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }
}
