use roomnav_core::FlatKey;

/// Cached neighbor computation helper.
///
/// Enumerates the cardinal (4-way) neighbors of a flat key in the fixed
/// order left, right, up, down, filtered by a predicate.
#[derive(Debug, Clone)]
pub struct Neighbors {
    buf: Vec<FlatKey>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the cardinal neighbors of `key`, keeping only those for which
    /// `keep` returns `true`.
    pub fn cardinal(&mut self, key: FlatKey, keep: impl Fn(FlatKey) -> bool) -> &[FlatKey] {
        self.buf.clear();
        for n in key.neighbors_4() {
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}
