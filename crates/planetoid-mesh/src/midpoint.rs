//! Edge midpoint deduplication for icosphere subdivision.

use rustc_hash::FxHashMap;

/// Packs an unordered vertex pair into one key.
///
/// The smaller index takes the high 32 bits and the larger the low 32 bits,
/// so every pair of `u32` indices maps to a distinct `u64` and `(a, b)`
/// shares a key with `(b, a)`.
#[inline]
pub fn edge_key(a: u32, b: u32) -> u64 {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    (u64::from(lo) << 32) | u64::from(hi)
}

/// Maps an undirected edge to the vertex created at its midpoint.
///
/// Both triangles adjacent to an edge resolve it to the same new vertex,
/// which keeps a subdivided mesh watertight. One cache serves a single
/// subdivision pass.
#[derive(Debug, Default)]
pub struct MidpointCache {
    midpoints: FxHashMap<u64, u32>,
}

impl MidpointCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache pre-sized for `edges` entries.
    pub fn with_capacity(edges: usize) -> Self {
        Self {
            midpoints: FxHashMap::with_capacity_and_hasher(edges, Default::default()),
        }
    }

    /// Cached midpoint vertex for the edge `(a, b)`, if any.
    pub fn get(&self, a: u32, b: u32) -> Option<u32> {
        self.midpoints.get(&edge_key(a, b)).copied()
    }

    /// Returns the midpoint vertex for `(a, b)`, calling `create` to append a
    /// new vertex the first time the edge is seen.
    pub fn get_or_insert_with(&mut self, a: u32, b: u32, create: impl FnOnce() -> u32) -> u32 {
        *self.midpoints.entry(edge_key(a, b)).or_insert_with(create)
    }

    /// Number of distinct edges seen.
    pub fn len(&self) -> usize {
        self.midpoints.len()
    }

    /// Returns `true` if no edge has been seen.
    pub fn is_empty(&self) -> bool {
        self.midpoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_unordered() {
        assert_eq!(edge_key(3, 9), edge_key(9, 3));
        assert_eq!(edge_key(0, 0), 0);
    }

    #[test]
    fn test_key_does_not_collide_past_16_bits() {
        // A 16-bit shift would map both of these to 65536.
        assert_ne!(edge_key(0, 65_536), edge_key(1, 0));
        assert_ne!(edge_key(1, 70_000), edge_key(2, 4_464));
    }

    #[test]
    fn test_key_covers_full_u32_range() {
        let max = u32::MAX;
        assert_eq!(edge_key(max, max - 1), (u64::from(max - 1) << 32) | u64::from(max));
        assert_ne!(edge_key(0, max), edge_key(1, max));
        assert_ne!(edge_key(max - 1, max), edge_key(max, max));
    }

    #[test]
    fn test_same_edge_created_once() {
        let mut cache = MidpointCache::new();
        let mut created = 0;

        let first = cache.get_or_insert_with(5, 2, || {
            created += 1;
            100
        });
        let second = cache.get_or_insert_with(2, 5, || {
            created += 1;
            200
        });

        assert_eq!(first, 100);
        assert_eq!(second, 100);
        assert_eq!(created, 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(5, 2), Some(100));
        assert_eq!(cache.get(5, 3), None);
    }

    #[test]
    fn test_with_capacity_starts_empty() {
        let cache = MidpointCache::with_capacity(30);
        assert!(cache.is_empty());
    }
}
