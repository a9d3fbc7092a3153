//! Small collection types shared by the parser crates.

use rustc_hash::FxHashMap;
use std::hash::Hash;

pub use rustc_hash::{FxHashMap as FxMap, FxHashSet};

/// A multimap that stores several values per key, in insertion order.
#[derive(Debug, Clone)]
pub struct MultiMap<K, V> {
    map: FxHashMap<K, Vec<V>>,
}

impl<K: Eq + Hash, V> MultiMap<K, V> {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.map.entry(key).or_default().push(value);
    }

    /// All values stored under `key`, oldest first. Empty if the key is absent.
    pub fn get(&self, key: &K) -> &[V] {
        self.map.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K: Eq + Hash, V> Default for MultiMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// A fixed-capacity bit set indexed by `usize`.
///
/// Used for per-node marks (e.g. "overlaps the edit") keyed by arena index.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    /// Create a bit set able to hold `len` bits, all cleared.
    pub fn with_len(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
            len,
        }
    }

    /// Capacity in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set bit `index`. Out-of-range indices are ignored.
    #[inline]
    pub fn insert(&mut self, index: usize) {
        if index < self.len {
            self.words[index / 64] |= 1 << (index % 64);
        }
    }

    /// Whether bit `index` is set. Out-of-range indices read as unset.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < self.len && self.words[index / 64] & (1 << (index % 64)) != 0
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

impl std::fmt::Debug for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries((0..self.len).filter(|&i| self.contains(i)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_map_keeps_insertion_order() {
        let mut map = MultiMap::new();
        map.insert(4u32, "outer");
        map.insert(4u32, "inner");
        map.insert(9u32, "other");
        assert_eq!(map.get(&4), &["outer", "inner"][..]);
        assert_eq!(map.get(&9), &["other"][..]);
        assert!(map.get(&1).is_empty());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_bit_set() {
        let mut set = BitSet::with_len(130);
        set.insert(0);
        set.insert(64);
        set.insert(129);
        set.insert(500);
        assert!(set.contains(0));
        assert!(set.contains(64));
        assert!(set.contains(129));
        assert!(!set.contains(1));
        assert!(!set.contains(500));
        assert_eq!(set.count(), 3);
    }
}
