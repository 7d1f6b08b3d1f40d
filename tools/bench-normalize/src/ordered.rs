//! Insertion-ordered map.
//!
//! Output order of groups and of tests within a group is observable, so
//! grouping uses this instead of a bare `HashMap`. Re-inserting an existing
//! key replaces the value but keeps the key's original position.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A map that iterates in first-insertion order.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> OrderedMap<K, V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&slot) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[slot].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Return the value for `key`, inserting `make()` at the end if absent.
    pub fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push((key, make()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    /// Look up a value by key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Iterate over values in first-insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_in_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert("c", 'c');
        map.insert("a", 'a');
        map.insert("b", 'b');
        let order: Vec<char> = map.values().copied().collect();
        assert_eq!(order, ['c', 'a', 'b']);
    }

    #[test]
    fn reinsert_keeps_position() {
        let mut map = OrderedMap::new();
        map.insert("x", 1);
        map.insert("y", 2);
        assert_eq!(map.insert("x", 10), Some(1));
        let values: Vec<i32> = map.values().copied().collect();
        assert_eq!(values, [10, 2]);
        assert_eq!(map.get("x"), Some(&10));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn get_or_insert_with_only_inserts_once() {
        let mut map: OrderedMap<String, Vec<u32>> = OrderedMap::new();
        map.get_or_insert_with("k".into(), Vec::new).push(1);
        map.get_or_insert_with("k".into(), Vec::new).push(2);
        assert_eq!(map.get("k"), Some(&vec![1, 2]));
        assert_eq!(map.len(), 1);
    }
}
