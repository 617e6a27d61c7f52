use crate::bstree::{self, BSTree, Position};
use crate::error::{Error, Result};
use crate::Keyed;
use std::fmt;
use std::mem;

/// A key-value pair as stored in the tree. Only the key takes part in ordering
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<K, T> {
    key: K,
    value: T,
}

impl<K: Ord, T> Keyed for Entry<K, T> {
    type Key = K;

    fn key(&self) -> &K {
        &self.key
    }
}

/// An ordered map with unique keys, backed by a `BSTree`
pub struct Map<K, T> {
    tree: BSTree<Entry<K, T>>,
}

impl<K, T> Map<K, T> {
    pub fn new() -> Self {
        Map {
            tree: BSTree::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    pub fn begin(&self) -> Position {
        self.tree.begin()
    }

    pub fn end(&self) -> Position {
        self.tree.end()
    }

    pub fn next(&self, pos: Position) -> Result<Position> {
        self.tree.next(pos)
    }

    pub fn prev(&self, pos: Position) -> Result<Position> {
        self.tree.prev(pos)
    }

    /// Return the key and value at the given position
    pub fn entry_at(&self, pos: Position) -> Result<(&K, &T)> {
        self.tree.get(pos).map(|entry| (&entry.key, &entry.value))
    }

    /// Return the value at the given position for modification
    pub fn value_at_mut(&mut self, pos: Position) -> Result<&mut T> {
        self.tree.get_mut(pos).map(|entry| &mut entry.value)
    }

    /// Return an iterator over the entries, sorted by key
    pub fn iter(&self) -> Iter<K, T> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }
}

impl<K: Ord, T> Map<K, T> {
    /// Insert a new entry if the key is not present yet.
    /// Return the position of the entry with that key and whether it was inserted.
    /// An existing entry is left untouched
    pub fn insert(&mut self, key: K, value: T) -> (Position, bool) {
        match self.tree.find(&key) {
            Position::End => (self.tree.insert(Entry { key, value }), true),
            pos => (pos, false),
        }
    }

    /// Insert a new entry, or overwrite the value of the existing one.
    /// The returned flag tells whether an insertion happened
    pub fn insert_or_assign(&mut self, key: K, value: T) -> (Position, bool) {
        match self.tree.find_node(&key) {
            None => (self.tree.insert(Entry { key, value }), true),
            Some(id) => {
                self.tree.node_value_mut(id).value = value;
                (Position::Node(id), false)
            }
        }
    }

    /// Insert every entry in order, reporting each result like `insert`
    pub fn insert_many<I>(&mut self, entries: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = (K, T)>,
    {
        entries
            .into_iter()
            .map(|(key, value)| self.insert(key, value))
            .collect()
    }

    /// Return the value for `key`, inserting `T::default()` first if absent
    pub fn get_or_insert_default(&mut self, key: K) -> &mut T
    where
        T: Default,
    {
        let id = match self.tree.find_node(&key) {
            Some(id) => id,
            None => self.tree.insert_node(Entry {
                key,
                value: T::default(),
            }),
        };
        &mut self.tree.node_value_mut(id).value
    }

    /// Strict lookup: never inserts
    pub fn at(&self, key: &K) -> Result<&T> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Strict lookup for modification: never inserts
    pub fn at_mut(&mut self, key: &K) -> Result<&mut T> {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    pub fn get(&self, key: &K) -> Option<&T> {
        self.tree.get(self.tree.find(key)).ok().map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut T> {
        let id = self.tree.find_node(key)?;
        Some(&mut self.tree.node_value_mut(id).value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Return the position of the entry with that key, or `End`
    pub fn find(&self, key: &K) -> Position {
        self.tree.find(key)
    }

    /// Remove the entry at `pos` and return it
    pub fn erase(&mut self, pos: Position) -> Result<(K, T)> {
        self.tree.erase(pos).map(|entry| (entry.key, entry.value))
    }

    /// Remove the entry with that key, returning its value if it was present
    pub fn remove(&mut self, key: &K) -> Option<T> {
        let pos = self.tree.find(key);
        self.tree.erase(pos).ok().map(|entry| entry.value)
    }

    /// Move into `self` every entry of `other` whose key is not present yet.
    /// Entries with conflicting keys stay in `other`
    pub fn merge(&mut self, other: &mut Self) {
        let mut kept = BSTree::new();
        for entry in mem::take(&mut other.tree) {
            if self.tree.contains(&entry.key) {
                kept.insert(entry);
            } else {
                self.tree.insert(entry);
            }
        }
        log::trace!("merge left {} conflicting entries behind", kept.len());
        other.tree = kept;
    }
}

impl<K, T> Default for Map<K, T> {
    fn default() -> Self {
        Map::new()
    }
}

impl<K: Ord + Clone, T: Clone> Clone for Map<K, T> {
    fn clone(&self) -> Self {
        Map {
            tree: self.tree.clone(),
        }
    }
}

impl<K: fmt::Debug, T: fmt::Debug> fmt::Debug for Map<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, T: PartialEq> PartialEq for Map<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, T: Eq> Eq for Map<K, T> {}

impl<K: Ord, T> std::iter::FromIterator<(K, T)> for Map<K, T> {
    /// Build a map from entries. On repeated keys the first entry wins
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, T> Extend<(K, T)> for Map<K, T> {
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, T> IntoIterator for &'a Map<K, T> {
    type Item = (&'a K, &'a T);
    type IntoIter = Iter<'a, K, T>;

    fn into_iter(self) -> Iter<'a, K, T> {
        self.iter()
    }
}

impl<K, T> IntoIterator for Map<K, T> {
    type Item = (K, T);
    type IntoIter = IntoIter<K, T>;

    fn into_iter(self) -> IntoIter<K, T> {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

/// Sorted iterator over the entries of a `Map`
pub struct Iter<'a, K, T> {
    inner: bstree::Iter<'a, Entry<K, T>>,
}

impl<'a, K, T> Iterator for Iter<'a, K, T> {
    type Item = (&'a K, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, T> DoubleEndedIterator for Iter<'a, K, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| (&entry.key, &entry.value))
    }
}

impl<'a, K, T> ExactSizeIterator for Iter<'a, K, T> {}
impl<'a, K, T> std::iter::FusedIterator for Iter<'a, K, T> {}

/// Owning sorted iterator over the entries of a `Map`
pub struct IntoIter<K, T> {
    inner: bstree::IntoIter<Entry<K, T>>,
}

impl<K, T> Iterator for IntoIter<K, T> {
    type Item = (K, T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (entry.key, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, T> DoubleEndedIterator for IntoIter<K, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| (entry.key, entry.value))
    }
}

impl<K, T> ExactSizeIterator for IntoIter<K, T> {}
impl<K, T> std::iter::FusedIterator for IntoIter<K, T> {}
