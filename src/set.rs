use crate::bstree::{self, BSTree, Position};
use crate::error::Result;
use crate::Keyed;
use std::fmt;
use std::mem;

/// A set member acts as its own key
#[derive(Debug, Clone, PartialEq, Eq)]
struct Member<T>(T);

impl<T: Ord> Keyed for Member<T> {
    type Key = T;

    fn key(&self) -> &T {
        &self.0
    }
}

/// An ordered set of unique values, backed by a `BSTree`
pub struct Set<T> {
    tree: BSTree<Member<T>>,
}

impl<T> Set<T> {
    pub fn new() -> Self {
        Set {
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

    /// Return the value at the given position
    pub fn get(&self, pos: Position) -> Result<&T> {
        self.tree.get(pos).map(|member| &member.0)
    }

    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|member| &member.0)
    }

    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|member| &member.0)
    }

    /// Return a sorted iterator over the values
    pub fn iter(&self) -> Iter<T> {
        Iter {
            inner: self.tree.iter(),
        }
    }
}

impl<T: Ord> Set<T> {
    /// Insert `value` unless an equal one is present.
    /// Return the position of the value equal to it and whether it was inserted
    pub fn insert(&mut self, value: T) -> (Position, bool) {
        match self.tree.find(&value) {
            Position::End => (self.tree.insert(Member(value)), true),
            pos => (pos, false),
        }
    }

    /// Insert every value in order, reporting each result like `insert`
    pub fn insert_many<I>(&mut self, values: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = T>,
    {
        values.into_iter().map(|value| self.insert(value)).collect()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.tree.contains(value)
    }

    /// Return the position of the value, or `End`
    pub fn find(&self, value: &T) -> Position {
        self.tree.find(value)
    }

    /// Remove the value at `pos` and return it
    pub fn erase(&mut self, pos: Position) -> Result<T> {
        self.tree.erase(pos).map(|member| member.0)
    }

    /// Remove the given value, returning whether it was present
    pub fn remove(&mut self, value: &T) -> bool {
        let pos = self.tree.find(value);
        self.tree.erase(pos).is_ok()
    }

    /// Move into `self` every value of `other` that is not present yet.
    /// Values already present stay in `other`
    pub fn merge(&mut self, other: &mut Self) {
        let mut kept = BSTree::new();
        for member in mem::take(&mut other.tree) {
            if self.tree.contains(&member.0) {
                kept.insert(member);
            } else {
                self.tree.insert(member);
            }
        }
        log::trace!("merge left {} conflicting values behind", kept.len());
        other.tree = kept;
    }
}

impl<T> Default for Set<T> {
    fn default() -> Self {
        Set::new()
    }
}

impl<T: Ord + Clone> Clone for Set<T> {
    fn clone(&self) -> Self {
        Set {
            tree: self.tree.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq> Eq for Set<T> {}

impl<T: Ord> std::iter::FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Set::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

/// Sorted iterator over the values of a `Set`
pub struct Iter<'a, T> {
    inner: bstree::Iter<'a, Member<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|member| &member.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back().map(|member| &member.0)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> std::iter::FusedIterator for Iter<'a, T> {}

/// Owning sorted iterator over the values of a `Set`
pub struct IntoIter<T> {
    inner: bstree::IntoIter<Member<T>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|member| member.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back().map(|member| member.0)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> std::iter::FusedIterator for IntoIter<T> {}
