use super::node::Nodes;
use super::*;
use crate::error::{Error, Result};
use crate::Keyed;
use std::fmt;
use std::mem;

/// An ordered container on top of an unbalanced binary search tree.
///
/// Values are ordered by their `Keyed::key`. Equal keys are allowed and kept in
/// insertion order; `Map` and `Set` reject them before reaching the tree.
/// There is no rebalancing, so inserting sorted data gives a tree as deep as
/// it is long: every operation is then linear
pub struct BSTree<V> {
    pub(super) nodes: Nodes<V>,
    pub(super) root: Option<NodeId>,
}

impl<V> BSTree<V> {
    pub fn new() -> Self {
        BSTree {
            nodes: Nodes::new(),
            root: None,
        }
    }

    /// Return the total number of values in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Return the maximum number of values a tree could theoretically hold
    pub fn max_size(&self) -> usize {
        Nodes::<V>::max_len()
    }

    /// Drop every value. Calling it on an empty tree does nothing
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Exchange the contents of both trees. Positions follow their values, so
    /// a position taken from `self` must then be used with `other`
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Position of the smallest value, or `End` for an empty tree
    pub fn begin(&self) -> Position {
        Position::from_node(self.root.map(|root| self.nodes.front(root)))
    }

    /// The one-past-the-last position
    pub fn end(&self) -> Position {
        Position::End
    }

    /// Step to the next value in order.
    /// The last value steps to `End`. Stepping from `End` in either direction
    /// reaches the last value
    pub fn next(&self, pos: Position) -> Result<Position> {
        match pos {
            Position::End => self.prev(Position::End),
            Position::Node(id) => {
                self.check_live(id)?;
                Ok(Position::from_node(self.nodes.successor(id)))
            }
        }
    }

    /// Step to the previous value in order.
    /// `End` steps back to the last value, and the first value steps back to `End`
    pub fn prev(&self, pos: Position) -> Result<Position> {
        match pos {
            Position::End => Ok(Position::from_node(
                self.root.map(|root| self.nodes.back(root)),
            )),
            Position::Node(id) => {
                self.check_live(id)?;
                Ok(Position::from_node(self.nodes.predecessor(id)))
            }
        }
    }

    /// Step `count` times forward
    pub fn advance(&self, mut pos: Position, count: usize) -> Result<Position> {
        for _ in 0..count {
            pos = self.next(pos)?;
        }
        Ok(pos)
    }

    /// Step `count` times backward
    pub fn retreat(&self, mut pos: Position, count: usize) -> Result<Position> {
        for _ in 0..count {
            pos = self.prev(pos)?;
        }
        Ok(pos)
    }

    /// Return the value at the given position
    pub fn get(&self, pos: Position) -> Result<&V> {
        match pos {
            Position::End => Err(Error::EndPosition),
            Position::Node(id) => self.nodes.get(id),
        }
    }

    /// Mutable access for adapters that only touch the non-key part of a value
    pub(crate) fn get_mut(&mut self, pos: Position) -> Result<&mut V> {
        match pos {
            Position::End => Err(Error::EndPosition),
            Position::Node(id) => self.nodes.get_mut(id),
        }
    }

    /// Mutable access to a node that was just found or inserted
    pub(crate) fn node_value_mut(&mut self, id: NodeId) -> &mut V {
        self.nodes.value_mut(id)
    }

    /// Return the smallest value
    pub fn first(&self) -> Option<&V> {
        self.get(self.begin()).ok()
    }

    /// Return the largest value
    pub fn last(&self) -> Option<&V> {
        self.prev(Position::End)
            .and_then(|pos| self.get(pos))
            .ok()
    }

    /// Remove the value at `pos` and return it.
    ///
    /// Only the node at `pos` is freed: positions to every other value stay
    /// valid, while `pos` itself becomes stale
    pub fn erase(&mut self, pos: Position) -> Result<V> {
        let root = self.root.ok_or(Error::Empty)?;
        let id = match pos {
            Position::End => return Err(Error::EndPosition),
            Position::Node(id) => id,
        };
        self.check_live(id)?;

        let (value, replacement) = self.nodes.erase(id);
        if id == root {
            log::trace!("erase {:?}: new root {:?}", id, replacement);
            self.root = replacement;
        }
        Ok(value)
    }

    /// Return a sorted iterator over references to the values in the tree
    pub fn iter(&self) -> Iter<V> {
        Iter::new(self)
    }

    /// Return the number of nodes reachable from the root, walking the structure
    pub(crate) fn count_reachable(&self) -> usize {
        self.root.map_or(0, |root| self.nodes.subtree_len(root))
    }

    fn check_live(&self, id: NodeId) -> Result<()> {
        if self.nodes.contains(id) {
            Ok(())
        } else {
            Err(Error::StalePosition)
        }
    }
}

impl<V: Keyed> BSTree<V> {
    /// Insert a value, creating the root if the tree is empty.
    /// No uniqueness check happens here
    pub fn insert(&mut self, value: V) -> Position {
        Position::Node(self.insert_node(value))
    }

    /// Return the position of a value with the given key, or `End` if absent
    pub fn find(&self, key: &V::Key) -> Position {
        Position::from_node(self.find_node(key))
    }

    pub fn contains(&self, key: &V::Key) -> bool {
        !self.find(key).is_end()
    }
}

impl<V: Keyed> BSTree<V> {
    pub(crate) fn insert_node(&mut self, value: V) -> NodeId {
        match self.root {
            None => {
                let root = self.nodes.alloc(value, None);
                self.root = Some(root);
                root
            }
            Some(root) => self.nodes.insert(root, value),
        }
    }

    pub(crate) fn find_node(&self, key: &V::Key) -> Option<NodeId> {
        self.root.and_then(|root| self.nodes.find(root, key))
    }
}

impl<V: Keyed + Clone> BSTree<V> {
    /// Insert a copy of every value of `other`, in order.
    /// Duplicated keys are kept on both sides and `other` is left untouched
    pub fn merge(&mut self, other: &BSTree<V>) {
        for value in other.iter() {
            self.insert(value.clone());
        }
    }
}

impl<V> Default for BSTree<V> {
    fn default() -> Self {
        BSTree::new()
    }
}

impl<V: Keyed + Clone> Clone for BSTree<V> {
    /// Re-insert every value in order. The shape of the copy can differ from
    /// the original, but its in-order sequence is the same
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<V: fmt::Debug> fmt::Debug for BSTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for BSTree<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq> Eq for BSTree<V> {}

impl<V: Keyed> std::iter::FromIterator<V> for BSTree<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut tree = BSTree::new();
        tree.extend(iter);
        tree
    }
}

impl<V: Keyed> Extend<V> for BSTree<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, V> IntoIterator for &'a BSTree<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<V> IntoIterator for BSTree<V> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    /// Consume the tree, yielding its values in order
    fn into_iter(self) -> IntoIter<V> {
        IntoIter::new(self.nodes.into_values_in_order(self.root))
    }
}
