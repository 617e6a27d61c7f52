use super::NodeId;
use crate::error::{Error, Result};
use crate::Keyed;
use std::cmp::Ordering;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Generations are unique across every arena of the process, so an id taken
/// from one tree never matches a node of another one
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(0);

/// A tree node. `left` and `right` own the subtrees below it, `parent` is
/// only a way back up and is never followed when tearing the tree down
pub(super) struct Node<V> {
    value: V,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

enum Slot<V> {
    Occupied(u64, Node<V>),
    /// Next free slot index
    Vacant(Option<usize>),
}

/// Arena holding every node of one tree.
/// Each node is addressed by a `NodeId` and treated as the root of the subtree
/// below it, so every structural operation here takes the node it starts from
pub(super) struct Nodes<V> {
    slots: Vec<Slot<V>>,
    free_head: Option<usize>,
    len: usize,
}

impl<V> Nodes<V> {
    pub(super) fn new() -> Self {
        Nodes {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// Return the number of live nodes
    pub(super) fn len(&self) -> usize {
        self.len
    }

    /// Upper bound on the number of nodes an arena can address
    pub(super) fn max_len() -> usize {
        isize::MAX as usize / mem::size_of::<Slot<V>>().max(1)
    }

    /// Drop every node at once. Slots are dropped in storage order, so this
    /// never recurses however deep the tree has become
    pub(super) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    /// Allocate a detached node, reusing a freed slot when possible
    pub(super) fn alloc(&mut self, value: V, parent: Option<NodeId>) -> NodeId {
        let generation = NEXT_GENERATION.fetch_add(1, AtomicOrdering::Relaxed);
        let node = Node {
            value,
            left: None,
            right: None,
            parent,
        };

        let index = match self.free_head {
            Some(index) => {
                self.free_head = match self.slots[index] {
                    Slot::Vacant(next) => next,
                    Slot::Occupied(..) => panic!("free list points at occupied slot {}", index),
                };
                self.slots[index] = Slot::Occupied(generation, node);
                index
            }
            None => {
                self.slots.push(Slot::Occupied(generation, node));
                self.slots.len() - 1
            }
        };

        self.len += 1;
        NodeId { index, generation }
    }

    /// Return the value stored at `id`, or an error if that node was freed
    pub(super) fn get(&self, id: NodeId) -> Result<&V> {
        self.node(id)
            .map(|node| &node.value)
            .ok_or(Error::StalePosition)
    }

    /// Mutable access to the value. Callers must not change its key
    pub(super) fn get_mut(&mut self, id: NodeId) -> Result<&mut V> {
        self.node_mut(id)
            .map(|node| &mut node.value)
            .ok_or(Error::StalePosition)
    }

    /// Mutable access to a node known to be live
    pub(super) fn value_mut(&mut self, id: NodeId) -> &mut V {
        &mut self.link_mut(id).value
    }

    /// Return whether `id` names a live node
    pub(super) fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub(super) fn left(&self, id: NodeId) -> Option<NodeId> {
        self.link(id).left
    }

    pub(super) fn right(&self, id: NodeId) -> Option<NodeId> {
        self.link(id).right
    }

    pub(super) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.link(id).parent
    }

    /// Walk up to the root of the whole tree
    pub(super) fn root_of(&self, mut id: NodeId) -> NodeId {
        while let Some(parent) = self.link(id).parent {
            id = parent;
        }
        id
    }

    /// Return the first node of the whole tree `id` belongs to
    pub(super) fn front(&self, id: NodeId) -> NodeId {
        self.leftmost(self.root_of(id))
    }

    /// Return the last node of the whole tree `id` belongs to
    pub(super) fn back(&self, id: NodeId) -> NodeId {
        self.rightmost(self.root_of(id))
    }

    /// Return the leftmost node of the subtree rooted at `id`
    pub(super) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.link(id).left {
            id = left;
        }
        id
    }

    /// Return the rightmost node of the subtree rooted at `id`
    pub(super) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.link(id).right {
            id = right;
        }
        id
    }

    /// In-order successor: the leftmost node of the right subtree if there is one,
    /// otherwise the first ancestor reached from its left side
    pub(super) fn successor(&self, id: NodeId) -> Option<NodeId> {
        let node = self.link(id);
        if let Some(right) = node.right {
            return Some(self.leftmost(right));
        }

        let mut child = id;
        let mut parent = node.parent;
        while let Some(p) = parent {
            let parent_node = self.link(p);
            if parent_node.left == Some(child) {
                return Some(p);
            }
            child = p;
            parent = parent_node.parent;
        }
        None
    }

    /// In-order predecessor, mirror of `successor`
    pub(super) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        let node = self.link(id);
        if let Some(left) = node.left {
            return Some(self.rightmost(left));
        }

        let mut child = id;
        let mut parent = node.parent;
        while let Some(p) = parent {
            let parent_node = self.link(p);
            if parent_node.right == Some(child) {
                return Some(p);
            }
            child = p;
            parent = parent_node.parent;
        }
        None
    }

    /// Count the nodes of the subtree rooted at `id`
    pub(super) fn subtree_len(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            let node = self.link(id);
            count += 1;
            pending.extend(node.left);
            pending.extend(node.right);
        }
        count
    }

    /// Remove the node at `id` from the tree and return its value, along with
    /// the node that took its place (`None` for a leaf).
    ///
    /// A leaf is detached from its parent. A node with a single child is
    /// replaced by that child. A node with two children is replaced by its
    /// in-order successor, which first hands its own spot over to its right
    /// subtree (it has no left child).
    ///
    /// Only the slot of `id` is freed: every other node keeps its id and value
    pub(super) fn erase(&mut self, id: NodeId) -> (V, Option<NodeId>) {
        let node = self.link(id);
        let replacement = match (node.left, node.right) {
            (None, None) => {
                log::trace!("erase {:?}: leaf", id);
                None
            }
            (Some(child), None) | (None, Some(child)) => {
                log::trace!("erase {:?}: replacing with only child {:?}", id, child);
                Some(child)
            }
            (Some(left), Some(right)) => {
                let successor = self.leftmost(right);
                if successor == right {
                    log::trace!("erase {:?}: splicing up right child {:?}", id, right);
                } else {
                    log::trace!("erase {:?}: moving up successor {:?}", id, successor);
                    let successor_right = self.link(successor).right;
                    self.replace_in_parent(successor, successor_right);
                    self.link_mut(successor).right = Some(right);
                    self.link_mut(right).parent = Some(successor);
                }
                self.link_mut(successor).left = Some(left);
                self.link_mut(left).parent = Some(successor);
                Some(successor)
            }
        };
        self.replace_in_parent(id, replacement);
        (self.release(id).value, replacement)
    }

    /// Consume the arena, returning the values reachable from `root` in order
    pub(super) fn into_values_in_order(self, root: Option<NodeId>) -> Vec<V> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = root.map(|root| self.leftmost(root));
        while let Some(id) = current {
            order.push(id.index);
            current = self.successor(id);
        }

        let mut values = self
            .slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Occupied(_, node) => Some(node.value),
                Slot::Vacant(_) => None,
            })
            .collect::<Vec<_>>();
        order
            .into_iter()
            .filter_map(|index| values[index].take())
            .collect()
    }

    fn node(&self, id: NodeId) -> Option<&Node<V>> {
        match self.slots.get(id.index) {
            Some(Slot::Occupied(generation, node)) if *generation == id.generation => Some(node),
            _ => None,
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<V>> {
        match self.slots.get_mut(id.index) {
            Some(Slot::Occupied(generation, node)) if *generation == id.generation => Some(node),
            _ => None,
        }
    }

    /// Follow a link that the tree structure guarantees to be live
    fn link(&self, id: NodeId) -> &Node<V> {
        match self.node(id) {
            Some(node) => node,
            None => panic!("dangling tree link {:?}", id),
        }
    }

    fn link_mut(&mut self, id: NodeId) -> &mut Node<V> {
        match self.node_mut(id) {
            Some(node) => node,
            None => panic!("dangling tree link {:?}", id),
        }
    }

    /// Make the parent of `id` (if any) point at `replacement` instead, and
    /// give the replacement that parent. The links of `id` itself are untouched
    fn replace_in_parent(&mut self, id: NodeId, replacement: Option<NodeId>) {
        let parent = self.parent(id);
        if let Some(parent) = parent {
            let parent = self.link_mut(parent);
            if parent.left == Some(id) {
                parent.left = replacement;
            } else {
                assert_eq!(parent.right, Some(id));
                parent.right = replacement;
            }
        }
        if let Some(replacement) = replacement {
            self.link_mut(replacement).parent = parent;
        }
    }

    /// Free the slot of `id`, handing back the node it held. Links pointing at
    /// it must already be fixed (or about to be) by the caller
    fn release(&mut self, id: NodeId) -> Node<V> {
        assert!(self.contains(id), "releasing dead node {:?}", id);
        let slot = mem::replace(&mut self.slots[id.index], Slot::Vacant(self.free_head));
        self.free_head = Some(id.index);
        self.len -= 1;
        match slot {
            Slot::Occupied(_, node) => node,
            Slot::Vacant(_) => unreachable!(),
        }
    }
}

impl<V: Keyed> Nodes<V> {
    /// Insert `value` in the subtree rooted at `at`. Keys greater than or equal
    /// to a node's key go to its right, so equal keys keep insertion order.
    /// No rebalancing is done: sorted input degenerates into a linked list
    pub(super) fn insert(&mut self, at: NodeId, value: V) -> NodeId {
        let mut current = at;
        loop {
            let node = self.link(current);
            let go_right = value.key() >= node.value.key();
            let next = if go_right { node.right } else { node.left };
            match next {
                Some(child) => current = child,
                None => {
                    let new_node = self.alloc(value, Some(current));
                    let parent = self.link_mut(current);
                    if go_right {
                        parent.right = Some(new_node);
                    } else {
                        parent.left = Some(new_node);
                    }
                    return new_node;
                }
            }
        }
    }

    /// Find a node with the given key in the subtree rooted at `from`
    pub(super) fn find(&self, from: NodeId, key: &V::Key) -> Option<NodeId> {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = self.link(id);
            current = match key.cmp(node.value.key()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }
}
