use super::node::Nodes;
use super::{BSTree, NodeId};

/// Sorted iterator over a `BSTree`, following parent links instead of keeping
/// a stack, so it can be walked from both ends
pub struct Iter<'a, V> {
    nodes: &'a Nodes<V>,
    /// Next node to return from the front
    head: Option<NodeId>,
    /// Next node to return from the back
    tail: Option<NodeId>,
    len: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(super) fn new(tree: &'a BSTree<V>) -> Self {
        Iter {
            nodes: &tree.nodes,
            head: tree.root.map(|root| tree.nodes.leftmost(root)),
            tail: tree.root.map(|root| tree.nodes.rightmost(root)),
            len: tree.len(),
        }
    }
}

impl<'a, V> Clone for Iter<'a, V> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let id = self.head?;
        self.len -= 1;
        self.head = self.nodes.successor(id);
        self.nodes.get(id).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, V> DoubleEndedIterator for Iter<'a, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let id = self.tail?;
        self.len -= 1;
        self.tail = self.nodes.predecessor(id);
        self.nodes.get(id).ok()
    }
}

impl<'a, V> ExactSizeIterator for Iter<'a, V> {}
impl<'a, V> std::iter::FusedIterator for Iter<'a, V> {}

/// Owning sorted iterator over the values of a consumed `BSTree`
pub struct IntoIter<V> {
    values: std::vec::IntoIter<V>,
}

impl<V> IntoIter<V> {
    pub(super) fn new(values: Vec<V>) -> Self {
        IntoIter {
            values: values.into_iter(),
        }
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    fn next_back(&mut self) -> Option<V> {
        self.values.next_back()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
impl<V> std::iter::FusedIterator for IntoIter<V> {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn iter() {
        fn check<T: crate::Keyed + Ord + Clone + std::fmt::Debug>(mut values: Vec<T>) {
            let tree: BSTree<T> = values.iter().cloned().collect();
            values.sort();
            let tree_collected = tree.iter().cloned().collect::<Vec<_>>();
            assert_eq!(values, tree_collected);

            values.reverse();
            let tree_collected = tree.iter().rev().cloned().collect::<Vec<_>>();
            assert_eq!(values, tree_collected);
        }

        check::<i32>(vec![]);
        check(vec![1]);
        check(vec![1, 2, 3, 1, 2, 3]);
        check((0..100).collect::<Vec<_>>());
        check((0..100).rev().collect::<Vec<_>>());

        // Pi
        check(vec![
            31, 41, 59, 26, 53, 58, 97, 93, 23, 84, 62, 64, 33, 83, 27, 95, 2, 88, 41, 97, 16, 93,
            99, 37, 51, 5, 82, 9, 74, 94, 45, 92, 30, 78, 16, 40, 62, 86, 20, 89, 98, 62, 80, 34,
            82, 53, 42, 11, 70, 67, 98, 21, 48, 8, 65, 13, 28, 23, 6, 64, 70, 93, 84, 46, 9, 55, 5,
            82, 23, 17, 25, 35, 94, 8, 12, 84, 81, 11, 74, 50, 28, 41, 2, 70, 19, 38, 52, 11, 5,
        ]);
    }

    #[test]
    fn meet_in_the_middle() {
        let tree: BSTree<i32> = vec![4, 2, 6, 1, 3, 5, 7].into_iter().collect();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 7);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&7));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&6));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.clone().collect::<Vec<_>>(), vec![&3, &4, &5]);
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn into_iter_both_ends() {
        let tree: BSTree<i32> = vec![2, 3, 1].into_iter().collect();
        let mut iter = tree.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), None);
    }
}
