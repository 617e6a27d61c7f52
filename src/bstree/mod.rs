mod node;
mod tree;
mod tree_iter;

pub use tree::BSTree;
pub use tree_iter::{IntoIter, Iter};

/// Handle to a node slot inside a tree's arena.
/// Generations are never reused, so a handle kept across an erase can be told
/// apart from the node that later reuses the slot
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u64,
}

/// A position inside a `BSTree` (or one of its adapters), playing the role of
/// a bidirectional iterator that does not borrow the tree.
///
/// Positions are moved with `next`/`prev` on the owning container and
/// dereferenced with `get`. `End` is the one-past-the-last sentinel: stepping
/// back from it reaches the last element, and it can never be dereferenced
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Position {
    Node(NodeId),
    End,
}

impl Position {
    /// Return whether this is the end sentinel
    pub fn is_end(&self) -> bool {
        match self {
            Position::End => true,
            Position::Node(_) => false,
        }
    }

    fn from_node(node: Option<NodeId>) -> Self {
        node.map_or(Position::End, Position::Node)
    }
}
