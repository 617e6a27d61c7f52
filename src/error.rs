use std::collections::TryReserveError;

/// Errors reported by the containers of this crate.
/// All of them are recoverable: the container is left exactly as it was before the call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Indexed access or insertion/removal at a position outside the valid range
    #[error("position {pos} is out of range for length {len}")]
    OutOfRange { pos: usize, len: usize },
    /// Removal or access of the first/last element of an empty container
    #[error("container is empty")]
    Empty,
    /// The end position does not point at any element
    #[error("the end position cannot be dereferenced or erased")]
    EndPosition,
    /// The position names a node that was already removed from the tree
    #[error("position does not point at a live element")]
    StalePosition,
    /// Strict lookup of a key that is not present
    #[error("container does not have an element with the specified key")]
    KeyNotFound,
    /// The allocator could not provide the requested buffer
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
