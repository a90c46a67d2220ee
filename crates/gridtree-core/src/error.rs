use crate::Px;

/// Failures reported by fallible [`Tree`](crate::Tree) mutations.
///
/// Navigation past either end of a child sequence is not an error; those
/// queries return `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("the default item height can only be set on the root node")]
    NotRoot,
    #[error("node does not exist in this tree (disposed or never created)")]
    UnknownNode,
    #[error("slot {index} is out of range for {len} declared children")]
    SlotOutOfRange { index: usize, len: usize },
    #[error("the root node has no parent")]
    RootHasNoParent,
    #[error("node is not a child of the given parent")]
    NotAChild,
    #[error("row height must be positive, got {0}")]
    InvalidRowHeight(Px),
}
