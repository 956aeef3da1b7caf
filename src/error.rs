//! Error types for graph access and reverse-mode construction.

use thiserror::Error;

/// Result type alias using [`GraphError`].
pub type Result<T> = std::result::Result<T, GraphError>;

/// Misuse of a [`Graph`](crate::Graph) handle or index.
///
/// Every variant is a programmer error; nothing here is transient and no
/// operation retries. Floating-point domain problems (division by zero,
/// logarithm of a non-positive value) are not errors: they surface as
/// infinity or NaN in values and gradients.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// Index outside the graph's current bounds.
    #[error("node index {index} out of range for graph with {len} nodes")]
    InvalidIndex {
        /// The offending index.
        index: usize,
        /// Number of nodes in the graph.
        len: usize,
    },

    /// Handle that was never attached to this graph.
    #[error("node {index} is not attached to this graph")]
    ForeignNode {
        /// Index carried by the foreign handle.
        index: usize,
    },

    /// Position past the end of a node's `in` or `out` list.
    #[error("edge slot {slot} out of range for a list of {arity} edges")]
    OperandOutOfRange {
        /// Requested position.
        slot: usize,
        /// Length of the list.
        arity: usize,
    },

    /// Edge into a leaf. Leaves have no operands.
    #[error("node {index} is a leaf and cannot consume another node")]
    LeafConsumer {
        /// Index of the leaf.
        index: usize,
    },

    /// Edge whose producer does not precede its consumer in the arena.
    ///
    /// Operands are always created before their result, so such an edge
    /// would close a cycle or point forward in time.
    #[error("edge {producer} -> {consumer} does not run from an earlier node to a later one")]
    CyclicEdge {
        /// Index of the producer.
        producer: usize,
        /// Index of the consumer.
        consumer: usize,
    },
}
