use std::fmt::{self, Display};

use crate::opcode::{OpCode, UNUSED};
use crate::Float;

/// Handle to a node inside a particular [`Graph`](crate::Graph).
///
/// `Copy`: just the owning graph's tag and the arena index. Handles are only
/// minted by a graph on insertion, so a handle always refers to an attached
/// node; passing it to a different graph is rejected with
/// [`GraphError::ForeignNode`](crate::GraphError::ForeignNode).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) graph: u32,
    pub(crate) index: usize,
}

impl NodeId {
    /// Position of the node in its graph's arena.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// One scalar vertex of the computation graph.
///
/// Holds the forward value, the accumulated gradient, the op that produced it
/// and that op's operand indices in order. A node built with
/// [`Node::leaf`] is unattached (no index) until a graph inserts it.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<F: Float> {
    pub(crate) id: Option<NodeId>,
    pub(crate) value: F,
    pub(crate) grad: F,
    pub(crate) op: OpCode,
    /// Operand indices; repeats are kept (`x + x` stores `[x, x]`).
    pub(crate) args: [usize; 2],
}

impl<F: Float> Node<F> {
    /// Create an unattached leaf holding `value`.
    #[inline]
    pub fn leaf(value: F) -> Self {
        Node {
            id: None,
            value,
            grad: F::zero(),
            op: OpCode::Leaf,
            args: [UNUSED, UNUSED],
        }
    }

    /// Create an unattached, not-yet-evaluated derived node.
    #[inline]
    pub(crate) fn derived(op: OpCode, args: [usize; 2]) -> Self {
        Node {
            id: None,
            value: F::zero(),
            grad: F::zero(),
            op,
            args,
        }
    }

    /// Arena index, or `None` before insertion.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.id.map(|id| id.index)
    }

    /// Handle for this node, or `None` before insertion.
    #[inline]
    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    #[inline]
    pub fn value(&self) -> F {
        self.value
    }

    #[inline]
    pub fn grad(&self) -> F {
        self.grad
    }

    #[inline]
    pub fn op(&self) -> OpCode {
        self.op
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.op == OpCode::Leaf
    }

    /// Operand indices in operand order (empty for leaves).
    #[inline]
    pub fn operands(&self) -> &[usize] {
        &self.args[..self.op.arity()]
    }
}

impl<F: Float> Display for Node<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index() {
            Some(i) => write!(f, "(index: {i}")?,
            None => f.write_str("(index: -1")?,
        }
        write!(
            f,
            " value: {} grad: {} op: {})",
            self.value, self.grad, self.op
        )
    }
}
