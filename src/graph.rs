//! Append-only computation graph for reverse-mode AD.
//!
//! Every node lives in one arena entry together with two adjacency lists:
//! `outputs` (nodes it feeds into) and `inputs` (nodes feeding into it). Nodes
//! are never removed, so indices stay valid for the lifetime of the graph and
//! the whole arena is released at once when the graph is dropped. The
//! reverse-mode operations are implemented on [`Graph`] in [`crate::reverse`].

use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::node::{Node, NodeId};
use crate::Float;

static NEXT_GRAPH_TAG: AtomicU32 = AtomicU32::new(0);

/// One arena slot: the node and its adjacency lists.
#[derive(Clone, Debug)]
pub(crate) struct Entry<F: Float> {
    pub(crate) node: Node<F>,
    pub(crate) outputs: Vec<usize>,
    pub(crate) inputs: Vec<usize>,
}

/// Owned, append-only directed graph of scalar nodes.
///
/// Create one per independent expression (or per test) and pass it to every
/// node-constructing operation.
///
/// ```
/// use adgraph::Graph;
///
/// let mut g = Graph::<f64>::new();
/// let x = g.leaf(3.0);
/// let y = g.mul(x, x).unwrap();
/// g.backward(y).unwrap();
/// assert_eq!(g.value(y).unwrap(), 9.0);
/// assert_eq!(g.grad(x).unwrap(), 6.0);
/// ```
#[derive(Debug)]
pub struct Graph<F: Float = f64> {
    tag: u32,
    pub(crate) entries: Vec<Entry<F>>,
    num_edges: usize,
    pub(crate) config: GraphConfig,
}

impl<F: Float> Default for Graph<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> Graph<F> {
    /// Create an empty graph with the default configuration.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create an empty graph with the given configuration.
    pub fn with_config(config: GraphConfig) -> Self {
        let tag = NEXT_GRAPH_TAG.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "graph {tag}: created (sweep {:?}, capacity {})",
            config.sweep,
            config.capacity
        );
        Graph {
            tag,
            entries: Vec::with_capacity(config.capacity),
            num_edges: 0,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Check that `id` was minted by this graph and return its arena index.
    #[inline]
    pub(crate) fn resolve(&self, id: NodeId) -> Result<usize> {
        if id.graph != self.tag {
            return Err(GraphError::ForeignNode { index: id.index });
        }
        self.check_index(id.index)?;
        Ok(id.index)
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(GraphError::InvalidIndex {
                index,
                len: self.entries.len(),
            })
        }
    }

    /// Insert `node`, returning its handle.
    ///
    /// A node that is already attached to this graph (e.g. a clone obtained
    /// from [`node_at`](Self::node_at)) is not duplicated: its existing handle
    /// is returned. An unattached node is appended with empty adjacency lists.
    pub fn insert(&mut self, node: Node<F>) -> Result<NodeId> {
        if let Some(id) = node.id {
            self.resolve(id)?;
            return Ok(id);
        }
        Ok(self.push(node))
    }

    /// Append an unattached node with empty adjacency lists.
    pub(crate) fn push(&mut self, mut node: Node<F>) -> NodeId {
        debug_assert!(node.id.is_none());
        let id = NodeId {
            graph: self.tag,
            index: self.entries.len(),
        };
        node.id = Some(id);
        log::trace!("graph {}: insert {}", self.tag, node);
        self.entries.push(Entry {
            node,
            outputs: Vec::new(),
            inputs: Vec::new(),
        });
        id
    }

    /// Record the edge `producer → consumer`.
    ///
    /// Both endpoints must belong to this graph, the consumer must be a
    /// derived node and the producer must have been created before it. This
    /// keeps leaves without inputs and the graph acyclic. A duplicate edge is
    /// a no-op and does not count towards [`edge_count`](Self::edge_count).
    pub fn connect(&mut self, producer: NodeId, consumer: NodeId) -> Result<()> {
        let head = self.resolve(producer)?;
        let tail = self.resolve(consumer)?;
        if self.entries[tail].node.is_leaf() {
            return Err(GraphError::LeafConsumer { index: tail });
        }
        if head >= tail {
            return Err(GraphError::CyclicEdge {
                producer: head,
                consumer: tail,
            });
        }
        // The consumer's `in` list is short (one entry per operand), unlike a
        // widely shared producer's `out` list.
        if self.entries[tail].inputs.contains(&head) {
            return Ok(());
        }
        log::trace!("graph {}: edge {head} -> {tail}", self.tag);
        self.entries[head].outputs.push(tail);
        self.entries[tail].inputs.push(head);
        self.num_edges += 1;
        Ok(())
    }

    /// Node at `index`.
    pub fn node_at(&self, index: usize) -> Result<&Node<F>> {
        self.check_index(index)?;
        Ok(&self.entries[index].node)
    }

    /// Node behind a handle.
    pub fn node(&self, id: NodeId) -> Result<&Node<F>> {
        let index = self.resolve(id)?;
        Ok(&self.entries[index].node)
    }

    /// Indices of the nodes feeding into `index`, in operand order.
    pub fn parents_of(&self, index: usize) -> Result<&[usize]> {
        self.check_index(index)?;
        Ok(&self.entries[index].inputs)
    }

    /// Indices of the nodes `index` feeds into, in creation order.
    pub fn children_of(&self, index: usize) -> Result<&[usize]> {
        self.check_index(index)?;
        Ok(&self.entries[index].outputs)
    }

    /// The `slot`-th entry of `id`'s `in` list.
    pub fn parent(&self, id: NodeId, slot: usize) -> Result<&Node<F>> {
        let index = self.resolve(id)?;
        let inputs = &self.entries[index].inputs;
        let &p = inputs.get(slot).ok_or(GraphError::OperandOutOfRange {
            slot,
            arity: inputs.len(),
        })?;
        Ok(&self.entries[p].node)
    }

    /// The `slot`-th entry of `id`'s `out` list.
    pub fn child(&self, id: NodeId, slot: usize) -> Result<&Node<F>> {
        let index = self.resolve(id)?;
        let outputs = &self.entries[index].outputs;
        let &c = outputs.get(slot).ok_or(GraphError::OperandOutOfRange {
            slot,
            arity: outputs.len(),
        })?;
        Ok(&self.entries[c].node)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.num_edges
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<F>> + '_ {
        self.entries.iter().map(|e| &e.node)
    }

    /// Reset every node's gradient accumulator to zero.
    pub fn zero_grad(&mut self) {
        for entry in &mut self.entries {
            entry.node.grad = F::zero();
        }
    }
}

impl<F: Float> Display for Graph<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "adjacency table:")?;
        for entry in &self.entries {
            write!(f, "{}", entry.node)?;
            for &c in &entry.outputs {
                write!(f, " -> {}", self.entries[c].node)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "inverse adjacency table:")?;
        for entry in &self.entries {
            write!(f, "{}", entry.node)?;
            for &p in &entry.inputs {
                write!(f, " <- {}", self.entries[p].node)?;
            }
            writeln!(f)?;
        }
        write!(f, "len of graph: {}", self.entries.len())
    }
}
