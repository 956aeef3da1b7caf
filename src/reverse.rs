//! Reverse-mode engine: node-constructing operations and the backward sweep.
//!
//! Each operation appends one derived node, wires its operand edges (slot 0
//! first, then slot 1) and evaluates its value immediately, so the graph never
//! holds an unevaluated node. [`Graph::backward`] seeds the output's gradient
//! with 1 and distributes it to the ancestors by the chain rule.

use crate::config::SweepOrder;
use crate::error::Result;
use crate::node::{Node, NodeId};
use crate::opcode::{self, OpCode, UNUSED};
use crate::{Float, Graph};

impl<F: Float> Graph<F> {
    /// Create an independent variable holding `value`.
    #[inline]
    pub fn leaf(&mut self, value: F) -> NodeId {
        self.push(Node::leaf(value))
    }

    #[inline]
    pub fn add(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId> {
        self.push_binary(OpCode::Add, lhs, rhs)
    }

    #[inline]
    pub fn sub(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId> {
        self.push_binary(OpCode::Sub, lhs, rhs)
    }

    #[inline]
    pub fn mul(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId> {
        self.push_binary(OpCode::Mul, lhs, rhs)
    }

    /// `lhs / rhs`. A zero divisor yields an infinite (or NaN) value.
    #[inline]
    pub fn div(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId> {
        self.push_binary(OpCode::Div, lhs, rhs)
    }

    #[inline]
    pub fn sin(&mut self, operand: NodeId) -> Result<NodeId> {
        self.push_unary(OpCode::Sin, operand)
    }

    #[inline]
    pub fn cos(&mut self, operand: NodeId) -> Result<NodeId> {
        self.push_unary(OpCode::Cos, operand)
    }

    /// Natural logarithm. A non-positive operand yields `-inf` or NaN.
    #[inline]
    pub fn ln(&mut self, operand: NodeId) -> Result<NodeId> {
        self.push_unary(OpCode::Ln, operand)
    }

    /// Forward value of a node.
    #[inline]
    pub fn value(&self, id: NodeId) -> Result<F> {
        self.node(id).map(Node::value)
    }

    /// Accumulated gradient of a node.
    #[inline]
    pub fn grad(&self, id: NodeId) -> Result<F> {
        self.node(id).map(Node::grad)
    }

    fn push_binary(&mut self, op: OpCode, lhs: NodeId, rhs: NodeId) -> Result<NodeId> {
        // Resolve both operands before touching the arena so a foreign
        // handle leaves the graph unchanged.
        let a = self.resolve(lhs)?;
        let b = self.resolve(rhs)?;
        let id = self.push(Node::derived(op, [a, b]));
        self.connect(lhs, id)?;
        self.connect(rhs, id)?;
        self.evaluate(id.index);
        Ok(id)
    }

    fn push_unary(&mut self, op: OpCode, operand: NodeId) -> Result<NodeId> {
        let a = self.resolve(operand)?;
        let id = self.push(Node::derived(op, [a, UNUSED]));
        self.connect(operand, id)?;
        self.evaluate(id.index);
        Ok(id)
    }

    /// Compute a derived node's value from its (already evaluated) operands.
    fn evaluate(&mut self, index: usize) {
        let (a, b) = self.operand_values(index);
        let node = &mut self.entries[index].node;
        node.value = opcode::eval_forward(node.op, a, b);
    }

    fn operand_values(&self, index: usize) -> (F, F) {
        let [a, b] = self.entries[index].node.args;
        let value_of = |i: usize| {
            if i == UNUSED {
                F::zero()
            } else {
                self.entries[i].node.value
            }
        };
        (value_of(a), value_of(b))
    }

    /// Distribute `index`'s accumulated gradient to its operands.
    fn apply_rule(&mut self, index: usize) {
        let node = &self.entries[index].node;
        if node.is_leaf() {
            return;
        }
        let (op, g, [a, b]) = (node.op, node.grad, node.args);
        let (va, vb) = self.operand_values(index);
        let (da, db) = opcode::reverse_partials(op, va, vb);
        log::trace!("backward: {op} at {index} distributes {g}");

        let pa = &mut self.entries[a].node;
        pa.grad = pa.grad + g * da;
        if b != UNUSED {
            let pb = &mut self.entries[b].node;
            pb.grad = pb.grad + g * db;
        }
    }

    /// Run the backward sweep from `output` using the configured
    /// [`SweepOrder`].
    ///
    /// Seeds `output`'s gradient with 1 and accumulates (`+=`) into every
    /// ancestor. Gradients from earlier sweeps are not cleared, and an
    /// intermediate node passes on its whole accumulated gradient, leftovers
    /// included. Sweeping `sin(x) * y` twice therefore leaves `3 y cos x` on
    /// `x`, not `2 y cos x`. Call [`zero_grad`](Self::zero_grad) first to
    /// start from scratch.
    pub fn backward(&mut self, output: NodeId) -> Result<()> {
        let sweep = self.config.sweep;
        self.backward_with(output, sweep)
    }

    /// Run the backward sweep from `output` with an explicit order.
    pub fn backward_with(&mut self, output: NodeId, sweep: SweepOrder) -> Result<()> {
        let out = self.resolve(output)?;
        self.entries[out].node.grad = F::one();

        let visits = match sweep {
            SweepOrder::Topological => self.sweep_topological(out),
            SweepOrder::Recursive => self.sweep_recursive(out),
        };
        log::debug!(
            "backward ({sweep:?}) from node {out} over {} nodes: {visits} visits",
            self.entries.len()
        );
        Ok(())
    }

    /// Visit-once sweep in reverse arena order.
    ///
    /// Operands always precede their result in the arena, so descending index
    /// order visits a node only after every consumer above it has run.
    fn sweep_topological(&mut self, out: usize) -> usize {
        let mut reachable = vec![false; out + 1];
        reachable[out] = true;
        let mut visits = 0;
        for i in (0..=out).rev() {
            if !reachable[i] {
                continue;
            }
            for &p in self.entries[i].node.operands() {
                debug_assert!(p < i, "operand {p} does not precede node {i}");
                reachable[p] = true;
            }
            self.apply_rule(i);
            visits += 1;
        }
        visits
    }

    /// Pre-order descent along every `in` edge, no visited set.
    ///
    /// Every `in` edge points to a lower index (enforced by
    /// [`connect`](Self::connect)), so the descent always terminates.
    fn sweep_recursive(&mut self, out: usize) -> usize {
        let mut stack = vec![out];
        let mut visits = 0;
        while let Some(i) = stack.pop() {
            self.apply_rule(i);
            visits += 1;
            stack.extend(self.entries[i].inputs.iter().rev().copied());
        }
        visits
    }
}
