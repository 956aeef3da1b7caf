//! Operation tags for graph nodes.
//!
//! Each tag names the elementary operation that produced a node. The
//! [`eval_forward`] and [`reverse_partials`] functions evaluate / differentiate
//! a single tag; they are the only place the value and gradient rules live.

use std::fmt;

use num_traits::Float;

/// Sentinel stored in the second operand slot of unary nodes (and both slots
/// of leaves).
pub const UNUSED: usize = usize::MAX;

/// Operation that produced a node from its operands.
///
/// Binary ops use both operand slots (slot 0 = left, slot 1 = right); unary
/// ops use slot 0 only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpCode {
    // ── Binary arithmetic ──
    Add,
    Sub,
    Mul,
    Div,

    // ── Unary ──
    Sin,
    Cos,
    /// Natural logarithm.
    Ln,

    /// Independent variable; no operands, no gradient rule.
    Leaf,
}

impl OpCode {
    /// Number of operand slots this op reads.
    #[inline]
    pub fn arity(self) -> usize {
        match self {
            OpCode::Add | OpCode::Sub | OpCode::Mul | OpCode::Div => 2,
            OpCode::Sin | OpCode::Cos | OpCode::Ln => 1,
            OpCode::Leaf => 0,
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpCode::Add => "add",
            OpCode::Sub => "sub",
            OpCode::Mul => "mul",
            OpCode::Div => "div",
            OpCode::Sin => "sin",
            OpCode::Cos => "cos",
            OpCode::Ln => "ln",
            OpCode::Leaf => "leaf",
        };
        f.write_str(name)
    }
}

/// Evaluate a single op in the forward direction.
///
/// For binary ops, `a` and `b` are the two operand values. For unary ops `a`
/// is the operand value and `b` is ignored. Domain errors follow IEEE-754:
/// `a / 0` is infinite (or NaN for `0 / 0`), `ln` of a negative value is NaN.
#[inline]
pub fn eval_forward<T: Float>(op: OpCode, a: T, b: T) -> T {
    match op {
        OpCode::Leaf => unreachable!("leaf values are set at creation"),

        OpCode::Add => a + b,
        OpCode::Sub => a - b,
        OpCode::Mul => a * b,
        OpCode::Div => a / b,

        OpCode::Sin => a.sin(),
        OpCode::Cos => a.cos(),
        OpCode::Ln => a.ln(),
    }
}

/// Compute reverse-mode partial derivatives for a single op.
///
/// Returns `(∂result/∂arg0, ∂result/∂arg1)`. For unary ops the second
/// partial is `T::zero()`; for leaves both are.
///
/// A node's contribution to operand `k` during a sweep is its accumulated
/// gradient times partial `k`.
#[inline]
pub fn reverse_partials<T: Float>(op: OpCode, a: T, b: T) -> (T, T) {
    let zero = T::zero();
    let one = T::one();
    match op {
        OpCode::Leaf => (zero, zero),

        OpCode::Add => (one, one),
        OpCode::Sub => (one, -one),
        OpCode::Mul => (b, a),
        OpCode::Div => (one / b, -a / (b * b)),

        OpCode::Sin => (a.cos(), zero),
        OpCode::Cos => (-a.sin(), zero),
        OpCode::Ln => (one / a, zero),
    }
}
