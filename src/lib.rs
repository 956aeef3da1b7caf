//! Scalar automatic differentiation.
//!
//! Two independent engines:
//!
//! - **Forward mode**: [`Dual`] carries `(x, dx)` through each operation; no
//!   graph, no shared state.
//! - **Reverse mode**: [`Graph`] records every operation as a node with
//!   incoming and outgoing edges, evaluating values eagerly, then
//!   [`Graph::backward`] walks the recorded edges from an output node to
//!   accumulate gradients by the chain rule.
//!
//! ```
//! use adgraph::Graph64;
//!
//! let mut g = Graph64::new();
//! let x1 = g.leaf(2.0);
//! let x2 = g.leaf(5.0);
//! let a = g.ln(x1).unwrap();
//! let b = g.mul(x1, x2).unwrap();
//! let c = g.sin(x2).unwrap();
//! let ab = g.add(a, b).unwrap();
//! let f = g.sub(ab, c).unwrap();
//! g.backward(f).unwrap();
//!
//! assert!((g.grad(x1).unwrap() - (0.5 + 5.0)).abs() < 1e-12);
//! assert!((g.grad(x2).unwrap() - (2.0 - 5.0_f64.cos())).abs() < 1e-12);
//! ```

pub mod api;
pub mod config;
pub mod dual;
pub mod error;
pub mod float;
pub mod graph;
pub mod node;
pub mod opcode;
pub mod reverse;
mod traits;

pub use api::{derivative, grad, grad_with, jvp};
pub use config::{GraphConfig, SweepOrder};
pub use dual::Dual;
pub use error::{GraphError, Result};
pub use float::Float;
pub use graph::Graph;
pub use node::{Node, NodeId};
pub use opcode::OpCode;

/// Type alias for forward-mode dual numbers over `f64`.
pub type Dual64 = Dual<f64>;
/// Type alias for forward-mode dual numbers over `f32`.
pub type Dual32 = Dual<f32>;
/// Type alias for reverse-mode graphs over `f64`.
pub type Graph64 = Graph<f64>;
/// Type alias for reverse-mode graphs over `f32`.
pub type Graph32 = Graph<f32>;
