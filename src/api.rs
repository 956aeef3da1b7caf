use crate::config::GraphConfig;
use crate::dual::Dual;
use crate::error::Result;
use crate::float::Float;
use crate::graph::Graph;
use crate::node::NodeId;

/// Compute the gradient of a scalar function `f : R^n → R` using reverse mode.
///
/// Builds a fresh graph, creates one leaf per entry of `x`, lets `f` record
/// the expression and sweeps backward from the node it returns.
///
/// ```
/// let g = adgraph::grad(|g, x| {
///     let xx = g.mul(x[0], x[0])?;
///     let yy = g.mul(x[1], x[1])?;
///     g.add(xx, yy)
/// }, &[3.0_f64, 4.0]).unwrap();
/// assert!((g[0] - 6.0).abs() < 1e-10);
/// assert!((g[1] - 8.0).abs() < 1e-10);
/// ```
pub fn grad<F: Float>(
    f: impl FnOnce(&mut Graph<F>, &[NodeId]) -> Result<NodeId>,
    x: &[F],
) -> Result<Vec<F>> {
    grad_with(GraphConfig::default(), f, x)
}

/// Like [`grad`], on a graph built with `config`.
pub fn grad_with<F: Float>(
    config: GraphConfig,
    f: impl FnOnce(&mut Graph<F>, &[NodeId]) -> Result<NodeId>,
    x: &[F],
) -> Result<Vec<F>> {
    let mut graph = Graph::with_config(config.with_capacity(config.capacity.max(x.len())));

    let inputs: Vec<NodeId> = x.iter().map(|&val| graph.leaf(val)).collect();
    let output = f(&mut graph, &inputs)?;
    graph.backward(output)?;

    inputs.iter().map(|&id| graph.grad(id)).collect()
}

/// Value and derivative of `f : R → R` in one forward-mode pass.
///
/// Returns `(f(x), f'(x))`.
pub fn derivative<F: Float>(f: impl FnOnce(Dual<F>) -> Dual<F>, x: F) -> (F, F) {
    let y = f(Dual::variable(x));
    (y.x, y.dx)
}

/// Directional derivative of `f : R^n → R` (forward mode): `(f(x), ∇f·v)`.
pub fn jvp<F: Float>(f: impl FnOnce(&[Dual<F>]) -> Dual<F>, x: &[F], v: &[F]) -> (F, F) {
    assert_eq!(x.len(), v.len(), "x and v must have the same length");
    let inputs: Vec<Dual<F>> = x
        .iter()
        .zip(v.iter())
        .map(|(&xi, &vi)| Dual::new(xi, vi))
        .collect();
    let y = f(&inputs);
    (y.x, y.dx)
}
