use adgraph::{derivative, grad, grad_with, jvp, Dual, Graph64, GraphConfig, NodeId, SweepOrder};
use approx::assert_relative_eq;

/// Rosenbrock recorded node by node: Σ (1-x_i)² + 100 (x_{i+1} - x_i²)²
fn rosenbrock(g: &mut Graph64, x: &[NodeId]) -> adgraph::Result<NodeId> {
    let one = g.leaf(1.0);
    let hundred = g.leaf(100.0);
    let mut sum = g.leaf(0.0);
    for i in 0..x.len() - 1 {
        let t1 = g.sub(one, x[i])?;
        let sq = g.mul(x[i], x[i])?;
        let t2 = g.sub(x[i + 1], sq)?;
        let a = g.mul(t1, t1)?;
        let b = g.mul(t2, t2)?;
        let b = g.mul(hundred, b)?;
        let term = g.add(a, b)?;
        sum = g.add(sum, term)?;
    }
    Ok(sum)
}

fn rosenbrock_dual(x: &[Dual<f64>]) -> Dual<f64> {
    let mut sum = Dual::constant(0.0);
    for i in 0..x.len() - 1 {
        let t1 = 1.0 - x[i];
        let t2 = x[i + 1] - x[i] * x[i];
        sum = sum + t1 * t1 + 100.0 * t2 * t2;
    }
    sum
}

// ── grad ──

#[test]
fn grad_x_squared() {
    let g = grad(|g, x| g.mul(x[0], x[0]), &[3.0_f64]).unwrap();
    assert_relative_eq!(g[0], 6.0, max_relative = 1e-12);
}

#[test]
fn grad_rosenbrock_2d() {
    // df/dx = -2(1-x) - 400x(y-x²), df/dy = 200(y-x²)
    let x = [1.5_f64, 2.0];
    let g = grad(rosenbrock, &x).unwrap();
    let expected_dx = -2.0 * (1.0 - x[0]) - 400.0 * x[0] * (x[1] - x[0] * x[0]);
    let expected_dy = 200.0 * (x[1] - x[0] * x[0]);
    assert_relative_eq!(g[0], expected_dx, max_relative = 1e-10);
    assert_relative_eq!(g[1], expected_dy, max_relative = 1e-10);
}

#[test]
fn grad_rosenbrock_at_minimum() {
    let x = vec![1.0_f64; 10];
    let g = grad(rosenbrock, &x).unwrap();
    for gi in &g {
        assert!(gi.abs() < 1e-12, "gradient at minimum should be zero, got {}", gi);
    }
}

#[test]
fn grad_matches_forward_mode() {
    // Rosenbrock shares only leaves, and `mul(t, t)` keeps a single edge,
    // so both sweep orders are exact.
    let x = [0.3_f64, -1.2, 0.7, 2.1];
    for sweep in [SweepOrder::Topological, SweepOrder::Recursive] {
        let g = grad_with(GraphConfig::default().with_sweep(sweep), rosenbrock, &x).unwrap();
        for i in 0..x.len() {
            let e: Vec<f64> = (0..x.len()).map(|k| if k == i { 1.0 } else { 0.0 }).collect();
            let (_, d) = jvp(rosenbrock_dual, &x, &e);
            assert_relative_eq!(g[i], d, max_relative = 1e-10);
        }
    }
}

#[test]
fn grad_with_recursive_sweep_on_tree() {
    // No shared derived nodes: both orders agree.
    let cfg = GraphConfig::default().with_sweep(SweepOrder::Recursive);
    let g = grad_with(
        cfg,
        |g, x| {
            let a = g.ln(x[0])?;
            let b = g.mul(x[0], x[1])?;
            let c = g.sin(x[1])?;
            let ab = g.add(a, b)?;
            g.sub(ab, c)
        },
        &[2.0_f64, 5.0],
    )
    .unwrap();
    assert_relative_eq!(g[0], 5.5, max_relative = 1e-12);
    assert_relative_eq!(g[1], 2.0 - 5.0_f64.cos(), max_relative = 1e-12);
}

#[test]
fn grad_propagates_closure_errors() {
    let mut other = Graph64::new();
    let foreign = other.leaf(1.0);
    let result = grad(|g, x| g.add(x[0], foreign), &[1.0_f64]);
    assert!(result.is_err());
}

#[test]
fn grad_of_input_itself() {
    let g = grad(|_, x| Ok(x[1]), &[1.0_f64, 2.0, 3.0]).unwrap();
    assert_eq!(g, vec![0.0, 1.0, 0.0]);
}

// ── derivative / jvp ──

#[test]
fn derivative_of_cos() {
    let (v, d) = derivative(|x| x.cos(), 0.4_f64);
    assert_relative_eq!(v, 0.4_f64.cos());
    assert_relative_eq!(d, -0.4_f64.sin());
}

#[test]
fn jvp_directional() {
    // f(x, y) = x*y, ∇f = (y, x), v = (1, 2) → y + 2x
    let (v, d) = jvp(|x| x[0] * x[1], &[3.0_f64, 4.0], &[1.0, 2.0]);
    assert_relative_eq!(v, 12.0);
    assert_relative_eq!(d, 4.0 + 6.0);
}

#[test]
#[should_panic(expected = "same length")]
fn jvp_length_mismatch() {
    jvp(|x| x[0], &[1.0_f64, 2.0], &[1.0]);
}
