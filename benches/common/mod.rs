#![allow(dead_code)]

use adgraph::{Dual, Graph64, NodeId};

pub fn make_input(n: usize) -> Vec<f64> {
    (0..n).map(|i| 0.5 + 0.01 * i as f64).collect()
}

// ─── Rosenbrock ────────────────────────────────────────────────────────────

pub fn rosenbrock_f64(x: &[f64]) -> f64 {
    let mut sum = 0.0;
    for i in 0..x.len() - 1 {
        let t1 = 1.0 - x[i];
        let t2 = x[i + 1] - x[i] * x[i];
        sum += t1 * t1 + 100.0 * t2 * t2;
    }
    sum
}

pub fn rosenbrock_dual(x: &[Dual<f64>]) -> Dual<f64> {
    let mut sum = Dual::constant(0.0);
    for i in 0..x.len() - 1 {
        let t1 = 1.0 - x[i];
        let t2 = x[i + 1] - x[i] * x[i];
        sum = sum + t1 * t1 + 100.0 * t2 * t2;
    }
    sum
}

pub fn rosenbrock_graph(g: &mut Graph64, x: &[NodeId]) -> adgraph::Result<NodeId> {
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

// ─── Transcendental chain ──────────────────────────────────────────────────
// f(x) = Σ sin(ln(x_i)) · cos(x_i)

pub fn trig_chain_f64(x: &[f64]) -> f64 {
    x.iter().map(|&xi| xi.ln().sin() * xi.cos()).sum()
}

pub fn trig_chain_graph(g: &mut Graph64, x: &[NodeId]) -> adgraph::Result<NodeId> {
    let mut sum = g.leaf(0.0);
    for &xi in x {
        let l = g.ln(xi)?;
        let s = g.sin(l)?;
        let c = g.cos(xi)?;
        let t = g.mul(s, c)?;
        sum = g.add(sum, t)?;
    }
    Ok(sum)
}

// ─── Finite differences ────────────────────────────────────────────────────

pub fn finite_diff_gradient(f: fn(&[f64]) -> f64, x: &[f64], h: f64) -> Vec<f64> {
    let n = x.len();
    let mut grad = vec![0.0; n];
    for i in 0..n {
        let mut xp = x.to_vec();
        let mut xm = x.to_vec();
        xp[i] += h;
        xm[i] -= h;
        grad[i] = (f(&xp) - f(&xm)) / (2.0 * h);
    }
    grad
}
