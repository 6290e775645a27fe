//! Degree-distribution statistics.
//!
//! `geo_out` / `geo_in` bucket the degrees into a histogram (index = degree, from 0 up to
//! the maximum degree) and take the weighted sum \(\sum_d e^{-d}\,\mathrm{count}(d)\).
//! Bucketing needs non-negative integer degrees; weighted matrices whose row or column
//! sums are fractional are rejected rather than truncated.

use crate::graph::{ensure_finite, validate, Adjacency};
use crate::{Error, Result};

/// Largest degree a histogram will allocate a bucket for.
pub const MAX_HISTOGRAM_DEGREE: usize = 1 << 24;

fn histogram(degrees: &[f64], direction: &str) -> Result<Vec<f64>> {
    let mut buckets = Vec::with_capacity(degrees.len());
    for (node, &d) in degrees.iter().enumerate() {
        if d.fract() != 0.0 {
            return Err(Error::InvalidInput(format!(
                "{direction}-degree of node {node} is {d}; degree histograms need integer degrees"
            )));
        }
        if d > MAX_HISTOGRAM_DEGREE as f64 {
            return Err(Error::NumericOverflow(format!(
                "{direction}-degree of node {node} is {d}, above the histogram limit {MAX_HISTOGRAM_DEGREE}"
            )));
        }
        buckets.push(d as usize);
    }
    let max = buckets.iter().copied().max().unwrap_or(0);
    let mut dist = vec![0.0; max + 1];
    for b in buckets {
        dist[b] += 1.0;
    }
    Ok(dist)
}

fn geometric_sum(dist: &[f64]) -> f64 {
    dist.iter()
        .enumerate()
        .map(|(d, &count)| (-(d as f64)).exp() * count)
        .sum()
}

/// Number of nodes with each out-degree: `dist[d]` nodes have out-degree `d`.
pub fn out_degree_distribution<G: Adjacency + ?Sized>(graph: &G) -> Result<Vec<f64>> {
    let view = validate(graph)?;
    histogram(&view.out_degrees(), "out")
}

/// Number of nodes with each in-degree: `dist[d]` nodes have in-degree `d`.
pub fn in_degree_distribution<G: Adjacency + ?Sized>(graph: &G) -> Result<Vec<f64>> {
    let view = validate(graph)?;
    histogram(&view.in_degrees(), "in")
}

/// \(\sum_d e^{-d}\) times the number of nodes with out-degree `d`.
pub fn geo_out<G: Adjacency + ?Sized>(graph: &G) -> Result<f64> {
    let dist = out_degree_distribution(graph)?;
    ensure_finite("geo_out", geometric_sum(&dist))
}

/// \(\sum_d e^{-d}\) times the number of nodes with in-degree `d`.
pub fn geo_in<G: Adjacency + ?Sized>(graph: &G) -> Result<f64> {
    let dist = in_degree_distribution(graph)?;
    ensure_finite("geo_in", geometric_sum(&dist))
}
