//! Alternating k-triangle and k-path statistics.
//!
//! Both are built on the number of shared two-paths between an ordered pair:
//! \[
//!   tp(i, j) = \sum_{k \ne i,\, k \ne j} A_{ik} A_{kj}
//! \]
//! and weight each pair by \(2 (1 - \delta^{tp})\), so every additional shared partner adds
//! geometrically less than the previous one. The standard statistics use \(\delta = 0.5\).

use crate::graph::{ensure_finite, validate, Adjacency, SquareView};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlternatingConfig {
    /// Geometric decay applied per shared two-path.
    pub decay: f64,
}

impl Default for AlternatingConfig {
    fn default() -> Self {
        Self { decay: 0.5 }
    }
}

impl AlternatingConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.decay.is_finite() {
            return Err(Error::InvalidParameter("decay must be finite".to_string()));
        }
        if self.decay <= 0.0 || self.decay >= 1.0 {
            return Err(Error::InvalidParameter(
                "decay must be in (0,1)".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    fn weight(&self, two_paths: f64) -> f64 {
        2.0 * (1.0 - self.decay.powf(two_paths))
    }
}

#[inline]
fn pair_two_paths<G: Adjacency + ?Sized>(view: &SquareView<'_, G>, i: usize, j: usize) -> f64 {
    let row_i = view.row(i);
    let mut tp = 0.0;
    for (k, &aik) in row_i.iter().enumerate() {
        if k == i || k == j || aik == 0.0 {
            continue;
        }
        tp += aik * view.get(k, j);
    }
    tp
}

/// Shared two-paths `i -> k -> j` between one ordered pair, `k` distinct from both.
pub fn shared_two_paths<G: Adjacency + ?Sized>(graph: &G, i: usize, j: usize) -> Result<f64> {
    let view = validate(graph)?;
    let n = view.node_count();
    if i >= n {
        return Err(Error::IndexOutOfBounds(i));
    }
    if j >= n {
        return Err(Error::IndexOutOfBounds(j));
    }
    Ok(pair_two_paths(&view, i, j))
}

/// \(\sum_{i,j} 2 A_{ij} (1 - 0.5^{tp(i,j)})\): only pairs joined by an edge contribute.
pub fn alternating_k_triangles<G: Adjacency + ?Sized>(graph: &G) -> Result<f64> {
    alternating_k_triangles_with(graph, AlternatingConfig::default())
}

pub fn alternating_k_triangles_with<G: Adjacency + ?Sized>(
    graph: &G,
    config: AlternatingConfig,
) -> Result<f64> {
    config.validate()?;
    let view = validate(graph)?;
    let n = view.node_count();
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            let aij = view.get(i, j);
            if aij == 0.0 {
                continue;
            }
            sum += aij * config.weight(pair_two_paths(&view, i, j));
        }
    }
    ensure_finite("alternating_k_triangles", sum)
}

/// \(\sum_{i,j} 2 (1 - 0.5^{tp(i,j)})\) over every ordered pair, edge or not.
pub fn alternating_k_paths<G: Adjacency + ?Sized>(graph: &G) -> Result<f64> {
    alternating_k_paths_with(graph, AlternatingConfig::default())
}

pub fn alternating_k_paths_with<G: Adjacency + ?Sized>(
    graph: &G,
    config: AlternatingConfig,
) -> Result<f64> {
    config.validate()?;
    let view = validate(graph)?;
    let n = view.node_count();
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            sum += config.weight(pair_two_paths(&view, i, j));
        }
    }
    ensure_finite("alternating_k_paths", sum)
}
