//! Edge, reciprocity and two-star counts.
//!
//! These are the \(O(n^2)\) aggregate statistics. All of them are well defined for
//! non-negative real weights, not just 0/1 entries.

use crate::graph::{ensure_finite, validate, Adjacency};
use crate::Result;

/// Generalized binomial coefficient \(\binom{x}{k}\) for real `x`.
///
/// Evaluates \(\Gamma(x+1) / (\Gamma(k+1)\,\Gamma(x-k+1))\) as the falling factorial
/// \(x(x-1)\cdots(x-k+1)/k!\), which is the same function for integer `k`.
/// Returns 0 when `x < k` or `x < 0`, so a node with in-degree 1.5 has no two-in-stars.
pub fn binomial(x: f64, k: u32) -> f64 {
    if x < 0.0 || x < f64::from(k) {
        return 0.0;
    }
    let mut acc = 1.0;
    for i in 0..k {
        acc *= (x - f64::from(i)) / f64::from(i + 1);
    }
    acc
}

/// Total edge weight: the sum of every entry.
pub fn n_edges<G: Adjacency + ?Sized>(graph: &G) -> Result<f64> {
    let view = validate(graph)?;
    let total: f64 = (0..view.node_count())
        .map(|i| view.row(i).iter().sum::<f64>())
        .sum();
    ensure_finite("n_edges", total)
}

/// Reciprocated weight \(\sum_{i,j} A_{ij} A_{ji}\).
///
/// Every reciprocated pair is counted twice, once as `(i, j)` and once as `(j, i)`.
pub fn n_mutual<G: Adjacency + ?Sized>(graph: &G) -> Result<f64> {
    let view = validate(graph)?;
    let n = view.node_count();
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            sum += view.get(i, j) * view.get(j, i);
        }
    }
    ensure_finite("n_mutual", sum)
}

/// \(\sum_i \binom{d^{in}_i}{2}\).
pub fn two_in_stars<G: Adjacency + ?Sized>(graph: &G) -> Result<f64> {
    let view = validate(graph)?;
    let sum: f64 = view.in_degrees().into_iter().map(|d| binomial(d, 2)).sum();
    ensure_finite("two_in_stars", sum)
}

/// \(\sum_i \binom{d^{out}_i}{2}\).
pub fn two_out_stars<G: Adjacency + ?Sized>(graph: &G) -> Result<f64> {
    let view = validate(graph)?;
    let sum: f64 = view.out_degrees().into_iter().map(|d| binomial(d, 2)).sum();
    ensure_finite("two_out_stars", sum)
}

/// \(\sum_i d^{in}_i \, d^{out}_i\).
pub fn two_mixed_stars<G: Adjacency + ?Sized>(graph: &G) -> Result<f64> {
    let view = validate(graph)?;
    let sum: f64 = view
        .in_degrees()
        .iter()
        .zip(view.out_degrees().iter())
        .map(|(din, dout)| din * dout)
        .sum();
    ensure_finite("two_mixed_stars", sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AdjacencyMatrix, DenseMatrix};
    use crate::Error;
    use proptest::prelude::*;

    fn complete(n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
            .collect()
    }

    #[test]
    fn binomial_matches_closed_form_for_integers() {
        for d in 0..10u32 {
            let d = f64::from(d);
            let expected = if d >= 2.0 { d * (d - 1.0) / 2.0 } else { 0.0 };
            assert_eq!(binomial(d, 2), expected);
        }
        assert_eq!(binomial(5.0, 0), 1.0);
        assert_eq!(binomial(6.0, 3), 20.0);
    }

    #[test]
    fn binomial_real_valued_extension() {
        // Gamma(3.5) / (Gamma(3) * Gamma(1.5)) = 2.5 * 1.5 / 2
        assert!((binomial(2.5, 2) - 1.875).abs() < 1e-12);
        assert_eq!(binomial(1.5, 2), 0.0);
        assert_eq!(binomial(-1.0, 2), 0.0);
    }

    #[test]
    fn complete_three_node_graph() {
        let adj = complete(3);
        let g = AdjacencyMatrix(&adj);
        assert_eq!(n_edges(&g).unwrap(), 6.0);
        assert_eq!(n_mutual(&g).unwrap(), 6.0);
        // every node has in- and out-degree 2
        assert_eq!(two_in_stars(&g).unwrap(), 3.0);
        assert_eq!(two_out_stars(&g).unwrap(), 3.0);
        assert_eq!(two_mixed_stars(&g).unwrap(), 12.0);
    }

    #[test]
    fn single_reciprocated_pair_counts_twice() {
        let m = DenseMatrix::from_edges(3, &[(0, 1), (1, 0), (1, 2)]).unwrap();
        assert_eq!(n_mutual(&m).unwrap(), 2.0);
    }

    #[test]
    fn stars_on_out_star() {
        // 0 -> 1, 0 -> 2, 0 -> 3
        let m = DenseMatrix::from_edges(4, &[(0, 1), (0, 2), (0, 3)]).unwrap();
        assert_eq!(two_out_stars(&m).unwrap(), 3.0);
        assert_eq!(two_in_stars(&m).unwrap(), 0.0);
        assert_eq!(two_mixed_stars(&m).unwrap(), 0.0);
    }

    #[test]
    fn weighted_edges_are_summed() {
        let adj = vec![vec![0.0, 2.5], vec![0.5, 0.0]];
        let g = AdjacencyMatrix(&adj);
        assert_eq!(n_edges(&g).unwrap(), 3.0);
        assert_eq!(n_mutual(&g).unwrap(), 2.5);
    }

    #[test]
    fn diagonal_is_included() {
        let adj = vec![vec![1.0, 0.0], vec![0.0, 0.0]];
        assert_eq!(n_edges(&adj).unwrap(), 1.0);
        assert_eq!(n_mutual(&adj).unwrap(), 1.0);
    }

    #[test]
    fn huge_weights_report_overflow() {
        let adj = vec![vec![f64::MAX, f64::MAX], vec![0.0, 0.0]];
        let err = n_edges(&adj).unwrap_err();
        assert!(matches!(err, Error::NumericOverflow(_)), "{err}");
    }

    #[test]
    fn non_square_is_rejected() {
        let adj = vec![vec![0.0, 1.0, 0.0], vec![1.0, 0.0, 0.0]];
        let g = AdjacencyMatrix(&adj);
        for r in [
            n_edges(&g),
            n_mutual(&g),
            two_in_stars(&g),
            two_out_stars(&g),
            two_mixed_stars(&g),
        ] {
            assert!(matches!(r, Err(Error::InvalidInput(_))));
        }
    }

    proptest! {
        #[test]
        fn prop_n_mutual_is_transpose_symmetric(n in 1usize..9, edges in proptest::collection::vec((0usize..9, 0usize..9), 0..40)) {
            let edges: Vec<(usize, usize)> = edges.into_iter().filter(|&(u, v)| u < n && v < n).collect();
            let m = DenseMatrix::from_edges(n, &edges).unwrap();
            prop_assert_eq!(n_mutual(&m).unwrap(), n_mutual(&m.transpose()).unwrap());
        }

        #[test]
        fn prop_two_stars_swap_under_transpose(n in 1usize..9, edges in proptest::collection::vec((0usize..9, 0usize..9), 0..40)) {
            let edges: Vec<(usize, usize)> = edges.into_iter().filter(|&(u, v)| u < n && v < n).collect();
            let m = DenseMatrix::from_edges(n, &edges).unwrap();
            let t = m.transpose();
            prop_assert_eq!(two_in_stars(&m).unwrap(), two_out_stars(&t).unwrap());
            prop_assert_eq!(n_edges(&m).unwrap(), edges_len(&edges));
        }
    }

    fn edges_len(edges: &[(usize, usize)]) -> f64 {
        let mut uniq = edges.to_vec();
        uniq.sort_unstable();
        uniq.dedup();
        uniq.len() as f64
    }
}
