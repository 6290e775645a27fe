//! Triad and two-path statistics.
//!
//! All of these are \(O(n^3)\) loop nests over ordered node triples. Zero entries in
//! the outer loops are skipped, which makes sparse 0/1 matrices noticeably cheaper
//! without changing any sum.

use crate::graph::{ensure_finite, validate, Adjacency};
use crate::Result;

/// Directed 3-cycles: \(\operatorname{tr}(A^3) / 3\).
///
/// The trace counts each cycle `i -> j -> k -> i` once per starting vertex, hence the
/// division by 3.
///
/// Only the diagonal of \(A^3\) is used. Summing every entry of \(A^3\) would also count
/// open three-walks such as `0 -> 1 -> 2 -> 3`, so that variant is deliberately not
/// used: on the complete 3-node digraph it gives 8 instead of 2.
pub fn cyclic_triads<G: Adjacency + ?Sized>(graph: &G) -> Result<f64> {
    let view = validate(graph)?;
    let n = view.node_count();
    let mut a2_row = vec![0.0; n];
    let mut trace = 0.0;
    for i in 0..n {
        // row i of A^2
        a2_row.fill(0.0);
        for (j, &aij) in view.row(i).iter().enumerate() {
            if aij == 0.0 {
                continue;
            }
            for (acc, &ajk) in a2_row.iter_mut().zip(view.row(j)) {
                *acc += aij * ajk;
            }
        }
        for (k, &a2ik) in a2_row.iter().enumerate() {
            trace += a2ik * view.get(k, i);
        }
    }
    ensure_finite("cyclic_triads", trace / 3.0)
}

/// For every node `i`, the number of unordered pairs of predecessors of `i` that are
/// linked in at least one direction, summed over `i`.
///
/// A predecessor is a node `j` with `A[j][i] == 1`; other weights are not edges here.
pub fn transitive_triads<G: Adjacency + ?Sized>(graph: &G) -> Result<f64> {
    let view = validate(graph)?;
    let n = view.node_count();
    let mut preds: Vec<usize> = Vec::with_capacity(n);
    let mut total = 0.0;
    for i in 0..n {
        preds.clear();
        preds.extend((0..n).filter(|&j| view.get(j, i) == 1.0));
        if preds.len() < 2 {
            continue;
        }
        let mut linked = 0.0;
        for (a, &u) in preds.iter().enumerate() {
            for &v in &preds[a + 1..] {
                if view.get(u, v) == 1.0 || view.get(v, u) == 1.0 {
                    linked += 1.0;
                }
            }
        }
        total += linked;
    }
    Ok(total)
}

/// \(\sum_{i,j,k} A_{ij} A_{jk} A_{ik}\) over all ordered triples.
///
/// Despite the name this counts closed directed triangles `i -> j -> k` with the
/// shortcut `i -> k`; the name is kept so existing ERGM term lists keep working.
pub fn not_transitive_triads<G: Adjacency + ?Sized>(graph: &G) -> Result<f64> {
    let view = validate(graph)?;
    let n = view.node_count();
    let mut sum = 0.0;
    for i in 0..n {
        let row_i = view.row(i);
        for j in 0..n {
            let aij = row_i[j];
            if aij == 0.0 {
                continue;
            }
            let row_j = view.row(j);
            for k in 0..n {
                sum += aij * row_j[k] * row_i[k];
            }
        }
    }
    ensure_finite("not_transitive_triads", sum)
}

/// Directed two-paths `i -> k -> j` with `k` distinct from both ends.
///
/// `i == j` is allowed, so a reciprocated pair contributes two-paths that return to
/// their start.
pub fn two_paths<G: Adjacency + ?Sized>(graph: &G) -> Result<f64> {
    let view = validate(graph)?;
    let n = view.node_count();
    let mut sum = 0.0;
    for i in 0..n {
        for k in 0..n {
            if k == i {
                continue;
            }
            let aik = view.get(i, k);
            if aik == 0.0 {
                continue;
            }
            for (j, &akj) in view.row(k).iter().enumerate() {
                if j != k {
                    sum += aik * akj;
                }
            }
        }
    }
    ensure_finite("two_paths", sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DenseMatrix;
    use crate::Error;
    use proptest::prelude::*;

    fn complete(n: usize) -> DenseMatrix {
        let edges: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
            .collect();
        DenseMatrix::from_edges(n, &edges).unwrap()
    }

    #[test]
    fn complete_three_node_graph() {
        let g = complete(3);
        assert_eq!(cyclic_triads(&g).unwrap(), 2.0);
        assert_eq!(transitive_triads(&g).unwrap(), 3.0);
        assert_eq!(not_transitive_triads(&g).unwrap(), 6.0);
        assert_eq!(two_paths(&g).unwrap(), 12.0);
    }

    #[test]
    fn directed_path() {
        // 0 -> 1 -> 2
        let g = DenseMatrix::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(two_paths(&g).unwrap(), 1.0);
        assert_eq!(cyclic_triads(&g).unwrap(), 0.0);
        assert_eq!(transitive_triads(&g).unwrap(), 0.0);
        assert_eq!(not_transitive_triads(&g).unwrap(), 0.0);
    }

    #[test]
    fn open_three_walks_are_not_cycles() {
        // 0 -> 1 -> 2 -> 3: A^3 has a nonzero entry at (0, 3) but a zero diagonal
        let g = DenseMatrix::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(cyclic_triads(&g).unwrap(), 0.0);
    }

    #[test]
    fn directed_cycle() {
        // 0 -> 1 -> 2 -> 0
        let g = DenseMatrix::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        assert_eq!(cyclic_triads(&g).unwrap(), 1.0);
        assert_eq!(transitive_triads(&g).unwrap(), 0.0);
        assert_eq!(not_transitive_triads(&g).unwrap(), 0.0);
        assert_eq!(two_paths(&g).unwrap(), 3.0);
    }

    #[test]
    fn transitive_triple() {
        // 0 -> 1, 0 -> 2, 1 -> 2
        let g = DenseMatrix::from_edges(3, &[(0, 1), (0, 2), (1, 2)]).unwrap();
        assert_eq!(transitive_triads(&g).unwrap(), 1.0);
        assert_eq!(not_transitive_triads(&g).unwrap(), 1.0);
        assert_eq!(cyclic_triads(&g).unwrap(), 0.0);
    }

    #[test]
    fn reciprocated_pair_two_paths_return_home() {
        // 0 <-> 1: paths 0 -> 1 -> 0 and 1 -> 0 -> 1
        let g = DenseMatrix::from_edges(2, &[(0, 1), (1, 0)]).unwrap();
        assert_eq!(two_paths(&g).unwrap(), 2.0);
    }

    #[test]
    fn transitive_triads_ignore_non_unit_weights() {
        let adj = vec![
            vec![0.0, 2.0, 1.0],
            vec![0.0, 0.0, 1.0],
            vec![0.0, 0.0, 0.0],
        ];
        // 0 and 1 both precede 2, but the 0 -> 1 link has weight 2.
        assert_eq!(transitive_triads(&adj).unwrap(), 0.0);
    }

    #[test]
    fn non_square_is_rejected() {
        let m = DenseMatrix::from_shape(2, 3, vec![0.0; 6]).unwrap();
        for r in [
            cyclic_triads(&m),
            transitive_triads(&m),
            not_transitive_triads(&m),
            two_paths(&m),
        ] {
            assert!(matches!(r, Err(Error::InvalidInput(_))));
        }
    }

    proptest! {
        #[test]
        fn prop_zero_matrix_is_zero(n in 1usize..12) {
            let g = DenseMatrix::zeros(n).unwrap();
            prop_assert_eq!(cyclic_triads(&g).unwrap(), 0.0);
            prop_assert_eq!(transitive_triads(&g).unwrap(), 0.0);
            prop_assert_eq!(not_transitive_triads(&g).unwrap(), 0.0);
            prop_assert_eq!(two_paths(&g).unwrap(), 0.0);
        }

        #[test]
        fn prop_counts_are_nonnegative_and_relabel_invariant(
            n in 1usize..8,
            edges in proptest::collection::vec((0usize..8, 0usize..8), 0..30),
            shift in 0usize..8,
        ) {
            let edges: Vec<(usize, usize)> = edges.into_iter().filter(|&(u, v)| u < n && v < n).collect();
            let g = DenseMatrix::from_edges(n, &edges).unwrap();
            let perm: Vec<usize> = (0..n).map(|i| (i + shift) % n).collect();
            let p = g.permuted(&perm).unwrap();
            let stats: [fn(&DenseMatrix) -> Result<f64>; 4] =
                [cyclic_triads, transitive_triads, not_transitive_triads, two_paths];
            for f in stats {
                let a = f(&g).unwrap();
                prop_assert!(a >= 0.0);
                prop_assert!((a - f(&p).unwrap()).abs() < 1e-9);
            }
        }
    }
}
