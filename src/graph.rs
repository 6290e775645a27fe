//! Adjacency-matrix input model.
//!
//! Statistics accept anything implementing [`Adjacency`]: a list of rows, where row `i`
//! holds the outgoing edge weights of node `i`. Rows are allowed to have any length at
//! the type level; [`validate`] is what turns an arbitrary row list into a checked
//! square [`SquareView`] the statistics index into.

use crate::{Error, Result};

/// Row-oriented access to a (possibly malformed) adjacency matrix.
///
/// `row(i)` must be callable for every `i < node_count()`.
pub trait Adjacency {
    /// Number of rows (nodes).
    fn node_count(&self) -> usize;
    /// Outgoing weights of node `i`: `row(i)[j]` is the edge `i -> j`.
    fn row(&self, i: usize) -> &[f64];
}

/// Borrowed view over nested rows.
#[derive(Debug, Clone, Copy)]
pub struct AdjacencyMatrix<'a>(pub &'a [Vec<f64>]);

impl Adjacency for AdjacencyMatrix<'_> {
    fn node_count(&self) -> usize {
        self.0.len()
    }

    fn row(&self, i: usize) -> &[f64] {
        &self.0[i]
    }
}

impl Adjacency for Vec<Vec<f64>> {
    fn node_count(&self) -> usize {
        self.len()
    }

    fn row(&self, i: usize) -> &[f64] {
        &self[i]
    }
}

impl<G: Adjacency + ?Sized> Adjacency for &G {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn row(&self, i: usize) -> &[f64] {
        (**self).row(i)
    }
}

/// Owned row-major matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DenseMatrixParts"))]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Unchecked wire form of [`DenseMatrix`]; deserialization goes through
/// [`DenseMatrix::from_shape`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct DenseMatrixParts {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<DenseMatrixParts> for DenseMatrix {
    type Error = Error;

    fn try_from(parts: DenseMatrixParts) -> Result<Self> {
        Self::from_shape(parts.rows, parts.cols, parts.data)
    }
}

fn entry_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or_else(|| {
        Error::NumericOverflow(format!(
            "matrix shape {rows}x{cols} has more entries than fit in usize"
        ))
    })
}

impl DenseMatrix {
    /// `n x n` matrix of zeros (the empty graph on `n` nodes).
    pub fn zeros(n: usize) -> Result<Self> {
        let len = entry_count(n, n)?;
        Ok(Self {
            rows: n,
            cols: n,
            data: vec![0.0; len],
        })
    }

    /// Wrap row-major `data` of shape `rows x cols`. The shape need not be square.
    pub fn from_shape(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != entry_count(rows, cols)? {
            return Err(Error::InvalidInput(format!(
                "data length must equal rows * cols (len={} rows={} cols={})",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Copy nested rows. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(entry_count(rows.len(), cols)?);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::InvalidInput(format!(
                    "row {i} has length {} but row 0 has length {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// 0/1 matrix on `n` nodes with an entry for every `u -> v` in `edges`.
    ///
    /// Repeated edges are not accumulated.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut m = Self::zeros(n)?;
        for &(u, v) in edges {
            m.set(u, v, 1.0)?;
        }
        Ok(m)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        if i >= self.rows {
            return Err(Error::IndexOutOfBounds(i));
        }
        if j >= self.cols {
            return Err(Error::IndexOutOfBounds(j));
        }
        self.data[i * self.cols + j] = value;
        Ok(())
    }

    /// The reversed graph.
    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.data.len()];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Relabel nodes: node `i` becomes node `perm[i]`, rows and columns together.
    pub fn permuted(&self, perm: &[usize]) -> Result<Self> {
        if !self.is_square() {
            return Err(Error::InvalidInput(format!(
                "cannot relabel a non-square matrix ({}x{})",
                self.rows, self.cols
            )));
        }
        let n = self.rows;
        if perm.len() != n {
            return Err(Error::InvalidParameter(format!(
                "permutation length must equal node_count (len={} node_count={})",
                perm.len(),
                n
            )));
        }
        let mut seen = vec![false; n];
        for &p in perm {
            if p >= n {
                return Err(Error::IndexOutOfBounds(p));
            }
            if seen[p] {
                return Err(Error::InvalidParameter(format!(
                    "permutation repeats node {p}"
                )));
            }
            seen[p] = true;
        }
        let mut out = Self::zeros(n)?;
        for i in 0..n {
            for j in 0..n {
                out.data[perm[i] * n + perm[j]] = self.data[i * n + j];
            }
        }
        Ok(out)
    }

    /// Adjacency matrix of a directed `petgraph` graph: each edge adds 1.0 to its entry,
    /// so parallel edges accumulate.
    #[cfg(feature = "petgraph")]
    pub fn from_petgraph<N, E, Ix>(
        graph: &petgraph::Graph<N, E, petgraph::Directed, Ix>,
    ) -> Result<Self>
    where
        Ix: petgraph::graph::IndexType,
    {
        Self::from_petgraph_weighted(graph, |_| 1.0)
    }

    /// Like [`DenseMatrix::from_petgraph`], with the entry contribution of each edge taken
    /// from `weight`.
    #[cfg(feature = "petgraph")]
    pub fn from_petgraph_weighted<N, E, Ix, F>(
        graph: &petgraph::Graph<N, E, petgraph::Directed, Ix>,
        mut weight: F,
    ) -> Result<Self>
    where
        Ix: petgraph::graph::IndexType,
        F: FnMut(&E) -> f64,
    {
        use petgraph::visit::EdgeRef;

        let n = graph.node_count();
        let mut m = Self::zeros(n)?;
        for e in graph.edge_references() {
            let (u, v) = (e.source().index(), e.target().index());
            m.data[u * n + v] += weight(e.weight());
        }
        Ok(m)
    }
}

impl Adjacency for DenseMatrix {
    fn node_count(&self) -> usize {
        self.rows
    }

    fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
}

/// A validated square adjacency matrix with `n >= 1` finite, non-negative entries.
#[derive(Debug)]
pub struct SquareView<'a, G: ?Sized> {
    graph: &'a G,
    n: usize,
}

// Manual impls: the derive would require `G: Clone`.
impl<G: ?Sized> Clone for SquareView<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ?Sized> Copy for SquareView<'_, G> {}

/// Check that `graph` is a non-empty square matrix of finite, non-negative entries.
pub fn validate<G: Adjacency + ?Sized>(graph: &G) -> Result<SquareView<'_, G>> {
    let n = graph.node_count();
    if n == 0 {
        return Err(Error::InvalidInput(
            "adjacency matrix is empty (0 rows)".to_string(),
        ));
    }
    for i in 0..n {
        let row = graph.row(i);
        if row.len() != n {
            return Err(Error::InvalidInput(format!(
                "adjacency matrix must be square: row {i} has {} columns, expected {n}",
                row.len()
            )));
        }
        for (j, &w) in row.iter().enumerate() {
            if !w.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "entry ({i}, {j}) must be finite, got {w}"
                )));
            }
            if w < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "entry ({i}, {j}) must be non-negative, got {w}"
                )));
            }
        }
    }
    Ok(SquareView { graph, n })
}

impl<'a, G: Adjacency + ?Sized> SquareView<'a, G> {
    pub fn node_count(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.graph.row(i)[j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &'a [f64] {
        self.graph.row(i)
    }

    /// Row sums.
    pub fn out_degrees(&self) -> Vec<f64> {
        (0..self.n).map(|i| self.row(i).iter().sum::<f64>()).collect()
    }

    /// Column sums.
    pub fn in_degrees(&self) -> Vec<f64> {
        let mut deg = vec![0.0; self.n];
        for i in 0..self.n {
            for (d, &w) in deg.iter_mut().zip(self.row(i)) {
                *d += w;
            }
        }
        deg
    }
}

/// Reject a statistic whose aggregate left the representable range.
pub(crate) fn ensure_finite(statistic: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NumericOverflow(format!(
            "{statistic} is not representable as a finite f64 (got {value})"
        )))
    }
}

/// Out-degree (row sum) of every node.
pub fn out_degrees<G: Adjacency + ?Sized>(graph: &G) -> Result<Vec<f64>> {
    Ok(validate(graph)?.out_degrees())
}

/// In-degree (column sum) of every node.
pub fn in_degrees<G: Adjacency + ?Sized>(graph: &G) -> Result<Vec<f64>> {
    Ok(validate(graph)?.in_degrees())
}
