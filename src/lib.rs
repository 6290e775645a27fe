//! `ergmstats`: configuration statistics for exponential random graph models.
//!
//! Every statistic is a pure function of a directed graph given as an adjacency matrix
//! and returns one `f64`. Statistics are independent: callers pick the ones they need
//! and apply each to the same matrix (or use [`compute_statistics`] to do it in one call).
//!
//! Public invariants (must not drift):
//! - **Orientation**: entry `(i, j)` is the edge `i -> j`. Out-degree is a row sum,
//!   in-degree is a column sum.
//! - **Read-only input**: no statistic mutates the matrix or keeps a reference to it.
//! - **Fail fast**: each statistic validates its own input (square, non-empty, finite,
//!   non-negative) and returns an [`Error`]; no NaN or `-1` sentinels.
//! - **Diagonal as-is**: self-loops are summed like any other entry. Zeroing the
//!   diagonal is the caller's business.
//!
//! Swappable (allowed to change without breaking the contract):
//! - loop order and accumulation strategy (so long as results agree to rounding)
//! - serial vs parallel batch evaluation

pub mod alternating;
pub mod degree;
pub mod graph;
pub mod stars;
pub mod summary;
pub mod triads;

pub use alternating::{
    alternating_k_paths, alternating_k_paths_with, alternating_k_triangles,
    alternating_k_triangles_with, shared_two_paths, AlternatingConfig,
};
pub use degree::{geo_in, geo_out, in_degree_distribution, out_degree_distribution};
pub use graph::{Adjacency, AdjacencyMatrix, DenseMatrix, SquareView};
pub use stars::{binomial, n_edges, n_mutual, two_in_stars, two_mixed_stars, two_out_stars};
pub use summary::{compute_statistics, Statistic, StatisticsSummary};
pub use triads::{cyclic_triads, not_transitive_triads, transitive_triads, two_paths};

#[cfg(feature = "parallel")]
pub use summary::compute_statistics_parallel;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("numeric overflow: {0}")]
    NumericOverflow(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("index out of bounds: {0}")]
    IndexOutOfBounds(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
