//! Batch evaluation of several statistics over one matrix.
//!
//! Each statistic still validates the matrix on its own; this module only loops over
//! the requested list and collects named results in request order.

use std::fmt;
use std::str::FromStr;

use crate::graph::Adjacency;
use crate::{alternating, degree, stars, triads};
use crate::{Error, Result};

/// The catalogue of configuration statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Statistic {
    NEdges,
    NMutual,
    TwoInStars,
    TwoOutStars,
    TwoMixedStars,
    CyclicTriads,
    TransitiveTriads,
    NotTransitiveTriads,
    TwoPaths,
    AlternatingKTriangles,
    AlternatingKPaths,
    GeoOut,
    GeoIn,
}

impl Statistic {
    pub const ALL: [Statistic; 13] = [
        Statistic::NEdges,
        Statistic::NMutual,
        Statistic::TwoInStars,
        Statistic::TwoOutStars,
        Statistic::TwoMixedStars,
        Statistic::CyclicTriads,
        Statistic::TransitiveTriads,
        Statistic::NotTransitiveTriads,
        Statistic::TwoPaths,
        Statistic::AlternatingKTriangles,
        Statistic::AlternatingKPaths,
        Statistic::GeoOut,
        Statistic::GeoIn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Statistic::NEdges => "n_edges",
            Statistic::NMutual => "n_mutual",
            Statistic::TwoInStars => "two_in_stars",
            Statistic::TwoOutStars => "two_out_stars",
            Statistic::TwoMixedStars => "two_mixed_stars",
            Statistic::CyclicTriads => "cyclic_triads",
            Statistic::TransitiveTriads => "transitive_triads",
            Statistic::NotTransitiveTriads => "not_transitive_triads",
            Statistic::TwoPaths => "two_paths",
            Statistic::AlternatingKTriangles => "alternating_k_triangles",
            Statistic::AlternatingKPaths => "alternating_k_paths",
            Statistic::GeoOut => "geo_out",
            Statistic::GeoIn => "geo_in",
        }
    }

    pub fn compute<G: Adjacency + ?Sized>(self, graph: &G) -> Result<f64> {
        match self {
            Statistic::NEdges => stars::n_edges(graph),
            Statistic::NMutual => stars::n_mutual(graph),
            Statistic::TwoInStars => stars::two_in_stars(graph),
            Statistic::TwoOutStars => stars::two_out_stars(graph),
            Statistic::TwoMixedStars => stars::two_mixed_stars(graph),
            Statistic::CyclicTriads => triads::cyclic_triads(graph),
            Statistic::TransitiveTriads => triads::transitive_triads(graph),
            Statistic::NotTransitiveTriads => triads::not_transitive_triads(graph),
            Statistic::TwoPaths => triads::two_paths(graph),
            Statistic::AlternatingKTriangles => alternating::alternating_k_triangles(graph),
            Statistic::AlternatingKPaths => alternating::alternating_k_paths(graph),
            Statistic::GeoOut => degree::geo_out(graph),
            Statistic::GeoIn => degree::geo_in(graph),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Statistic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Statistic::ALL
            .iter()
            .copied()
            .find(|stat| stat.name() == s)
            .ok_or_else(|| Error::InvalidParameter(format!("unknown statistic: {s:?}")))
    }
}

/// Named results of a batch evaluation, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatisticsSummary {
    pub values: Vec<(Statistic, f64)>,
    /// Statistics skipped by [`StatisticsSummary::compute_lossy`], with the error message.
    pub failures: Vec<(Statistic, String)>,
}

impl StatisticsSummary {
    /// Evaluate every statistic in `stats`, recording failures instead of stopping.
    pub fn compute_lossy<G: Adjacency + ?Sized>(graph: &G, stats: &[Statistic]) -> Self {
        log::debug!(
            "computing {} statistics (lossy) over {} nodes",
            stats.len(),
            graph.node_count()
        );
        let mut summary = Self::default();
        for &stat in stats {
            match stat.compute(graph) {
                Ok(value) => {
                    log::trace!("{stat} = {value}");
                    summary.values.push((stat, value));
                }
                Err(err) => {
                    log::warn!("skipping {stat}: {err}");
                    summary.failures.push((stat, err.to_string()));
                }
            }
        }
        summary
    }

    pub fn get(&self, stat: Statistic) -> Option<f64> {
        self.values
            .iter()
            .find(|(s, _)| *s == stat)
            .map(|&(_, value)| value)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Evaluate every statistic in `stats` over `graph`, stopping at the first failure.
pub fn compute_statistics<G: Adjacency + ?Sized>(
    graph: &G,
    stats: &[Statistic],
) -> Result<StatisticsSummary> {
    log::debug!(
        "computing {} statistics over {} nodes",
        stats.len(),
        graph.node_count()
    );
    let mut values = Vec::with_capacity(stats.len());
    for &stat in stats {
        let value = stat.compute(graph)?;
        log::trace!("{stat} = {value}");
        values.push((stat, value));
    }
    log::debug!("computed {} statistics", values.len());
    Ok(StatisticsSummary {
        values,
        failures: Vec::new(),
    })
}

/// Like [`compute_statistics`], with one rayon task per statistic.
///
/// Workers share `graph` read-only; results keep the request order.
#[cfg(feature = "parallel")]
pub fn compute_statistics_parallel<G: Adjacency + Sync + ?Sized>(
    graph: &G,
    stats: &[Statistic],
) -> Result<StatisticsSummary> {
    use rayon::prelude::*;

    log::debug!(
        "computing {} statistics over {} nodes on {} threads",
        stats.len(),
        graph.node_count(),
        rayon::current_num_threads()
    );
    let values = stats
        .par_iter()
        .map(|&stat| stat.compute(graph).map(|value| (stat, value)))
        .collect::<Result<Vec<_>>>()?;
    Ok(StatisticsSummary {
        values,
        failures: Vec::new(),
    })
}
