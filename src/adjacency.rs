//! Adjacency-list matching entry point (maximisation, sparse).
//!
//! Unlike the cost-matrix path this accepts any shape, including more left
//! vertices than right ones; the engine runs over an extended column range
//! and pairs that land on virtual columns (or on no stored tight edge) are
//! phantom and reported as unmatched. Negative edge weights are accepted
//! but never selected: the initial row potential is clamped to zero, which
//! keeps the implicit free edge tighter than any negative edge.

use crate::config::SolverConfig;
use crate::engine;
use crate::error::SolveError;
use crate::graph::{Candidate, CsrGraph};
use crate::matching::{Matching, UNMATCHED};
#[cfg(feature = "perf-metrics")]
use crate::perf::{self, Phase, SolveMetrics};

pub fn max_weight_matching(
    n_left: usize,
    n_right: usize,
    adjacency: &[Vec<(u32, i64)>],
) -> Result<Matching, SolveError> {
    max_weight_matching_with_config(n_left, n_right, adjacency, &SolverConfig::default())
}

pub fn max_weight_matching_with_config(
    n_left: usize,
    n_right: usize,
    adjacency: &[Vec<(u32, i64)>],
    config: &SolverConfig,
) -> Result<Matching, SolveError> {
    config.validate()?;

    if adjacency.len() != n_left {
        return Err(SolveError::AdjacencyLengthMismatch {
            expected: n_left,
            found: adjacency.len(),
        });
    }
    if (n_left == 0) != (n_right == 0) {
        return Err(SolveError::EmptySide { n_left, n_right });
    }
    for (left, edges) in adjacency.iter().enumerate() {
        for &(right, _) in edges {
            if right as usize >= n_right {
                return Err(SolveError::EdgeEndpointOutOfRange {
                    left,
                    right: right as usize,
                    n_right,
                });
            }
        }
    }

    if n_left == 0 {
        return Ok(Matching {
            left_pair: Vec::new(),
            right_pair: Vec::new(),
            weight_sum: 0,
        });
    }

    #[cfg(feature = "perf-metrics")]
    let mut metrics = SolveMetrics::default();
    #[cfg(feature = "perf-metrics")]
    metrics.start_phase(Phase::Total);
    #[cfg(feature = "perf-metrics")]
    let mut candidates_seen = 0u64;

    let graph = {
        #[cfg(feature = "perf-metrics")]
        let _build = metrics.phase_guard(Phase::Build);

        let keep = config.retention_cap.unwrap_or(n_left);
        let mut graph = CsrGraph::with_capacity(n_left, n_right, keep.min(n_right));
        let mut buf: Vec<Candidate> = Vec::new();
        for edges in adjacency {
            buf.clear();
            buf.extend(edges.iter().map(|&(to, weight)| Candidate { to, weight }));
            #[cfg(feature = "perf-metrics")]
            {
                candidates_seen += buf.len() as u64;
            }
            graph.push_row(&mut buf, keep);
        }
        graph
    };

    #[cfg(feature = "perf-metrics")]
    {
        metrics.edges_stored = graph.edge_count() as u64;
        metrics.edges_dropped = candidates_seen - graph.edge_count() as u64;
    }

    let pairing = {
        #[cfg(feature = "perf-metrics")]
        let _search = metrics.phase_guard(Phase::Search);
        engine::search(&graph, config.greedy_seed)
    };
    debug_assert_eq!(
        pairing.stats.greedy_matches + pairing.stats.augmentations,
        n_left as u64,
        "each left vertex is matched exactly once, possibly to a phantom"
    );
    #[cfg(feature = "perf-metrics")]
    metrics.record_search(&pairing.stats);

    let result = {
        #[cfg(feature = "perf-metrics")]
        let _package = metrics.phase_guard(Phase::Package);
        package(&graph, pairing)
    };

    #[cfg(feature = "perf-metrics")]
    {
        metrics.end_phase(Phase::Total);
        perf::store_last(metrics);
    }

    Ok(result)
}

/// Keeps only pairs backed by a stored tight edge into the real column
/// range; everything else was a phantom match and is reported unmatched.
fn package(graph: &CsrGraph, pairing: engine::Pairing) -> Matching {
    let engine::Pairing {
        mut left_pair,
        u,
        v,
        ..
    } = pairing;

    let mut right_pair = vec![UNMATCHED; graph.n_right];
    let mut weight_sum = 0i64;
    for l in 0..graph.n_left {
        let r = left_pair[l];
        if r == UNMATCHED {
            continue;
        }
        let stored = if (r as usize) < graph.n_right {
            graph.tight_weight(l, r as u32, u[l] + v[r as usize])
        } else {
            None
        };
        match stored {
            Some(weight) => {
                weight_sum += weight;
                right_pair[r as usize] = l as i32;
            }
            None => left_pair[l] = UNMATCHED,
        }
    }

    Matching {
        left_pair,
        right_pair,
        weight_sum,
    }
}
