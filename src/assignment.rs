//! Cost-matrix assignment entry point (minimisation).
//!
//! Converts a dense rectangular cost matrix into the CSR maximisation graph
//! the engine expects: the matrix is transposed when it has more rows than
//! columns, entries are mapped through `max + 1 - cost` so every weight is
//! positive, and each row keeps only its `min(h, w)` heaviest candidates.
//! The result adapter undoes the transposition and recomputes the objective
//! from the original matrix, so retention and the weight transform never
//! leak into the reported cost.

use crate::config::SolverConfig;
use crate::engine;
use crate::error::SolveError;
use crate::graph::{Candidate, CsrGraph};
use crate::matching::{Matching, UNMATCHED};
#[cfg(feature = "perf-metrics")]
use crate::perf::{self, Phase, SolveMetrics};

pub fn solve_assignment(costs: &[Vec<i64>]) -> Result<Matching, SolveError> {
    solve_assignment_with_config(costs, &SolverConfig::default())
}

pub fn solve_assignment_with_config(
    costs: &[Vec<i64>],
    config: &SolverConfig,
) -> Result<Matching, SolveError> {
    config.validate()?;

    let h = costs.len();
    if h == 0 {
        return Err(SolveError::EmptyCostMatrix);
    }
    let w = costs[0].len();
    if w == 0 {
        return Err(SolveError::EmptyCostMatrix);
    }
    for (row, entries) in costs.iter().enumerate() {
        if entries.len() != w {
            return Err(SolveError::RaggedCostMatrix {
                row,
                expected: w,
                found: entries.len(),
            });
        }
    }

    #[cfg(feature = "perf-metrics")]
    let mut metrics = SolveMetrics::default();
    #[cfg(feature = "perf-metrics")]
    metrics.start_phase(Phase::Total);

    // The engine requires |L| <= |R|.
    let transposed = h > w;
    let (n_left, n_right) = if transposed { (w, h) } else { (h, w) };

    let graph = {
        #[cfg(feature = "perf-metrics")]
        let _build = metrics.phase_guard(Phase::Build);

        let max_cost = costs
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0);
        let shift = max_cost + 1;

        let keep = config.retention_cap.unwrap_or(n_left).min(n_right);
        let mut graph = CsrGraph::with_capacity(n_left, n_right, keep);
        let mut buf: Vec<Candidate> = Vec::with_capacity(n_right);
        for l in 0..n_left {
            buf.clear();
            for r in 0..n_right {
                let cost = if transposed { costs[r][l] } else { costs[l][r] };
                buf.push(Candidate {
                    to: r as u32,
                    weight: shift - cost,
                });
            }
            graph.push_row(&mut buf, keep);
        }
        graph
    };

    #[cfg(feature = "perf-metrics")]
    {
        metrics.edges_stored = graph.edge_count() as u64;
        metrics.edges_dropped = (n_left * n_right - graph.edge_count()) as u64;
    }

    let pairing = {
        #[cfg(feature = "perf-metrics")]
        let _search = metrics.phase_guard(Phase::Search);
        engine::search(&graph, config.greedy_seed)
    };
    debug_assert_eq!(
        pairing.stats.greedy_matches + pairing.stats.augmentations,
        n_left as u64,
        "each engine row is matched exactly once"
    );
    #[cfg(feature = "perf-metrics")]
    metrics.record_search(&pairing.stats);

    let result = {
        #[cfg(feature = "perf-metrics")]
        let _package = metrics.phase_guard(Phase::Package);
        package(costs, transposed, pairing)
    };

    #[cfg(feature = "perf-metrics")]
    {
        metrics.end_phase(Phase::Total);
        perf::store_last(metrics);
    }

    Ok(result)
}

/// Result adapter: maps the engine pairing back onto original rows and
/// recomputes the true cost from the original matrix.
fn package(costs: &[Vec<i64>], transposed: bool, pairing: engine::Pairing) -> Matching {
    let h = costs.len();

    if transposed {
        // Engine rows are original columns. The assignment is re-indexed by
        // original row; `right_pair` is intentionally left empty for this
        // path (API compatibility; callers read `left_pair` only).
        let mut left_pair = vec![UNMATCHED; h];
        for (col, &row) in pairing.left_pair.iter().enumerate() {
            debug_assert!(
                row != UNMATCHED && (row as usize) < h,
                "every engine row is matched to a real column when |L| <= |R|"
            );
            left_pair[row as usize] = col as i32;
        }
        let weight_sum = true_cost(costs, &left_pair);
        Matching {
            left_pair,
            right_pair: Vec::new(),
            weight_sum,
        }
    } else {
        let left_pair = pairing.left_pair;
        let right_pair = pairing.right_pair;
        debug_assert_eq!(right_pair.len(), costs[0].len());
        let weight_sum = true_cost(costs, &left_pair);
        Matching {
            left_pair,
            right_pair,
            weight_sum,
        }
    }
}

fn true_cost(costs: &[Vec<i64>], left_pair: &[i32]) -> i64 {
    left_pair
        .iter()
        .enumerate()
        .filter(|&(_, &col)| col != UNMATCHED)
        .map(|(row, &col)| costs[row][col as usize])
        .sum()
}
