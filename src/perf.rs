//! Optional timing and counter capture for solver runs.
//!
//! Compiled only with the `perf-metrics` feature. Each entry point records
//! phase timings and search counters into a thread-local slot that
//! [`last_solve_metrics`] reads back.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Instant;

use crate::engine::SearchStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Total,
    Build,
    Search,
    Package,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SolveMetrics {
    pub build_time_ms: u64,
    pub search_time_ms: u64,
    pub package_time_ms: u64,
    pub total_time_ms: u64,
    pub edges_stored: u64,
    pub edges_dropped: u64,
    pub greedy_matches: u64,
    pub augmentations: u64,
    pub dual_updates: u64,
    #[serde(skip)]
    phase_start: HashMap<Phase, Instant>,
}

impl SolveMetrics {
    pub fn start_phase(&mut self, phase: Phase) {
        self.phase_start.insert(phase, Instant::now());
    }

    pub fn end_phase(&mut self, phase: Phase) {
        if let Some(start) = self.phase_start.remove(&phase) {
            let elapsed = start.elapsed().as_millis() as u64;
            match phase {
                Phase::Build => self.build_time_ms += elapsed,
                Phase::Search => self.search_time_ms += elapsed,
                Phase::Package => self.package_time_ms += elapsed,
                Phase::Total => self.total_time_ms += elapsed,
            }
        }
    }

    pub(crate) fn record_search(&mut self, stats: &SearchStats) {
        self.greedy_matches = stats.greedy_matches;
        self.augmentations = stats.augmentations;
        self.dual_updates = stats.dual_updates;
    }

    pub fn phase_guard(&mut self, phase: Phase) -> PhaseGuard<'_> {
        PhaseGuard::new(self, phase)
    }
}

pub struct PhaseGuard<'a> {
    metrics: &'a mut SolveMetrics,
    phase: Phase,
}

impl<'a> PhaseGuard<'a> {
    pub fn new(metrics: &'a mut SolveMetrics, phase: Phase) -> Self {
        metrics.start_phase(phase);
        Self { metrics, phase }
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.metrics.end_phase(self.phase);
    }
}

thread_local! {
    static LAST_SOLVE: RefCell<Option<SolveMetrics>> = RefCell::new(None);
}

pub(crate) fn store_last(metrics: SolveMetrics) {
    LAST_SOLVE.with(|slot| *slot.borrow_mut() = Some(metrics));
}

/// Metrics captured by the most recent solver call on this thread.
pub fn last_solve_metrics() -> Option<SolveMetrics> {
    LAST_SOLVE.with(|slot| slot.borrow().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_accumulate_independently() {
        let mut metrics = SolveMetrics::default();
        metrics.start_phase(Phase::Build);
        metrics.end_phase(Phase::Build);
        metrics.end_phase(Phase::Search);
        assert_eq!(metrics.search_time_ms, 0);
    }

    #[test]
    fn phase_guard_closes_its_phase_on_drop() {
        let mut metrics = SolveMetrics::default();
        {
            let _guard = metrics.phase_guard(Phase::Search);
        }
        assert!(
            metrics.phase_start.is_empty(),
            "dropping the guard must close its phase"
        );
    }

    #[test]
    fn solver_calls_populate_the_thread_local() {
        let costs = vec![vec![1, 2], vec![2, 1]];
        crate::solve_assignment(&costs).expect("valid input");

        let metrics = last_solve_metrics().expect("metrics recorded");
        assert_eq!(metrics.edges_stored, 4);
        assert_eq!(metrics.edges_dropped, 0);
        assert!(metrics.greedy_matches + metrics.augmentations >= 2);
    }
}
