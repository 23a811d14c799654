//! Flat CSR edge store shared by both solver entry points.
//!
//! Edges incident to left vertex `l` occupy `[row_off[l], row_off[l + 1])`
//! of the parallel `edge_to` / `edge_w` arrays. Rows are appended through
//! [`CsrGraph::push_row`], which caps the out-degree by retaining only the
//! heaviest candidates and records the pre-retention row maximum as the
//! initial left potential.

use crate::select::retain_top_k;

/// One `(right vertex, weight)` entry in the pre-retention working buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub(crate) to: u32,
    pub(crate) weight: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct CsrGraph {
    pub(crate) n_left: usize,
    pub(crate) n_right: usize,
    pub(crate) edge_to: Vec<u32>,
    pub(crate) edge_w: Vec<i64>,
    pub(crate) row_off: Vec<usize>,
    /// Pre-retention maximum edge weight per row, clamped to zero. Feasible
    /// as an initial potential against the full candidate set and therefore
    /// against the retained subset.
    pub(crate) row_max: Vec<i64>,
}

impl CsrGraph {
    pub(crate) fn with_capacity(n_left: usize, n_right: usize, edges_per_row: usize) -> Self {
        let mut row_off = Vec::with_capacity(n_left + 1);
        row_off.push(0);
        CsrGraph {
            n_left,
            n_right,
            edge_to: Vec::with_capacity(n_left.saturating_mul(edges_per_row)),
            edge_w: Vec::with_capacity(n_left.saturating_mul(edges_per_row)),
            row_off,
            row_max: Vec::with_capacity(n_left),
        }
    }

    /// Appends one left vertex's candidates, keeping only the `keep`
    /// heaviest. The row potential is taken over the full buffer, before
    /// retention.
    pub(crate) fn push_row(&mut self, candidates: &mut Vec<Candidate>, keep: usize) {
        let row_max = candidates.iter().map(|c| c.weight).max().unwrap_or(0);
        self.row_max.push(row_max.max(0));

        retain_top_k(candidates, keep);
        let kept = candidates.len().min(keep);
        for candidate in &candidates[..kept] {
            self.edge_to.push(candidate.to);
            self.edge_w.push(candidate.weight);
        }
        self.row_off.push(self.edge_to.len());
    }

    pub(crate) fn row(&self, l: usize) -> (&[u32], &[i64]) {
        let span = self.row_off[l]..self.row_off[l + 1];
        (&self.edge_to[span.clone()], &self.edge_w[span])
    }

    /// Stored weight of an `(l, r)` edge that is tight under `dual_sum`
    /// (`u[l] + v[r]`), if any. Used to tell real matches from phantom ones
    /// when packaging results.
    pub(crate) fn tight_weight(&self, l: usize, r: u32, dual_sum: i64) -> Option<i64> {
        let (to, weights) = self.row(l);
        to.iter()
            .zip(weights)
            .find(|&(&t, &w)| t == r && w == dual_sum)
            .map(|(_, &w)| w)
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edge_to.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of(graph: &CsrGraph, l: usize) -> Vec<(u32, i64)> {
        let (to, w) = graph.row(l);
        let mut edges: Vec<(u32, i64)> = to.iter().copied().zip(w.iter().copied()).collect();
        edges.sort_unstable();
        edges
    }

    #[test]
    fn rows_are_retained_and_offsets_advance() {
        let mut graph = CsrGraph::with_capacity(2, 4, 2);
        let mut buf = vec![
            Candidate { to: 0, weight: 3 },
            Candidate { to: 1, weight: 9 },
            Candidate { to: 2, weight: 1 },
            Candidate { to: 3, weight: 7 },
        ];
        graph.push_row(&mut buf, 2);

        buf.clear();
        buf.push(Candidate { to: 2, weight: 5 });
        graph.push_row(&mut buf, 2);

        assert_eq!(graph.row_off, vec![0, 2, 3]);
        assert_eq!(row_of(&graph, 0), vec![(1, 9), (3, 7)]);
        assert_eq!(row_of(&graph, 1), vec![(2, 5)]);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn row_max_is_taken_before_retention() {
        let mut graph = CsrGraph::with_capacity(1, 3, 1);
        let mut buf = vec![
            Candidate { to: 0, weight: 4 },
            Candidate { to: 1, weight: 8 },
            Candidate { to: 2, weight: 6 },
        ];
        graph.push_row(&mut buf, 1);

        // Only one edge survives, but the potential still covers the row.
        assert_eq!(graph.row_max, vec![8]);
        assert_eq!(graph.row_off, vec![0, 1]);
        assert_eq!(row_of(&graph, 0), vec![(1, 8)]);
    }

    #[test]
    fn empty_and_negative_rows_clamp_the_potential() {
        let mut graph = CsrGraph::with_capacity(2, 2, 2);
        let mut buf = Vec::new();
        graph.push_row(&mut buf, 2);

        buf.push(Candidate { to: 0, weight: -4 });
        buf.push(Candidate { to: 1, weight: -9 });
        graph.push_row(&mut buf, 2);

        assert_eq!(graph.row_max, vec![0, 0]);
        assert_eq!(row_of(&graph, 1), vec![(0, -4), (1, -9)]);
    }

    #[test]
    fn tight_weight_requires_both_endpoint_and_equality() {
        let mut graph = CsrGraph::with_capacity(1, 2, 2);
        let mut buf = vec![
            Candidate { to: 0, weight: 5 },
            Candidate { to: 1, weight: 2 },
        ];
        graph.push_row(&mut buf, 2);

        assert_eq!(graph.tight_weight(0, 0, 5), Some(5));
        assert_eq!(graph.tight_weight(0, 0, 6), None);
        assert_eq!(graph.tight_weight(0, 1, 2), Some(2));
    }
}
