//! Primal-dual augmenting-path search over the CSR edge store.
//!
//! The search maintains per-vertex potentials `u` / `v` with the feasibility
//! invariant `u[l] + v[r] >= w` for every stored edge. For each unmatched
//! left vertex it grows an alternating BFS tree over tight edges, batching a
//! dual adjustment whenever the tree gets stuck, and finishes by flipping one
//! augmenting path. Scratch arrays are rolled back per augmentation through
//! touched-index lists, keeping each reset at O(touched) rather than
//! O(|L| + |R|).
//!
//! Each augmentation is directed at a target cursor: the smallest column with
//! no partner. The cursor is a pseudo-neighbour of every scanned row through
//! an implicit free edge of weight 0, so a row whose potential reaches zero
//! can always complete its augmentation. The column range is extended with
//! virtual entries to `max(|L|, |R|)` so the cursor exists even when every
//! real column is matched; pairs landing on virtual columns are phantom and
//! are filtered out when results are packaged.

use std::collections::VecDeque;

use crate::graph::CsrGraph;
use crate::matching::UNMATCHED;

pub(crate) const INF: i64 = i64::MAX / 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SearchStats {
    pub(crate) greedy_matches: u64,
    pub(crate) augmentations: u64,
    pub(crate) dual_updates: u64,
}

/// Raw search output. `right_pair` spans the extended column range; the
/// entry points truncate and filter it.
#[derive(Debug)]
pub(crate) struct Pairing {
    pub(crate) left_pair: Vec<i32>,
    pub(crate) right_pair: Vec<i32>,
    pub(crate) u: Vec<i64>,
    pub(crate) v: Vec<i64>,
    pub(crate) stats: SearchStats,
}

pub(crate) fn search(graph: &CsrGraph, greedy_seed: bool) -> Pairing {
    let mut search = Search::new(graph);
    if greedy_seed {
        search.seed_greedy();
    }
    search.run();

    let Search {
        u,
        v,
        left_pair,
        right_pair,
        stats,
        ..
    } = search;
    Pairing {
        left_pair,
        right_pair,
        u,
        v,
        stats,
    }
}

struct Search<'g> {
    graph: &'g CsrGraph,
    u: Vec<i64>,
    v: Vec<i64>,
    left_pair: Vec<i32>,
    right_pair: Vec<i32>,
    /// Minimum reduced cost into each column over the rows currently in the
    /// tree; INF when untouched.
    slack: Vec<i64>,
    /// Row that achieved `slack[r]`; read back when flipping a path.
    parent: Vec<u32>,
    r_visited: Vec<bool>,
    r_on_edge: Vec<bool>,
    visited_l: Vec<u32>,
    visited_r: Vec<u32>,
    on_edge_r: Vec<u32>,
    queue: VecDeque<u32>,
    min_slack: i64,
    stats: SearchStats,
}

impl<'g> Search<'g> {
    fn new(graph: &'g CsrGraph) -> Self {
        let n_left = graph.n_left;
        let r_ext = graph.n_right.max(n_left);
        Search {
            graph,
            u: graph.row_max.clone(),
            v: vec![0; r_ext],
            left_pair: vec![UNMATCHED; n_left],
            right_pair: vec![UNMATCHED; r_ext],
            slack: vec![INF; r_ext],
            parent: vec![0; r_ext],
            r_visited: vec![false; r_ext],
            r_on_edge: vec![false; r_ext],
            visited_l: Vec::with_capacity(n_left),
            visited_r: Vec::with_capacity(r_ext),
            on_edge_r: Vec::with_capacity(r_ext),
            queue: VecDeque::with_capacity(n_left),
            min_slack: INF,
            stats: SearchStats::default(),
        }
    }

    /// Pairs each row with its first free tight edge, if any. Typically
    /// matches a large fraction of vertices before the search proper.
    fn seed_greedy(&mut self) {
        let graph = self.graph;
        for l in 0..graph.n_left {
            let (to, weights) = graph.row(l);
            for (&r, &w) in to.iter().zip(weights) {
                let r = r as usize;
                if self.u[l] + self.v[r] == w && self.right_pair[r] == UNMATCHED {
                    self.left_pair[l] = r as i32;
                    self.right_pair[r] = l as i32;
                    self.stats.greedy_matches += 1;
                    break;
                }
            }
        }
    }

    fn run(&mut self) {
        let mut target = 0usize;
        for root in 0..self.graph.n_left {
            if self.left_pair[root] != UNMATCHED {
                continue;
            }
            while self.right_pair[target] != UNMATCHED {
                target += 1;
            }
            debug_assert!(
                target < self.right_pair.len(),
                "a free column exists while any row is unmatched"
            );
            self.stats.augmentations += 1;
            self.augment(root as u32, target);
        }
    }

    /// One augmentation: alternate scan phases with batched dual updates
    /// until a path ending at a free column is flipped.
    fn augment(&mut self, root: u32, target: usize) {
        self.reset_scratch();
        self.queue.push_back(root);
        self.visited_l.push(root);
        loop {
            while let Some(l) = self.queue.pop_front() {
                if self.scan(l, target) {
                    return;
                }
            }
            self.stats.dual_updates += 1;
            if self.relax_duals() {
                return;
            }
        }
    }

    /// Scans the outgoing edges of row `l`, absorbing tight columns and
    /// recording slacks. Returns true when the augmentation completed.
    fn scan(&mut self, l: u32, target: usize) -> bool {
        let p = self.u[l as usize];
        debug_assert!(
            !self.r_visited[target],
            "the target leaves the tree only by finishing the augmentation"
        );

        // Free-edge shortcut: a zero-potential row takes the target
        // immediately, otherwise the row's potential is the slack of the
        // implicit weight-0 edge.
        if p == 0 && self.v[target] == 0 {
            self.parent[target] = l;
            let done = self.advance(target);
            debug_assert!(done, "the target column is free by construction");
            return done;
        }
        if p < self.slack[target] {
            self.slack[target] = p;
            self.parent[target] = l;
            if !self.r_on_edge[target] {
                self.r_on_edge[target] = true;
                self.on_edge_r.push(target as u32);
            }
            self.min_slack = self.min_slack.min(p);
        }

        let graph = self.graph;
        let (to, weights) = graph.row(l as usize);
        for (&r, &w) in to.iter().zip(weights) {
            let r = r as usize;
            if self.r_visited[r] {
                continue;
            }
            let diff = p + self.v[r] - w;
            debug_assert!(diff >= 0, "dual feasibility violated on a stored edge");
            if diff == 0 {
                self.parent[r] = l;
                if self.advance(r) {
                    return true;
                }
            } else if diff < self.slack[r] {
                self.slack[r] = diff;
                self.parent[r] = l;
                if !self.r_on_edge[r] {
                    self.r_on_edge[r] = true;
                    self.on_edge_r.push(r as u32);
                }
                self.min_slack = self.min_slack.min(diff);
            }
        }
        false
    }

    /// Batched dual update once the queue drains without finishing: shifts
    /// potentials by the minimum live slack and absorbs every column whose
    /// slack reaches zero. Returns true when the augmentation completed.
    fn relax_duals(&mut self) -> bool {
        let delta = self.min_slack;
        debug_assert!(
            delta > 0 && delta < INF,
            "a stuck tree always holds a positive finite slack"
        );

        for &l in &self.visited_l {
            self.u[l as usize] -= delta;
        }
        for &r in &self.visited_r {
            self.v[r as usize] += delta;
        }

        let mut next_min = INF;
        let mut i = 0;
        while i < self.on_edge_r.len() {
            let r = self.on_edge_r[i] as usize;
            i += 1;
            if !self.r_on_edge[r] {
                continue;
            }
            self.slack[r] -= delta;
            if self.slack[r] == 0 {
                if self.advance(r) {
                    return true;
                }
            } else {
                next_min = next_min.min(self.slack[r]);
            }
        }
        self.min_slack = next_min;
        false
    }

    /// Absorbs column `r` into the tree. When `r` is matched its partner row
    /// joins the queue; when `r` is free the augmenting path is flipped and
    /// true is returned.
    fn advance(&mut self, r: usize) -> bool {
        self.r_visited[r] = true;
        self.r_on_edge[r] = false;
        self.visited_r.push(r as u32);

        let l = self.right_pair[r];
        if l != UNMATCHED {
            self.queue.push_back(l as u32);
            self.visited_l.push(l as u32);
            return false;
        }

        let mut r = r as i32;
        while r != UNMATCHED {
            let l = self.parent[r as usize];
            let prev = self.left_pair[l as usize];
            self.left_pair[l as usize] = r;
            self.right_pair[r as usize] = l as i32;
            r = prev;
        }
        true
    }

    fn reset_scratch(&mut self) {
        for &r in &self.visited_r {
            self.r_visited[r as usize] = false;
        }
        self.visited_r.clear();
        for &r in &self.on_edge_r {
            self.r_on_edge[r as usize] = false;
            self.slack[r as usize] = INF;
        }
        self.on_edge_r.clear();
        self.visited_l.clear();
        self.queue.clear();
        self.min_slack = INF;
    }
}
