//! Caller-facing matching result.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Pairing-array value marking an unmatched vertex.
pub const UNMATCHED: i32 = -1;

/// Result of a solver run: two parallel pairing arrays plus the objective
/// value in the units of the entry point (true cost sum for the cost-matrix
/// path, matched edge weight for the adjacency path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matching {
    /// Right vertex matched to each left vertex, or [`UNMATCHED`]. The
    /// cost-matrix path indexes this by original row and stores original
    /// column indices.
    pub left_pair: Vec<i32>,
    /// Left vertex matched to each right vertex, or [`UNMATCHED`]. Empty on
    /// the cost-matrix path when the matrix was transposed internally;
    /// callers of that path should read `left_pair` only.
    pub right_pair: Vec<i32>,
    /// Objective value: minimised cost sum (entry A) or maximised weight sum
    /// (entry B).
    pub weight_sum: i64,
}

impl Matching {
    pub fn matched_count(&self) -> usize {
        self.left_pair.iter().filter(|&&r| r != UNMATCHED).count()
    }

    /// Matched `(left, right)` pairs in left-vertex order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.left_pair
            .iter()
            .enumerate()
            .filter_map(|(l, &r)| (r != UNMATCHED).then(|| (l, r as usize)))
    }

    /// Checks mutual consistency of the pairing arrays: no right vertex is
    /// used twice and, when `right_pair` is present, every pair is recorded
    /// in both directions.
    pub fn is_consistent(&self) -> bool {
        let mut used = HashSet::new();
        for (l, &r) in self.left_pair.iter().enumerate() {
            if r == UNMATCHED {
                continue;
            }
            if r < 0 || !used.insert(r) {
                return false;
            }
            if !self.right_pair.is_empty()
                && self.right_pair.get(r as usize) != Some(&(l as i32))
            {
                return false;
            }
        }
        for (r, &l) in self.right_pair.iter().enumerate() {
            if l == UNMATCHED {
                continue;
            }
            if l < 0 || self.left_pair.get(l as usize) != Some(&(r as i32)) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistent_matching_passes() {
        let m = Matching {
            left_pair: vec![1, UNMATCHED, 0],
            right_pair: vec![2, 0],
            weight_sum: 7,
        };
        assert!(m.is_consistent());
        assert_eq!(m.matched_count(), 2);
        assert_eq!(m.pairs().collect::<Vec<_>>(), vec![(0, 1), (2, 0)]);
    }

    #[test]
    fn duplicate_right_vertex_is_inconsistent() {
        let m = Matching {
            left_pair: vec![0, 0],
            right_pair: vec![],
            weight_sum: 0,
        };
        assert!(!m.is_consistent());
    }

    #[test]
    fn one_sided_pair_is_inconsistent() {
        let m = Matching {
            left_pair: vec![1, UNMATCHED],
            right_pair: vec![UNMATCHED, UNMATCHED],
            weight_sum: 0,
        };
        assert!(!m.is_consistent());
    }

    #[test]
    fn empty_right_pair_checks_left_side_only() {
        let m = Matching {
            left_pair: vec![3, 1, UNMATCHED],
            right_pair: vec![],
            weight_sum: 12,
        };
        assert!(m.is_consistent());
    }
}
