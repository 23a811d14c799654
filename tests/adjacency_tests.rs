mod common;

use bimatch::{max_weight_matching, max_weight_matching_with_config, SolverConfig, UNMATCHED};
use common::brute_force_max_weight;

#[test]
fn unbalanced_graph_leaves_the_edgeless_vertex_unmatched() {
    let adjacency = vec![Vec::new(), vec![(0, 5)], vec![(1, 10)]];
    let result = max_weight_matching(3, 2, &adjacency).expect("valid input");

    assert_eq!(result.left_pair, vec![UNMATCHED, 0, 1]);
    assert_eq!(result.right_pair, vec![1, 2]);
    assert_eq!(result.weight_sum, 15);
    assert!(result.is_consistent());
}

#[test]
fn negative_edges_are_never_selected() {
    let adjacency = vec![vec![(0, 10), (1, -5)], vec![(0, -3), (1, 8)]];
    let result = max_weight_matching(2, 2, &adjacency).expect("valid input");

    assert_eq!(result.left_pair, vec![0, 1]);
    assert_eq!(result.weight_sum, 18);
    assert!(result.is_consistent());
}

#[test]
fn contested_column_is_resolved_for_maximum_weight() {
    // Both vertices want column 0; the lighter one must move to column 1.
    let adjacency = vec![vec![(0, 10), (1, 9)], vec![(0, 10), (1, 2)]];
    let result = max_weight_matching(2, 2, &adjacency).expect("valid input");

    assert_eq!(result.weight_sum, 19);
    assert_eq!(result.left_pair, vec![1, 0]);
    assert!(result.is_consistent());
}

#[test]
fn more_left_than_right_matches_the_heaviest_subset() {
    let adjacency = vec![
        vec![(0, 1)],
        vec![(0, 10)],
        vec![(1, 1)],
        vec![(1, 8)],
    ];
    let result = max_weight_matching(4, 2, &adjacency).expect("valid input");

    assert_eq!(result.weight_sum, 18);
    assert_eq!(result.matched_count(), 2);
    assert_eq!(result.left_pair, vec![UNMATCHED, 0, UNMATCHED, 1]);
    assert!(result.is_consistent());
}

#[test]
fn vertices_without_edges_stay_unmatched() {
    let adjacency = vec![Vec::new(), Vec::new()];
    let result = max_weight_matching(2, 3, &adjacency).expect("valid input");

    assert_eq!(result.left_pair, vec![UNMATCHED, UNMATCHED]);
    assert_eq!(result.right_pair, vec![UNMATCHED; 3]);
    assert_eq!(result.weight_sum, 0);
}

#[test]
fn zero_weight_edges_may_be_matched_at_no_gain() {
    let adjacency = vec![vec![(0, 0)]];
    let result = max_weight_matching(1, 1, &adjacency).expect("valid input");

    assert_eq!(result.weight_sum, 0);
    assert!(result.is_consistent());
}

#[test]
fn chain_displacement_reroutes_earlier_matches() {
    // Vertex 2 can only use column 1, forcing vertex 1 onto column 0 and
    // vertex 0 out of the way.
    let adjacency = vec![
        vec![(0, 6), (1, 6)],
        vec![(0, 5), (1, 7)],
        vec![(1, 9)],
    ];
    let result = max_weight_matching(3, 2, &adjacency).expect("valid input");

    assert_eq!(result.weight_sum, brute_force_max_weight(2, &adjacency));
    assert_eq!(result.weight_sum, 15);
    assert!(result.is_consistent());
}

#[test]
fn matches_brute_force_on_small_dense_graphs() {
    let adjacency = vec![
        vec![(0, 4), (1, 2), (2, 7)],
        vec![(0, 6), (1, 1), (2, 5)],
        vec![(0, 3), (1, 8), (2, 2)],
    ];
    let result = max_weight_matching(3, 3, &adjacency).expect("valid input");
    assert_eq!(result.weight_sum, brute_force_max_weight(3, &adjacency));
    assert_eq!(result.matched_count(), 3);
}

#[test]
fn retention_default_preserves_the_optimum_on_dense_rows() {
    // Every vertex sees every column; the |L| = 2 retention cap drops one
    // edge per row without losing the optimum.
    let adjacency = vec![
        vec![(0, 5), (1, 6), (2, 7)],
        vec![(0, 5), (1, 6), (2, 7)],
    ];
    let result = max_weight_matching(2, 3, &adjacency).expect("valid input");
    assert_eq!(result.weight_sum, 13);
    assert!(result.is_consistent());
}

#[test]
fn greedy_seed_toggle_preserves_the_objective() {
    let adjacency = vec![
        vec![(0, 3), (2, 9)],
        vec![(1, 4), (2, 8)],
        vec![(0, 2)],
    ];
    let config = SolverConfig {
        greedy_seed: false,
        ..SolverConfig::default()
    };
    let seeded = max_weight_matching(3, 3, &adjacency).expect("valid input");
    let unseeded =
        max_weight_matching_with_config(3, 3, &adjacency, &config).expect("valid input");
    assert_eq!(seeded.weight_sum, unseeded.weight_sum);
    assert_eq!(seeded.weight_sum, brute_force_max_weight(3, &adjacency));
}
