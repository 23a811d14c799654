#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use bimatch::{max_weight_matching, SolveError};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    n_left: u8,
    n_right: u8,
    edges: Vec<(u8, u8, i16)>,
}

fuzz_target!(|input: FuzzInput| {
    let n_left = input.n_left as usize % 32;
    let n_right = input.n_right as usize % 32;

    let mut adjacency: Vec<Vec<(u32, i64)>> = vec![Vec::new(); n_left];
    for &(l, r, w) in input.edges.iter().take(256) {
        if n_left == 0 || n_right == 0 {
            break;
        }
        adjacency[l as usize % n_left].push((r as u32 % n_right as u32, i64::from(w)));
    }

    let result = match max_weight_matching(n_left, n_right, &adjacency) {
        Ok(result) => result,
        Err(SolveError::EmptySide { .. }) => {
            assert!((n_left == 0) != (n_right == 0));
            return;
        }
        Err(err) => panic!("unexpected error: {err}"),
    };

    assert!(result.is_consistent());
    assert_eq!(result.left_pair.len(), n_left);
    assert_eq!(result.right_pair.len(), n_right);

    let mut recomputed = 0i64;
    for (l, r) in result.pairs() {
        let weight = adjacency[l]
            .iter()
            .filter(|&&(to, _)| to as usize == r)
            .map(|&(_, w)| w)
            .max()
            .expect("matched pair must be a listed edge");
        assert!(weight >= 0, "negative edges are never selected");
        recomputed += weight;
    }
    assert_eq!(result.weight_sum, recomputed);
});
