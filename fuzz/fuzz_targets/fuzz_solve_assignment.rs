#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use bimatch::solve_assignment;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    rows: u8,
    cols: u8,
    cells: Vec<u16>,
}

fuzz_target!(|input: FuzzInput| {
    let h = (input.rows as usize % 16) + 1;
    let w = (input.cols as usize % 16) + 1;

    let mut cells = input.cells.iter().copied().map(i64::from).cycle();
    let costs: Vec<Vec<i64>> = (0..h)
        .map(|_| (0..w).map(|_| cells.next().unwrap_or(0)).collect())
        .collect();

    let result = solve_assignment(&costs).expect("rectangular input must solve");

    assert!(result.is_consistent());
    assert_eq!(result.left_pair.len(), h);
    assert_eq!(result.matched_count(), h.min(w));

    let recomputed: i64 = result.pairs().map(|(row, col)| costs[row][col]).sum();
    assert_eq!(result.weight_sum, recomputed);

    if h > w {
        assert!(result.right_pair.is_empty());
    } else {
        assert_eq!(result.right_pair.len(), w);
    }
});
