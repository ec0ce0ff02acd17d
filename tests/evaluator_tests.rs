//! Evaluator tests - feature values and weighted scores for known positions

use tetris_ai::core::{get_shape, Board};
use tetris_ai::engine::{evaluate, evaluate_placement, Features, WEIGHTS};
use tetris_ai::types::{PieceKind, Rotation};

fn o_on_empty_board(column: i8) -> Features {
    let board = Board::new();
    let eval = evaluate_placement(&board, PieceKind::O, Rotation::North, column, 18).unwrap();
    assert!(eval.cleared_rows.is_empty());
    eval.features
}

#[test]
fn test_square_against_a_wall() {
    for column in [0, 8] {
        let f = o_on_empty_board(column);
        assert_eq!(f.holes, 0);
        assert_eq!(f.wells, 0);
        assert_eq!(f.eroded_cells, 0);
        assert_eq!(f.landing_height, 1.0);
        // 18 open rows with two transitions, the square's rows also two.
        assert_eq!(f.row_transitions, 40);
        assert_eq!(f.col_transitions, 20);
        assert_eq!(f.weighted(&WEIGHTS), -61.0);
    }
}

#[test]
fn test_square_in_the_middle() {
    let f = o_on_empty_board(4);
    assert_eq!(f.holes, 0);
    assert_eq!(f.wells, 0);
    assert_eq!(f.row_transitions, 44);
    assert_eq!(f.col_transitions, 20);
    assert_eq!(
        evaluate(&Board::new(), PieceKind::O, Rotation::North, 4, 18).unwrap(),
        -65.0
    );
}

#[test]
fn test_square_leaving_a_one_wide_gap_makes_wells() {
    // Column 0 is left between the wall and the square.
    let f = o_on_empty_board(1);
    assert_eq!(f.wells, 2);
    let f = o_on_empty_board(7);
    assert_eq!(f.wells, 2);
}

#[test]
fn test_vertical_i_clears_four_rows() {
    let board: Board = "
        #########.
        #########.
        #########.
        #########.
    "
    .parse()
    .unwrap();

    let tall_i = get_shape(PieceKind::I, Rotation::East);
    let row = board.resolve_landing(tall_i, 9).unwrap();
    assert_eq!(row, 16);

    let eval = evaluate_placement(&board, PieceKind::I, Rotation::East, 9, row).unwrap();
    assert_eq!(eval.cleared_rows.as_slice(), &[16, 17, 18, 19]);
    assert_eq!(eval.features.eroded_cells, 16);
    assert_eq!(eval.features.holes, 0);
    assert_eq!(eval.features.wells, 0);
    assert_eq!(eval.features.landing_height, 2.0);
    // After the clear the board is empty again.
    assert_eq!(eval.features.row_transitions, 40);
    assert_eq!(eval.features.col_transitions, 20);
    assert_eq!(eval.score, -40.0 - 20.0 - 2.0 + 16.0);
}

#[test]
fn test_covered_cell_counts_as_hole() {
    let flat = Board::new();
    let mut roofed = Board::new();
    roofed.set(9, 18, Some(PieceKind::T));

    // Same placement, one extra covered cell under the roof at (9, 19).
    let a = evaluate_placement(&flat, PieceKind::O, Rotation::North, 0, 18).unwrap();
    let b = evaluate_placement(&roofed, PieceKind::O, Rotation::North, 0, 18).unwrap();
    assert_eq!(a.features.holes, 0);
    assert_eq!(b.features.holes, 1);
}

#[test]
fn test_evaluate_does_not_touch_the_board() {
    let board: Board = "#########.".parse().unwrap();
    let before = board;
    evaluate(&board, PieceKind::I, Rotation::East, 9, 16).unwrap();
    assert_eq!(board, before);
}
