//! Placement evaluator - one-piece heuristic score
//!
//! Scores a hypothetical placement with six weighted features (Dellacherie style):
//!
//! | feature | board | weight |
//! |---------|-------|--------|
//! | holes | after clear | -4 |
//! | wells | after clear | -1 |
//! | row transitions | after clear | -1 |
//! | column transitions | after clear | -1 |
//! | landing height | before clear | -1 |
//! | eroded cells | before clear | +1 |
//!
//! Out-of-bounds cells count as filled for wells and transitions, so the side
//! walls, the floor and the space above row 0 all behave like blocks.

use tetris_ai_core::{get_shape, Board, FullRows, PlaceError};
use tetris_ai_types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: i8 = BOARD_WIDTH as i8;
const HEIGHT: i8 = BOARD_HEIGHT as i8;

/// Fixed feature weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub holes: f64,
    pub wells: f64,
    pub row_transitions: f64,
    pub col_transitions: f64,
    pub landing_height: f64,
    pub eroded_cells: f64,
}

pub const WEIGHTS: Weights = Weights {
    holes: -4.0,
    wells: -1.0,
    row_transitions: -1.0,
    col_transitions: -1.0,
    landing_height: -1.0,
    eroded_cells: 1.0,
};

/// Raw feature values for one placement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Features {
    pub holes: u32,
    pub wells: u32,
    pub row_transitions: u32,
    pub col_transitions: u32,
    pub landing_height: f64,
    pub eroded_cells: u32,
}

impl Features {
    pub fn weighted(&self, w: &Weights) -> f64 {
        w.holes * self.holes as f64
            + w.wells * self.wells as f64
            + w.row_transitions * self.row_transitions as f64
            + w.col_transitions * self.col_transitions as f64
            + w.landing_height * self.landing_height
            + w.eroded_cells * self.eroded_cells as f64
    }
}

/// Everything the evaluator learned about one placement
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub features: Features,
    pub score: f64,
    /// Rows the placement completes, pre-clear indices top to bottom
    pub cleared_rows: FullRows,
}

/// Score placing `kind` at `rotation` with its top-left corner at (`column`, `landing_row`).
///
/// `landing_row` should come from [`Board::resolve_landing`]; any other row is
/// still scored as long as the piece fits there.
pub fn evaluate(
    board: &Board,
    kind: PieceKind,
    rotation: Rotation,
    column: i8,
    landing_row: i8,
) -> Result<f64, PlaceError> {
    evaluate_placement(board, kind, rotation, column, landing_row).map(|e| e.score)
}

/// Like [`evaluate`], keeping the individual features
pub fn evaluate_placement(
    board: &Board,
    kind: PieceKind,
    rotation: Rotation,
    column: i8,
    landing_row: i8,
) -> Result<Evaluation, PlaceError> {
    let shape = get_shape(kind, rotation);

    let placed = board.with_placed(shape, column, landing_row, kind)?;
    let cleared_rows = placed.full_rows();

    let mut cleared = placed;
    cleared.clear_rows(&cleared_rows);

    let piece_cells_cleared = shape
        .minos()
        .iter()
        .filter(|&&(_, dy)| cleared_rows.contains(&((landing_row + dy) as usize)))
        .count() as u32;

    let features = Features {
        holes: count_holes(&cleared),
        wells: count_wells(&cleared),
        row_transitions: row_transitions(&cleared),
        col_transitions: column_transitions(&cleared),
        landing_height: HEIGHT as f64 - (landing_row as f64 + shape.height() as f64 / 2.0),
        eroded_cells: piece_cells_cleared * cleared_rows.len() as u32,
    };

    Ok(Evaluation {
        score: features.weighted(&WEIGHTS),
        features,
        cleared_rows,
    })
}

/// Empty cells with at least one filled cell anywhere above them in their column
pub fn count_holes(board: &Board) -> u32 {
    let mut holes = 0;
    for x in 0..WIDTH {
        let mut covered = false;
        for y in 0..HEIGHT {
            if board.is_occupied(x, y) {
                covered = true;
            } else if covered {
                holes += 1;
            }
        }
    }
    holes
}

/// Empty cells whose left and right neighbours are both filled (walls count)
pub fn count_wells(board: &Board) -> u32 {
    let mut wells = 0;
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            if board.is_valid(x, y) && board.is_solid(x - 1, y) && board.is_solid(x + 1, y) {
                wells += 1;
            }
        }
    }
    wells
}

/// Filled/empty changes along each row, with a solid wall on both sides
pub fn row_transitions(board: &Board) -> u32 {
    let mut transitions = 0;
    for y in 0..HEIGHT {
        for x in -1..WIDTH {
            if board.is_solid(x, y) != board.is_solid(x + 1, y) {
                transitions += 1;
            }
        }
    }
    transitions
}

/// Filled/empty changes down each column, solid above row 0 and below the floor
pub fn column_transitions(board: &Board) -> u32 {
    let mut transitions = 0;
    for x in 0..WIDTH {
        for y in -1..HEIGHT {
            if board.is_solid(x, y) != board.is_solid(x, y + 1) {
                transitions += 1;
            }
        }
    }
    transitions
}
