//! Move search - exhaustive placement search with deterministic tie-break
//!
//! Every (rotation, column) pair is tried in a fixed order, rotation-major.
//! Pairs without a landing row are skipped, the rest are scored by the
//! evaluator. Among all candidates sharing the maximal score (exact equality)
//! the one with the highest [`tie_break_priority`] wins; equal priorities keep
//! the first candidate encountered.

use std::fmt;

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use tetris_ai_core::{get_shape, Board, GameState, PlaceError};
use tetris_ai_types::{Operation, PieceKind, Rotation, BOARD_WIDTH};

use crate::evaluator::evaluate;

/// Upper bound on candidates: 4 rotations x 10 columns
pub const MAX_CANDIDATES: usize = 4 * BOARD_WIDTH as usize;

/// Center of the board in column units
const CENTER_COLUMN: f64 = (BOARD_WIDTH as f64 - 1.0) / 2.0;

/// Fewest-rotations tie-break, applied after center distance and leftness.
///
/// Kept switched off: decisions must match the established placement order.
pub const ROTATION_TIE_BREAK: bool = false;

pub type Candidates = ArrayVec<Candidate, MAX_CANDIDATES>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    NoFallingPiece,
    NoLegalPlacement { kind: PieceKind },
    Place(PlaceError),
}

impl SearchError {
    pub fn code(self) -> &'static str {
        match self {
            SearchError::NoFallingPiece => "no_falling_piece",
            SearchError::NoLegalPlacement { .. } => "no_legal_placement",
            SearchError::Place(e) => e.code(),
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SearchError::NoFallingPiece => "no piece to decide for",
            SearchError::NoLegalPlacement { .. } => "no rotation and column can land the piece",
            SearchError::Place(e) => e.message(),
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NoLegalPlacement { kind } => write!(f, "{} ({})", self.message(), kind),
            SearchError::Place(e) => write!(f, "resolved placement rejected: {}", e),
            _ => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<PlaceError> for SearchError {
    fn from(e: PlaceError) -> Self {
        SearchError::Place(e)
    }
}

/// A scored, landable placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub operation: Operation,
    pub landing_row: i8,
    pub score: f64,
}

/// Secondary ordering among equal scores: far from center first, then further left.
pub fn tie_break_priority(operation: &Operation) -> f64 {
    let column = operation.column as f64;
    let mut priority =
        100.0 * (column - CENTER_COLUMN).abs() + 10.0 * ((BOARD_WIDTH - 1) as f64 - column);
    if ROTATION_TIE_BREAK {
        priority -= operation.rotation.turns_from_spawn() as f64;
    }
    priority
}

/// Score every landable placement of `kind`, in search order
pub fn candidates(board: &Board, kind: PieceKind) -> Result<Candidates, SearchError> {
    let mut out = Candidates::new();

    for rotation in Rotation::ALL {
        let shape = get_shape(kind, rotation);
        for column in 0..BOARD_WIDTH as i8 {
            let Some(landing_row) = board.resolve_landing(shape, column) else {
                continue;
            };

            let score = evaluate(board, kind, rotation, column, landing_row)?;
            trace!(
                rotation = rotation.index(),
                column,
                landing_row,
                score,
                "candidate"
            );

            out.push(Candidate {
                operation: Operation::new(rotation, column),
                landing_row,
                score,
            });
        }
    }

    Ok(out)
}

/// Pick the winner among candidates: maximal score, then highest priority.
///
/// Returns `None` for an empty slice.
pub fn pick_best(candidates: &[Candidate]) -> Option<Candidate> {
    let best_score = candidates
        .iter()
        .map(|c| c.score)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut winner: Option<(Candidate, f64)> = None;
    for candidate in candidates.iter().filter(|c| c.score == best_score) {
        let priority = tie_break_priority(&candidate.operation);
        match winner {
            Some((_, best_priority)) if priority <= best_priority => {}
            _ => winner = Some((*candidate, priority)),
        }
    }

    winner.map(|(c, _)| c)
}

/// Best placement of `kind` on `board`
pub fn best_candidate(board: &Board, kind: PieceKind) -> Result<Candidate, SearchError> {
    let all = candidates(board, kind)?;
    let best = pick_best(&all).ok_or(SearchError::NoLegalPlacement { kind })?;

    debug!(
        piece = %kind,
        rotation = best.operation.rotation.index(),
        column = best.operation.column,
        landing_row = best.landing_row,
        score = best.score,
        considered = all.len(),
        "chose placement"
    );

    Ok(best)
}

/// Best operation for the state's falling piece
pub fn best_operation(state: &GameState) -> Result<Operation, SearchError> {
    let kind = state.falling().ok_or(SearchError::NoFallingPiece)?;
    best_candidate(state.board(), kind).map(|c| c.operation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(rotation: Rotation, column: i8, score: f64) -> Candidate {
        Candidate {
            operation: Operation::new(rotation, column),
            landing_row: 0,
            score,
        }
    }

    #[test]
    fn priority_prefers_edges_then_left() {
        let p = |c| tie_break_priority(&Operation::new(Rotation::North, c));
        assert_eq!(p(0), 540.0);
        assert_eq!(p(9), 450.0);
        assert_eq!(p(4), 100.0);
        assert_eq!(p(5), 90.0);
        assert!(p(0) > p(9));
        assert!(p(4) > p(5));
    }

    #[test]
    fn rotation_tie_break_is_inert() {
        let north = tie_break_priority(&Operation::new(Rotation::North, 3));
        let south = tie_break_priority(&Operation::new(Rotation::South, 3));
        assert_eq!(north, south);
    }

    #[test]
    fn pick_best_uses_exact_score_then_priority() {
        let all = [
            candidate(Rotation::North, 5, -10.0),
            candidate(Rotation::East, 0, -10.0),
            candidate(Rotation::North, 9, -10.5),
        ];
        let best = pick_best(&all).unwrap();
        assert_eq!(best.operation, Operation::new(Rotation::East, 0));
    }

    #[test]
    fn pick_best_keeps_first_on_equal_priority() {
        let all = [
            candidate(Rotation::East, 2, 1.0),
            candidate(Rotation::West, 2, 1.0),
        ];
        assert_eq!(pick_best(&all).unwrap().operation.rotation, Rotation::East);
    }

    #[test]
    fn pick_best_of_nothing() {
        assert!(pick_best(&[]).is_none());
    }

    #[test]
    fn i_piece_candidates_on_empty_board() {
        // A flat I fits in columns 0-6, the tall I in all ten.
        let all = candidates(&Board::new(), PieceKind::I).unwrap();
        assert_eq!(all.len(), 7 + 10 + 7 + 10);
    }
}
