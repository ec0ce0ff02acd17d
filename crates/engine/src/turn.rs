//! Turn controller - one decide-and-apply cycle
//!
//! States alternate between two phases:
//!
//! 1. **awaiting decision**: a falling piece is set; [`commit_turn`] picks and applies a move
//! 2. **awaiting next piece**: the next slot is unfilled; [`fill_next`] supplies it
//!
//! Each call consumes the old [`GameState`] and returns its successor.

use std::fmt;

use tetris_ai_core::{get_shape, FullRows, GameState, PlaceError};
use tetris_ai_types::{Operation, PieceKind};

use crate::search::{best_candidate, SearchError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    /// The piece sequence has ended; there is nothing to decide for.
    NoFallingPiece,
    /// `fill_next` was called while the next slot already held a piece.
    NextAlreadyFilled,
    /// The requested operation has no landing row on this board.
    Unreachable { operation: Operation },
    Search(SearchError),
    Place(PlaceError),
}

impl TurnError {
    pub fn code(self) -> &'static str {
        match self {
            TurnError::NoFallingPiece => "no_falling_piece",
            TurnError::NextAlreadyFilled => "next_already_filled",
            TurnError::Unreachable { .. } => "unreachable",
            TurnError::Search(e) => e.code(),
            TurnError::Place(e) => e.code(),
        }
    }

    /// No legal placement exists for the falling piece: the game is lost.
    pub fn is_game_over(self) -> bool {
        matches!(
            self,
            TurnError::Search(SearchError::NoLegalPlacement { .. })
        )
    }
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::NoFallingPiece => f.write_str("no piece to decide for"),
            TurnError::NextAlreadyFilled => f.write_str("next piece is already filled"),
            TurnError::Unreachable { operation } => {
                write!(f, "operation {} has no landing row", operation)
            }
            TurnError::Search(e) => write!(f, "{}", e),
            TurnError::Place(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TurnError {}

impl From<SearchError> for TurnError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::NoFallingPiece => TurnError::NoFallingPiece,
            other => TurnError::Search(other),
        }
    }
}

impl From<PlaceError> for TurnError {
    fn from(e: PlaceError) -> Self {
        TurnError::Place(e)
    }
}

/// What one committed turn did
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub piece: PieceKind,
    pub operation: Operation,
    pub landing_row: i8,
    /// Pre-clear indices of the rows this placement removed
    pub cleared_rows: FullRows,
    /// State after the turn; its next slot is unfilled
    pub state: GameState,
}

/// Supply the upcoming piece. Only valid while the slot is unfilled.
pub fn fill_next(state: GameState, kind: PieceKind) -> Result<GameState, TurnError> {
    if !state.is_next_unfilled() {
        return Err(TurnError::NextAlreadyFilled);
    }

    Ok(GameState::from_parts(
        *state.board(),
        state.falling(),
        Some(kind),
        state.deadline_touched(),
        *state.statistics(),
    ))
}

/// Decide the best operation for the falling piece and apply it
pub fn commit_turn(state: GameState) -> Result<(Operation, GameState), TurnError> {
    let turn = play_turn(state)?;
    Ok((turn.operation, turn.state))
}

/// [`commit_turn`] keeping the landing row and cleared rows
pub fn play_turn(state: GameState) -> Result<Turn, TurnError> {
    let kind = state.falling().ok_or(TurnError::NoFallingPiece)?;
    let best = best_candidate(state.board(), kind)?;
    apply_turn(state, best.operation)
}

/// Apply a caller-chosen operation to the falling piece
pub fn apply_operation(state: GameState, operation: Operation) -> Result<GameState, TurnError> {
    apply_turn(state, operation).map(|t| t.state)
}

fn apply_turn(state: GameState, operation: Operation) -> Result<Turn, TurnError> {
    let kind = state.falling().ok_or(TurnError::NoFallingPiece)?;
    let shape = get_shape(kind, operation.rotation);

    let mut board = *state.board();
    let landing_row = board
        .resolve_landing(shape, operation.column)
        .ok_or(TurnError::Unreachable { operation })?;

    // Checked against the board as it stood before this piece lands.
    let deadline_touched = state.deadline_touched() || board.touches_deadline();

    board.place(shape, operation.column, landing_row, kind)?;
    let cleared_rows = board.clear_full_rows();

    let mut statistics = *state.statistics();
    statistics.record_placement(cleared_rows.len());

    Ok(Turn {
        piece: kind,
        operation,
        landing_row,
        cleared_rows,
        state: GameState::from_parts(board, state.next(), None, deadline_touched, statistics),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_ai_core::Board;
    use tetris_ai_types::Rotation;

    #[test]
    fn fill_next_requires_unfilled_slot() {
        let state = GameState::new(PieceKind::T, Some(PieceKind::O));
        assert_eq!(
            fill_next(state, PieceKind::I).unwrap_err(),
            TurnError::NextAlreadyFilled
        );

        let state = GameState::new(PieceKind::T, None);
        let filled = fill_next(state, PieceKind::I).unwrap();
        assert_eq!(filled.next(), Some(PieceKind::I));
        assert_eq!(filled.falling(), Some(PieceKind::T));
    }

    #[test]
    fn commit_advances_pieces_and_counts_placement() {
        let state = GameState::new(PieceKind::O, Some(PieceKind::T));
        let (op, next) = commit_turn(state).unwrap();

        assert_eq!(op, Operation::new(Rotation::North, 0));
        assert_eq!(next.falling(), Some(PieceKind::T));
        assert!(next.is_next_unfilled());
        assert_eq!(next.statistics().placed_pieces(), 1);
        assert_eq!(next.board().occupied_count(), 4);
    }

    #[test]
    fn commit_without_next_ends_the_sequence() {
        let state = GameState::new(PieceKind::O, None);
        let (_, next) = commit_turn(state).unwrap();
        assert_eq!(next.falling(), None);
        assert_eq!(commit_turn(next).unwrap_err(), TurnError::NoFallingPiece);
    }

    #[test]
    fn deadline_is_checked_before_placement() {
        // Stack reaching row 5 only: placing on top of it touches row 4 but the
        // flag is raised one turn later.
        let mut board = Board::new();
        for y in 5..20 {
            board.set(0, y, Some(PieceKind::I));
        }
        let state = GameState::new(PieceKind::O, Some(PieceKind::O)).with_board(board);

        let op = Operation::new(Rotation::North, 0);
        let after = apply_operation(state, op).unwrap();
        assert!(after.board().touches_deadline());
        assert!(!after.deadline_touched());

        let after = fill_next(after, PieceKind::O).unwrap();
        let after = apply_operation(after, Operation::new(Rotation::North, 8)).unwrap();
        assert!(after.deadline_touched());
    }

    #[test]
    fn unreachable_operation_is_rejected() {
        let state = GameState::new(PieceKind::O, None);
        let op = Operation::new(Rotation::North, 9);
        assert_eq!(
            apply_operation(state, op).unwrap_err(),
            TurnError::Unreachable { operation: op }
        );
    }
}
