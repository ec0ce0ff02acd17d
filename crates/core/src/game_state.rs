//! Game state module - the value one decision is made against
//!
//! A `GameState` is replaced, never edited, on each committed turn: the turn
//! controller consumes the old value and returns the next one. The core keeps no
//! history beyond that single value.

use crate::scoring::Statistics;
use crate::types::PieceKind;
use crate::Board;

/// Complete game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    /// Piece to decide for; `None` once the piece sequence has run out.
    falling: Option<PieceKind>,
    /// Upcoming piece; `None` is the "unfilled" slot awaiting the caller.
    next: Option<PieceKind>,
    /// Latched once the deadline row has been seen occupied.
    deadline_touched: bool,
    statistics: Statistics,
}

impl GameState {
    /// Start a game on an empty board
    pub fn new(falling: PieceKind, next: Option<PieceKind>) -> Self {
        Self::from_parts(Board::new(), Some(falling), next, false, Statistics::new())
    }

    /// Assemble a state from its parts (mid-game positions, replays, tests)
    pub fn from_parts(
        board: Board,
        falling: Option<PieceKind>,
        next: Option<PieceKind>,
        deadline_touched: bool,
        statistics: Statistics,
    ) -> Self {
        Self {
            board,
            falling,
            next,
            deadline_touched,
            statistics,
        }
    }

    /// Same state on a different board
    pub fn with_board(self, board: Board) -> Self {
        Self { board, ..self }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn falling(&self) -> Option<PieceKind> {
        self.falling
    }

    pub fn next(&self) -> Option<PieceKind> {
        self.next
    }

    /// Whether the next-piece slot is waiting to be filled
    pub fn is_next_unfilled(&self) -> bool {
        self.next.is_none()
    }

    pub fn deadline_touched(&self) -> bool {
        self.deadline_touched
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }
}
