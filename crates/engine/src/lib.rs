//! Decision engine - evaluator, move search and turn controller
//!
//! Everything here is a pure function of the board and the falling piece:
//! the same state always yields the same operation.
//!
//! - [`evaluator`]: six-feature heuristic score for one hypothetical placement
//! - [`search`]: tries every rotation and column, keeps the best candidate
//! - [`turn`]: applies the chosen operation and advances the piece queue
//!
//! ```
//! use tetris_ai_core::GameState;
//! use tetris_ai_engine::commit_turn;
//! use tetris_ai_types::PieceKind;
//!
//! let state = GameState::new(PieceKind::O, Some(PieceKind::I));
//! let (op, next) = commit_turn(state).unwrap();
//! assert_eq!(op.column, 0);
//! assert_eq!(next.falling(), Some(PieceKind::I));
//! ```

pub mod evaluator;
pub mod search;
pub mod turn;

pub use tetris_ai_core as core;
pub use tetris_ai_types as types;

pub use evaluator::{evaluate, evaluate_placement, Evaluation, Features, Weights, WEIGHTS};
pub use search::{
    best_candidate, best_operation, candidates, pick_best, tie_break_priority, Candidate,
    Candidates, SearchError,
};
pub use turn::{apply_operation, commit_turn, fill_next, play_turn, Turn, TurnError};
