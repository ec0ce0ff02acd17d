//! Core game model - pure, deterministic, and testable
//!
//! This crate holds the data the decider reasons about. It has **zero dependencies**
//! on search, I/O or rendering, making it:
//!
//! - **Deterministic**: boards and states are plain values, compared by value
//! - **Cheap to copy**: a `Board` is a flat `Copy` array, so search can try
//!   every candidate on its own scratch copy
//! - **Strict**: placements that overlap or leave the board are rejected,
//!   never partially applied
//!
//! # Module Structure
//!
//! - [`pieces`]: static tetromino catalog, four rotation states per kind
//! - [`board`]: 10x20 occupancy grid, hard-drop resolution, row clearing, deadline row
//! - [`scoring`]: line clear points and cumulative [`Statistics`]
//! - [`game_state`]: board + falling/next piece + deadline flag + statistics
//! - [`rng`]: seeded piece streams for feeding a session
//!
//! # Example
//!
//! ```
//! use tetris_ai_core::{get_shape, Board};
//! use tetris_ai_types::{PieceKind, Rotation};
//!
//! let mut board = Board::new();
//! let square = get_shape(PieceKind::O, Rotation::North);
//!
//! // Drop a square into the left corner
//! let row = board.resolve_landing(square, 0).unwrap();
//! assert_eq!(row, 18);
//! board.place(square, 0, row, PieceKind::O).unwrap();
//!
//! assert_eq!(board.occupied_count(), 4);
//! assert!(board.full_rows().is_empty());
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use tetris_ai_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardParseError, FullRows, PlaceError};
pub use game_state::GameState;
pub use pieces::{get_preview_shape, get_shape, MinoOffset, Shape};
pub use rng::{PieceStream, SimpleRng, StreamOrder};
pub use scoring::{calculate_line_score, Statistics};
