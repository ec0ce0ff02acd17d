//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the decider.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, search, line protocol, detail view).
//!
//! # Board Dimensions
//!
//! The playfield is fixed:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Deadline row**: row 4; any occupied cell there means the stack is out of space
//!
//! # Examples
//!
//! ```
//! use tetris_ai_types::{Operation, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Parse a protocol character (case-insensitive)
//! let piece = PieceKind::from_char('t').unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.as_char(), 'T');
//!
//! // Rotations are addressed by index 0-3
//! assert_eq!(Rotation::from_index(1), Some(Rotation::East));
//! assert_eq!(Rotation::East.index(), 1);
//!
//! let op = Operation::new(Rotation::East, 9);
//! assert_eq!(op.to_string(), "1 9");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Row whose occupancy signals that the stack has run out of space.
pub const DEADLINE_ROW: u8 = 4;

/// Maximum number of rows a single placement can complete.
pub const MAX_CLEARED_ROWS: usize = 4;

/// Line clear scoring table, indexed by number of rows cleared.
///
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORES: [u32; MAX_CLEARED_ROWS + 1] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// - **I**: 4-long bar
/// - **O**: 2x2 square
/// - **T**: T-shaped
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse a piece kind from its protocol character (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_ai_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('z'), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase protocol character
    pub fn as_char(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Rotation states, addressed on the wire by index 0-3.
///
/// `North` is the catalog's first state; each following state is a further
/// clockwise quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// All rotations in search order (index 0 first).
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotation for a protocol index, `None` outside 0-3
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rotation::North),
            1 => Some(Rotation::East),
            2 => Some(Rotation::South),
            3 => Some(Rotation::West),
            _ => None,
        }
    }

    /// Protocol index (0-3)
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Number of clockwise quarter turns needed from the spawn state.
    ///
    /// Counter-clockwise turns count as one each, so `West` costs 1.
    pub fn turns_from_spawn(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East | Rotation::West => 1,
            Rotation::South => 2,
        }
    }
}

/// A candidate or chosen move: rotation state plus target column.
///
/// The column is the left edge of the shape's bounding box. The landing row
/// is never stored here; it is derived by resolving a hard drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    pub rotation: Rotation,
    pub column: i8,
}

impl Operation {
    pub fn new(rotation: Rotation, column: i8) -> Self {
        Self { rotation, column }
    }
}

impl fmt::Display for Operation {
    /// Wire form: `"{rotation index} {column}"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.rotation.index(), self.column)
    }
}

/// A cell on the board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by the specified piece kind
///
/// Game logic only looks at occupancy; the kind is kept for display.
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_chars_roundtrip_for_all_kinds() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
            assert_eq!(PieceKind::ALL[kind.index()], kind);
        }
    }

    #[test]
    fn sentinel_characters_are_not_pieces() {
        assert_eq!(PieceKind::from_char('X'), None);
        assert_eq!(PieceKind::from_char('E'), None);
        assert_eq!(PieceKind::from_char('?'), None);
    }

    #[test]
    fn rotation_indices_are_stable() {
        for (i, rot) in Rotation::ALL.iter().enumerate() {
            assert_eq!(rot.index() as usize, i);
            assert_eq!(Rotation::from_index(i as u8), Some(*rot));
        }
        assert_eq!(Rotation::from_index(4), None);
    }

    #[test]
    fn line_score_table() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
    }

    #[test]
    fn operation_wire_form() {
        assert_eq!(Operation::new(Rotation::West, 0).to_string(), "3 0");
    }
}
