//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation; boards are `Copy`
//! so search and evaluation work on cheap scratch copies.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, DEADLINE_ROW, MAX_CLEARED_ROWS};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// Indices of full rows, top to bottom
pub type FullRows = ArrayVec<usize, MAX_CLEARED_ROWS>;

/// Why a shape could not be stamped onto the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    OutOfBounds { x: i8, y: i8 },
    Overlap { x: i8, y: i8 },
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::OutOfBounds { .. } => "out_of_bounds",
            PlaceError::Overlap { .. } => "overlap",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::OutOfBounds { .. } => "target cell is outside the board",
            PlaceError::Overlap { .. } => "target cell is already occupied",
        }
    }
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (PlaceError::OutOfBounds { x, y } | PlaceError::Overlap { x, y }) = *self;
        write!(f, "{} at ({}, {})", self.message(), x, y)
    }
}

impl std::error::Error for PlaceError {}

/// Why a textual board could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    TooManyRows(usize),
    BadRowWidth { row: usize, width: usize },
    BadCell { row: usize, column: usize, found: char },
}

impl BoardParseError {
    pub fn code(&self) -> &'static str {
        match self {
            BoardParseError::TooManyRows(_) => "too_many_rows",
            BoardParseError::BadRowWidth { .. } => "bad_row_width",
            BoardParseError::BadCell { .. } => "bad_cell",
        }
    }
}

impl fmt::Display for BoardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardParseError::TooManyRows(n) => {
                write!(f, "board has {} rows, at most {} allowed", n, HEIGHT)
            }
            BoardParseError::BadRowWidth { row, width } => {
                write!(f, "row {} has {} cells, expected {}", row, width, WIDTH)
            }
            BoardParseError::BadCell { row, column, found } => {
                write!(f, "unexpected {:?} at row {} column {}", found, row, column)
            }
        }
    }
}

impl std::error::Error for BoardParseError {}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Occupancy with out-of-bounds cells reported as filled (walls, floor, ceiling)
    #[inline]
    pub fn is_solid(&self, x: i8, y: i8) -> bool {
        !matches!(self.get(x, y), Some(None))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Number of occupied cells on the whole board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Check that every mino of `shape` at offset (x, y) lands on an empty in-bounds cell
    pub fn check_placement(&self, shape: &Shape, x: i8, y: i8) -> Result<(), PlaceError> {
        for &(dx, dy) in shape.minos() {
            let (px, py) = (x + dx, y + dy);
            match self.get(px, py) {
                None => return Err(PlaceError::OutOfBounds { x: px, y: py }),
                Some(Some(_)) => return Err(PlaceError::Overlap { x: px, y: py }),
                Some(None) => {}
            }
        }
        Ok(())
    }

    /// Stamp `shape` onto the board with its top-left corner at (x, y).
    ///
    /// Nothing is written unless every target cell is empty and in bounds.
    /// Full rows are left in place.
    pub fn place(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) -> Result<(), PlaceError> {
        self.check_placement(shape, x, y)?;

        for &(dx, dy) in shape.minos() {
            self.set(x + dx, y + dy, Some(kind));
        }

        Ok(())
    }

    /// Copy of this board with `shape` stamped at (x, y)
    pub fn with_placed(
        &self,
        shape: &Shape,
        x: i8,
        y: i8,
        kind: PieceKind,
    ) -> Result<Board, PlaceError> {
        let mut next = *self;
        next.place(shape, x, y, kind)?;
        Ok(next)
    }

    /// Whether any cell above (x, y) in column x is occupied
    fn is_covered(&self, x: i8, y: i8) -> bool {
        (0..y).any(|row| self.is_occupied(x, row))
    }

    /// Whether `shape` can rest at row `y` after falling straight down column `x`:
    /// every mino is empty and in bounds, and nothing sits above any mino.
    pub fn is_drop_reachable(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.minos().iter().all(|&(dx, dy)| {
            let (px, py) = (x + dx, y + dy);
            self.is_valid(px, py) && !self.is_covered(px, py)
        })
    }

    /// Simulate a hard drop of `shape` with its left edge in column `x`.
    ///
    /// Returns the lowest reachable row for the shape's top edge, or `None`
    /// when the shape cannot rest anywhere in this column.
    pub fn resolve_landing(&self, shape: &Shape, x: i8) -> Option<i8> {
        (0..BOARD_HEIGHT as i8)
            .rev()
            .find(|&y| self.is_drop_reachable(shape, x, y))
    }

    /// Indices of all full rows, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if more than four rows are full. A board only reaches that state by
    /// skipping the clear after a placement, which breaks the board invariant.
    pub fn full_rows(&self) -> FullRows {
        let mut rows = FullRows::new();
        for y in (0..HEIGHT).filter(|&y| self.is_row_full(y)) {
            rows.push(y);
        }
        rows
    }

    /// Remove a row and shift all rows above down by one
    /// Returns the number of lines cleared (1 or 0)
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= HEIGHT {
            return 0;
        }

        // copy_within handles the overlapping range
        self.cells.copy_within(0..y * WIDTH, WIDTH);

        for cell in &mut self.cells[..WIDTH] {
            *cell = None;
        }

        1
    }

    /// Remove the given rows.
    ///
    /// `rows` must be distinct and ascending (as produced by [`Board::full_rows`]).
    /// Clearing top-most first keeps the remaining indices valid, because a clear
    /// only moves rows that are above it.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        debug_assert!(rows.windows(2).all(|w| w[0] < w[1]), "rows must ascend");
        rows.iter().map(|&y| self.clear_row(y)).sum()
    }

    /// Clear all full rows and return their pre-clear indices (top to bottom)
    pub fn clear_full_rows(&mut self) -> FullRows {
        let rows = self.full_rows();
        self.clear_rows(&rows);
        rows
    }

    /// Whether the stack has reached the deadline row
    pub fn touches_deadline(&self) -> bool {
        let start = DEADLINE_ROW as usize * WIDTH;
        self.cells[start..start + WIDTH].iter().any(|c| c.is_some())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Text form: one line per row, `.` for empty and `#` (or a piece letter) for filled.
///
/// Fewer than 20 lines describe the bottom of the board; missing top rows are empty.
/// Blank lines and surrounding whitespace are ignored.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if lines.len() > HEIGHT {
            return Err(BoardParseError::TooManyRows(lines.len()));
        }

        let mut board = Board::new();
        let top = HEIGHT - lines.len();

        for (i, line) in lines.iter().enumerate() {
            let row = top + i;
            let width = line.chars().count();
            if width != WIDTH {
                return Err(BoardParseError::BadRowWidth { row, width });
            }

            for (column, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    '#' => Some(PieceKind::I),
                    other => match PieceKind::from_char(other) {
                        Some(kind) => Some(kind),
                        None => {
                            return Err(BoardParseError::BadCell {
                                row,
                                column,
                                found: other,
                            })
                        }
                    },
                };
                board.cells[row * WIDTH + column] = cell;
            }
        }

        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                f.write_str(if cell.is_some() { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::get_shape;
    use crate::types::Rotation;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_solid_treats_outside_as_filled() {
        let board = Board::new();
        assert!(board.is_solid(-1, 5));
        assert!(board.is_solid(10, 5));
        assert!(board.is_solid(3, -1));
        assert!(board.is_solid(3, 20));
        assert!(!board.is_solid(3, 5));
    }

    #[test]
    fn test_failed_place_leaves_board_untouched() {
        let mut board = Board::new();
        board.set(1, 19, Some(PieceKind::T));
        let before = board;

        let o = get_shape(PieceKind::O, Rotation::North);
        let err = board.place(o, 0, 18, PieceKind::O).unwrap_err();
        assert_eq!(err, PlaceError::Overlap { x: 1, y: 19 });
        assert_eq!(board, before);

        let err = board.place(o, 9, 0, PieceKind::O).unwrap_err();
        assert_eq!(err, PlaceError::OutOfBounds { x: 10, y: 0 });
        assert_eq!(board, before);
    }

    #[test]
    fn test_covered_cells_are_unreachable() {
        // An overhang at (2, 10) hides the empty floor under it.
        let mut board = Board::new();
        board.set(2, 10, Some(PieceKind::I));

        let tall = get_shape(PieceKind::I, Rotation::East);
        assert_eq!(board.resolve_landing(tall, 2), Some(6));
        assert_eq!(board.resolve_landing(tall, 3), Some(16));
    }

    #[test]
    fn test_clear_row_shifts_rows_above() {
        let board: Board = "\
            #.........
            ##########
            ..#.......
        "
        .parse()
        .unwrap();

        let mut cleared = board;
        assert_eq!(cleared.clear_full_rows().as_slice(), &[18]);
        assert!(cleared.is_occupied(0, 18));
        assert!(cleared.is_occupied(2, 19));
        assert_eq!(cleared.occupied_count(), 2);
    }

    #[test]
    fn test_display_roundtrips_occupancy() {
        let board: Board = "###.......\n#########.".parse().unwrap();
        let text = board.to_string();
        let back: Board = text.parse().unwrap();
        assert_eq!(back.to_string(), text);
        assert_eq!(text.lines().count(), 20);
    }

    #[test]
    fn test_parse_rejects_bad_rows() {
        assert_eq!(
            "###".parse::<Board>().unwrap_err(),
            BoardParseError::BadRowWidth { row: 19, width: 3 }
        );
        assert_eq!(
            "....?.....".parse::<Board>().unwrap_err(),
            BoardParseError::BadCell {
                row: 19,
                column: 4,
                found: '?'
            }
        );
    }
}
