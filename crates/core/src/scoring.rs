//! Scoring module - line clear points and cumulative statistics
//!
//! There are no levels, combos or drop points: a placement earns points only
//! when it clears rows, looked up in a fixed table.

use crate::types::{LINE_SCORES, MAX_CLEARED_ROWS};

/// Points for clearing `lines` rows with one placement (0 outside 1-4)
pub fn calculate_line_score(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Cumulative counters for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Statistics {
    placed_pieces: u32,
    score: u32,
    total_lines_cleared: u32,
    /// Indexed by clear size; slot 0 is unused.
    clears_by_size: [u32; MAX_CLEARED_ROWS + 1],
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placed_pieces(&self) -> u32 {
        self.placed_pieces
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_lines_cleared(&self) -> u32 {
        self.total_lines_cleared
    }

    /// How many placements cleared exactly `lines` rows (1-4)
    pub fn clears_of_size(&self, lines: usize) -> u32 {
        match lines {
            1..=MAX_CLEARED_ROWS => self.clears_by_size[lines],
            _ => 0,
        }
    }

    /// Record one committed placement that cleared `lines` rows
    pub fn record_placement(&mut self, lines: usize) {
        debug_assert!(lines <= MAX_CLEARED_ROWS);

        self.placed_pieces += 1;
        if lines > 0 {
            self.score += calculate_line_score(lines);
            self.clears_by_size[lines] += 1;
            self.total_lines_cleared += lines as u32;
        }
    }
}
