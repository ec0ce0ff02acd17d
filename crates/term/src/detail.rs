//! DetailView: lays out one committed turn as terminal text.
//!
//! This module is pure (no I/O): it encodes into a caller-owned byte buffer,
//! so it can be unit-tested by inspecting the bytes.

use anyhow::Result;
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};

use crate::core::{get_preview_shape, GameState, Statistics};
use crate::types::{Operation, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, DEADLINE_ROW, MAX_CLEARED_ROWS};

/// Two characters per cell to compensate for glyph aspect ratio.
const FILLED: &str = "[]";
const EMPTY: &str = "  ";

const PREVIEW_SIZE: i8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailView {
    color: bool,
}

impl Default for DetailView {
    fn default() -> Self {
        Self { color: true }
    }
}

impl DetailView {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Encode the whole view for a turn that applied `operation` and produced `state`
    pub fn render_into(&self, operation: Operation, state: &GameState, out: &mut Vec<u8>) -> Result<()> {
        out.queue(Print(format!(
            "operation: rotation={}, column={}\n\n",
            operation.rotation.index(),
            operation.column
        )))?;
        self.render_board_into(state, out)?;
        render_statistics_into(state.statistics(), out)?;
        self.render_preview_into(state.falling(), out)?;
        out.queue(Print("\n"))?;
        Ok(())
    }

    fn render_board_into(&self, state: &GameState, out: &mut Vec<u8>) -> Result<()> {
        let board = state.board();

        out.queue(Print("     "))?;
        for x in 0..BOARD_WIDTH {
            out.queue(Print(format!("{} ", x)))?;
        }
        out.queue(Print("\n"))?;
        out.queue(Print(horizontal_rule()))?;

        for y in 0..BOARD_HEIGHT as i8 {
            out.queue(Print(format!("{:2} |", y)))?;
            for x in 0..BOARD_WIDTH as i8 {
                self.cell_into(board.get(x, y).flatten(), out)?;
            }
            out.queue(Print("|"))?;
            if y == DEADLINE_ROW as i8 {
                let mark = if state.deadline_touched() {
                    " deadline (touched)"
                } else {
                    " deadline"
                };
                out.queue(Print(mark))?;
            }
            out.queue(Print("\n"))?;
        }

        out.queue(Print(horizontal_rule()))?;
        Ok(())
    }

    fn render_preview_into(&self, falling: Option<PieceKind>, out: &mut Vec<u8>) -> Result<()> {
        out.queue(Print("       falling piece\n"))?;
        out.queue(Print("       +------------+\n"))?;
        out.queue(Print("       |            |\n"))?;

        match falling {
            Some(kind) => {
                let shape = get_preview_shape(kind);
                for dy in 0..PREVIEW_SIZE {
                    out.queue(Print("       |  "))?;
                    for dx in 0..PREVIEW_SIZE {
                        let cell = shape.is_filled(dx, dy).then_some(kind);
                        self.cell_into(cell, out)?;
                    }
                    out.queue(Print("  |\n"))?;
                }
            }
            None => {
                out.queue(Print("       |   (none)   |\n"))?;
            }
        }

        out.queue(Print("       |            |\n"))?;
        out.queue(Print("       +------------+\n"))?;
        Ok(())
    }

    fn cell_into(&self, cell: Option<PieceKind>, out: &mut Vec<u8>) -> Result<()> {
        match cell {
            Some(kind) if self.color => {
                out.queue(SetForegroundColor(piece_color(kind)))?;
                out.queue(Print(FILLED))?;
                out.queue(ResetColor)?;
            }
            Some(_) => {
                out.queue(Print(FILLED))?;
            }
            None => {
                out.queue(Print(EMPTY))?;
            }
        }
        Ok(())
    }
}

fn horizontal_rule() -> String {
    format!("   +{}+\n", "-".repeat(BOARD_WIDTH as usize * 2))
}

fn render_statistics_into(stats: &Statistics, out: &mut Vec<u8>) -> Result<()> {
    out.queue(Print("//=================\\\\\n"))?;
    out.queue(Print(format!("statistics:\n- score: {}\n", stats.score())))?;
    out.queue(Print(format!("- placed_pieces: {}\n", stats.placed_pieces())))?;
    out.queue(Print("- cleared_lines:\n"))?;
    for lines in 1..=MAX_CLEARED_ROWS {
        out.queue(Print(format!(
            "  - {} lines: {}\n",
            lines,
            stats.clears_of_size(lines)
        )))?;
    }
    out.queue(Print("\\\\=================//\n"))?;
    Ok(())
}

pub fn piece_color(kind: PieceKind) -> Color {
    let (r, g, b) = match kind {
        PieceKind::I => (80, 220, 220),
        PieceKind::O => (240, 220, 80),
        PieceKind::T => (200, 120, 220),
        PieceKind::S => (100, 220, 120),
        PieceKind::Z => (220, 80, 80),
        PieceKind::J => (80, 120, 220),
        PieceKind::L => (255, 165, 0),
    };
    Color::Rgb { r, g, b }
}
