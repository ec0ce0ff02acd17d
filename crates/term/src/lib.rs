//! Terminal detail view for the decision session.
//!
//! After each committed turn the session can print what it did: the applied
//! operation, the board with row and column labels, the statistics panel and
//! a preview of the piece that falls next. Cells are colored per piece kind
//! with crossterm unless color is switched off.

pub mod detail;
pub mod renderer;

pub use tetris_ai_core as core;
pub use tetris_ai_types as types;

pub use detail::{piece_color, DetailView};
pub use renderer::DetailRenderer;
