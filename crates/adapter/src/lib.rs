//! Adapter - drives the decision engine over a line protocol
//!
//! An external game (or a piece generator) writes piece letters to the
//! session's input; the session answers each committed turn with the chosen
//! operation and the running score.
//!
//! # Protocol Overview
//!
//! ```text
//! in:  OT        falling O, next T
//! out: 0 0       rotation index, column
//!      0         score so far
//! in:  L         next piece
//! out: ...       decision for T
//! in:  X         end of sequence: the session decides for L, then stops
//! out: ...
//! ```
//!
//! `E` ends the session at once; end of input ends it as well.
//!
//! # Configuration
//!
//! [`SessionConfig::from_env`] reads:
//!
//! - `TETRIS_AI_FORMAT`: `text` (default) or `json` turn reports
//! - `TETRIS_AI_DETAIL`: render the board after each turn to stderr
//! - `TETRIS_AI_COLOR`: `0` turns detail colors off
//! - `TETRIS_AI_STOP_ON_DEADLINE`: stop once the stack reaches the deadline row
//!
//! See [`protocol`] for the token and report types and [`session`] for the
//! driving loop.

pub mod protocol;
pub mod session;

pub use tetris_ai_core as core;
pub use tetris_ai_engine as engine;
pub use tetris_ai_term as term;
pub use tetris_ai_types as types;

pub use protocol::{
    parse_first_line, parse_token_line, write_sequence, OutputFormat, ProtocolError, Token,
    TurnReport,
};
pub use session::{Session, SessionConfig, SessionEnd, SessionSummary};
