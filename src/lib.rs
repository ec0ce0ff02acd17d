//! tetris-ai (workspace facade crate).
//!
//! A single-piece placement decider for 10x20 Tetris: given the board and the
//! falling piece it picks one rotation and column by a weighted heuristic
//! over every reachable placement, then applies it.
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! exposes them as `tetris_ai::{types,core,engine,adapter,term}`.

pub use tetris_ai_adapter as adapter;
pub use tetris_ai_core as core;
pub use tetris_ai_engine as engine;
pub use tetris_ai_term as term;
pub use tetris_ai_types as types;
