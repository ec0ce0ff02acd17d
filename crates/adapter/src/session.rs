//! Session - drives the turn controller from a piece stream
//!
//! Reads tokens line by line, commits one turn per known falling piece and
//! writes a [`TurnReport`] after each. The session ends on:
//!
//! - `X` becoming the falling piece ([`SessionEnd::EndOfSequence`])
//! - `E` on any line ([`SessionEnd::Exit`])
//! - end of input ([`SessionEnd::EndOfInput`])
//! - no legal placement for the falling piece ([`SessionEnd::GameOver`])
//! - the deadline flag, when configured to stop on it ([`SessionEnd::DeadlineTouched`])
//!
//! Malformed input and I/O failures are errors, not session ends.

use std::env;
use std::fmt;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::core::{Board, GameState, Statistics};
use crate::engine::{fill_next, play_turn, Turn};
use crate::protocol::{parse_first_line, parse_token_line, OutputFormat, ProtocolError, Token, TurnReport};
use crate::term::{DetailRenderer, DetailView};

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub format: OutputFormat,
    /// Render the detail view to stderr after each turn
    pub detail: bool,
    /// Color cells in the detail view
    pub color: bool,
    /// End the session once the deadline flag is latched
    pub stop_on_deadline: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            detail: false,
            color: true,
            stop_on_deadline: false,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    ///
    /// - `TETRIS_AI_FORMAT`: `text` or `json`
    /// - `TETRIS_AI_DETAIL`: `1`/`true` enables the detail view
    /// - `TETRIS_AI_COLOR`: `0`/`false` disables colors
    /// - `TETRIS_AI_STOP_ON_DEADLINE`: `1`/`true` stops at the deadline
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`SessionConfig::from_env`] over an arbitrary variable source.
    /// Unset or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let format = lookup("TETRIS_AI_FORMAT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.format);
        let detail = lookup("TETRIS_AI_DETAIL")
            .and_then(|s| parse_flag(&s))
            .unwrap_or(defaults.detail);
        let color = lookup("TETRIS_AI_COLOR")
            .and_then(|s| parse_flag(&s))
            .unwrap_or(defaults.color);
        let stop_on_deadline = lookup("TETRIS_AI_STOP_ON_DEADLINE")
            .and_then(|s| parse_flag(&s))
            .unwrap_or(defaults.stop_on_deadline);

        Self {
            format,
            detail,
            color,
            stop_on_deadline,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    EndOfSequence,
    Exit,
    EndOfInput,
    GameOver,
    DeadlineTouched,
}

impl SessionEnd {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionEnd::EndOfSequence => "end_of_sequence",
            SessionEnd::Exit => "exit",
            SessionEnd::EndOfInput => "end_of_input",
            SessionEnd::GameOver => "game_over",
            SessionEnd::DeadlineTouched => "deadline_touched",
        }
    }
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub end: SessionEnd,
    pub statistics: Statistics,
    pub deadline_touched: bool,
}

pub struct Session<R, W> {
    input: R,
    output: W,
    config: SessionConfig,
    board: Board,
    detail: Option<DetailRenderer<Box<dyn Write>>>,
    line_no: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: SessionConfig) -> Self {
        let detail = config.detail.then(|| {
            let sink: Box<dyn Write> = Box::new(io::stderr());
            DetailRenderer::new(sink, DetailView::new(config.color))
        });

        Self {
            input,
            output,
            config,
            board: Board::new(),
            detail,
            line_no: 0,
        }
    }

    /// Start from a position other than the empty board
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Send the detail view somewhere other than stderr (enables it)
    pub fn with_detail_output(mut self, sink: impl Write + 'static) -> Self {
        let sink: Box<dyn Write> = Box::new(sink);
        self.detail = Some(DetailRenderer::new(sink, DetailView::new(self.config.color)));
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the input asks to stop or the game ends
    pub fn run(&mut self) -> Result<SessionSummary> {
        info!(
            format = %self.config.format,
            detail = self.detail.is_some(),
            stop_on_deadline = self.config.stop_on_deadline,
            "session started"
        );

        let summary = self.play()?;
        let stats = summary.statistics;
        info!(
            end = %summary.end,
            score = stats.score(),
            placed_pieces = stats.placed_pieces(),
            lines_cleared = stats.total_lines_cleared(),
            singles = stats.clears_of_size(1),
            doubles = stats.clears_of_size(2),
            triples = stats.clears_of_size(3),
            tetrises = stats.clears_of_size(4),
            deadline_touched = summary.deadline_touched,
            "session finished"
        );

        Ok(summary)
    }

    fn play(&mut self) -> Result<SessionSummary> {
        let first = self.next_line()?.ok_or(ProtocolError::MissingFirstLine)?;
        let (falling, next) = parse_first_line(&first)?;

        let mut sequence_ended = false;
        let falling = match falling {
            Token::Piece(kind) => kind,
            Token::EndOfSequence => return Ok(self.summary(SessionEnd::EndOfSequence, None)),
            Token::Exit => return Ok(self.summary(SessionEnd::Exit, None)),
        };
        let next = match next {
            Token::Piece(kind) => Some(kind),
            Token::EndOfSequence => {
                sequence_ended = true;
                None
            }
            Token::Exit => return Ok(self.summary(SessionEnd::Exit, None)),
        };

        let mut state = GameState::new(falling, next).with_board(self.board);

        let end = loop {
            if state.falling().is_none() {
                break SessionEnd::EndOfSequence;
            }

            let turn = match play_turn(state) {
                Ok(turn) => turn,
                Err(e) if e.is_game_over() => {
                    warn!(piece = ?state.falling(), "game over: {}", e);
                    break SessionEnd::GameOver;
                }
                Err(e) => return Err(e).context("committing turn"),
            };
            state = turn.state;
            self.report(&turn)?;

            if self.config.stop_on_deadline && state.deadline_touched() {
                break SessionEnd::DeadlineTouched;
            }

            if sequence_ended {
                continue;
            }

            let Some(line) = self.next_line()? else {
                break SessionEnd::EndOfInput;
            };
            match parse_token_line(self.line_no, &line)? {
                Token::Piece(kind) => state = fill_next(state, kind)?,
                Token::EndOfSequence => sequence_ended = true,
                Token::Exit => break SessionEnd::Exit,
            }
        };

        Ok(self.summary(end, Some(&state)))
    }

    fn summary(&self, end: SessionEnd, state: Option<&GameState>) -> SessionSummary {
        SessionSummary {
            end,
            statistics: state.map(|s| *s.statistics()).unwrap_or_default(),
            deadline_touched: state.is_some_and(|s| s.deadline_touched()),
        }
    }

    fn report(&mut self, turn: &Turn) -> Result<()> {
        debug!(
            piece = %turn.piece,
            operation = %turn.operation,
            landing_row = turn.landing_row,
            lines_cleared = turn.cleared_rows.len(),
            "turn committed"
        );

        if let Some(detail) = self.detail.as_mut() {
            detail
                .draw(turn.operation, &turn.state)
                .context("drawing detail view")?;
        }

        TurnReport::new(
            turn.operation,
            turn.landing_row,
            turn.cleared_rows.len(),
            &turn.state,
        )
        .write_to(&mut self.output, self.config.format)
        .context("writing turn report")
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("reading piece input")?;
        if read == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(line))
    }
}
