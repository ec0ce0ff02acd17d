//! Protocol module - the line-oriented piece protocol
//!
//! Input is plain text, one token per character:
//!
//! ```text
//! OT      <- first line: falling piece, next piece
//! L       <- every later line: one upcoming piece
//! X       <- end of sequence: finish the pieces already known, then stop
//! ```
//!
//! `E` on any line ends the session immediately. Piece letters are
//! case-insensitive; a trailing `\r` is ignored.
//!
//! Output is one report per committed turn, either the classic two-line text
//! form or one JSON object per line.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::GameState;
use crate::types::{Operation, PieceKind};

/// One input character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Piece(PieceKind),
    /// `X`: no more pieces follow
    EndOfSequence,
    /// `E`: stop now
    Exit,
}

impl Token {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'X' | 'x' => Some(Token::EndOfSequence),
            'E' | 'e' => Some(Token::Exit),
            other => PieceKind::from_char(other).map(Token::Piece),
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Token::Piece(kind) => kind.as_char(),
            Token::EndOfSequence => 'X',
            Token::Exit => 'E',
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Malformed input line. `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    MissingFirstLine,
    WrongLength {
        line: usize,
        expected: usize,
        found: usize,
    },
    UnknownToken { line: usize, found: char },
}

impl ProtocolError {
    pub fn code(&self) -> &'static str {
        match self {
            ProtocolError::MissingFirstLine => "missing_first_line",
            ProtocolError::WrongLength { .. } => "wrong_length",
            ProtocolError::UnknownToken { .. } => "unknown_token",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ProtocolError::MissingFirstLine => "input ended before the first line",
            ProtocolError::WrongLength { .. } => "line has the wrong number of tokens",
            ProtocolError::UnknownToken { .. } => "not a piece, X or E",
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::MissingFirstLine => f.write_str(self.message()),
            ProtocolError::WrongLength {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {}: expected {} token(s), found {}",
                line, expected, found
            ),
            ProtocolError::UnknownToken { line, found } => {
                write!(f, "line {}: {} ({:?})", line, self.message(), found)
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

fn parse_tokens<const N: usize>(line_no: usize, line: &str) -> Result<[Token; N], ProtocolError> {
    let text = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != N {
        return Err(ProtocolError::WrongLength {
            line: line_no,
            expected: N,
            found: chars.len(),
        });
    }

    let mut tokens = [Token::Exit; N];
    for (slot, &c) in tokens.iter_mut().zip(&chars) {
        *slot = Token::from_char(c).ok_or(ProtocolError::UnknownToken {
            line: line_no,
            found: c,
        })?;
    }
    Ok(tokens)
}

/// Parse the opening line: falling piece and next piece
pub fn parse_first_line(line: &str) -> Result<(Token, Token), ProtocolError> {
    let [first, second] = parse_tokens::<2>(1, line)?;
    Ok((first, second))
}

/// Parse a later line holding a single token
pub fn parse_token_line(line_no: usize, line: &str) -> Result<Token, ProtocolError> {
    let [token] = parse_tokens::<1>(line_no, line)?;
    Ok(token)
}

/// Write `pieces` in the session's input format: the first line holds two
/// tokens, every later line one, and the stream ends with `X`.
///
/// An empty sequence writes nothing.
pub fn write_sequence<W, I>(out: &mut W, pieces: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = PieceKind>,
{
    let mut pieces = pieces.into_iter();
    let Some(first) = pieces.next() else {
        return Ok(());
    };

    write!(out, "{}", first.as_char())?;
    for kind in pieces {
        writeln!(out, "{}", kind.as_char())?;
    }
    writeln!(out, "{}", Token::EndOfSequence)?;
    out.flush()
}

/// Output encoding for turn reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `"{rotation} {column}\n{score}\n"`
    #[default]
    Text,
    /// One [`TurnReport`] object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        })
    }
}

/// What the session reports after each committed turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub rotation: u8,
    pub column: i8,
    pub landing_row: i8,
    pub lines_cleared: u8,
    pub score: u32,
    pub placed_pieces: u32,
    pub total_lines_cleared: u32,
    pub deadline_touched: bool,
}

impl TurnReport {
    /// Build a report from the applied operation and the state it produced
    pub fn new(operation: Operation, landing_row: i8, lines_cleared: usize, state: &GameState) -> Self {
        let stats = state.statistics();
        Self {
            rotation: operation.rotation.index(),
            column: operation.column,
            landing_row,
            lines_cleared: lines_cleared as u8,
            score: stats.score(),
            placed_pieces: stats.placed_pieces(),
            total_lines_cleared: stats.total_lines_cleared(),
            deadline_touched: state.deadline_touched(),
        }
    }

    /// Write the report in `format` and flush
    pub fn write_to<W: Write>(&self, out: &mut W, format: OutputFormat) -> io::Result<()> {
        match format {
            OutputFormat::Text => {
                write!(out, "{} {}\n{}\n", self.rotation, self.column, self.score)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, self)?;
                out.write_all(b"\n")?;
            }
        }
        out.flush()
    }
}
