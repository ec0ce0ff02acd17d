//! Session tests - the line protocol end to end over in-memory streams

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use tetris_ai::adapter::{
    OutputFormat, ProtocolError, Session, SessionConfig, SessionEnd, SessionSummary, TurnReport,
};
use tetris_ai::core::Board;
use tetris_ai::types::PieceKind;

fn run_with(input: &str, config: SessionConfig, board: Board) -> (SessionSummary, String) {
    let mut session = Session::new(input.as_bytes(), Vec::new(), config).with_board(board);
    let summary = session.run().unwrap();
    (summary, String::from_utf8(session.into_output()).unwrap())
}

fn run(input: &str) -> (SessionSummary, String) {
    run_with(input, SessionConfig::default(), Board::new())
}

/// Column 0 filled from the deadline row down
fn deadline_board() -> Board {
    let mut board = Board::new();
    for y in 4..20 {
        board.set(0, y, Some(PieceKind::T));
    }
    board
}

#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_text_reports_two_lines_per_turn() {
    let (summary, out) = run("OO\nO\nO\nO\nX\n");
    assert_eq!(summary.end, SessionEnd::EndOfSequence);
    assert_eq!(summary.statistics.placed_pieces(), 5);

    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(&lines[..2], &["0 0", "0"]);
    // Five squares fill the bottom two rows and clear them.
    assert_eq!(lines[9], "300");
    assert_eq!(summary.statistics.clears_of_size(2), 1);
}

#[test]
fn test_x_in_the_stream_finishes_known_pieces() {
    let (summary, out) = run("IT\nX\nL\n");
    assert_eq!(summary.end, SessionEnd::EndOfSequence);
    assert_eq!(summary.statistics.placed_pieces(), 2);
    assert_eq!(out.lines().count(), 4);
}

#[test]
fn test_x_first_decides_nothing() {
    let (summary, out) = run("XO\n");
    assert_eq!(summary.end, SessionEnd::EndOfSequence);
    assert_eq!(summary.statistics.placed_pieces(), 0);
    assert!(out.is_empty());
}

#[test]
fn test_exit_token() {
    let (summary, out) = run("SZ\nT\nE\nI\n");
    assert_eq!(summary.end, SessionEnd::Exit);
    assert_eq!(summary.statistics.placed_pieces(), 2);
    assert_eq!(out.lines().count(), 4);

    let (summary, out) = run("SE\n");
    assert_eq!(summary.end, SessionEnd::Exit);
    assert!(out.is_empty());
}

#[test]
fn test_end_of_input() {
    let (summary, _) = run("jl\n");
    assert_eq!(summary.end, SessionEnd::EndOfInput);
    assert_eq!(summary.statistics.placed_pieces(), 1);
}

#[test]
fn test_json_reports() {
    let config = SessionConfig {
        format: OutputFormat::Json,
        ..SessionConfig::default()
    };
    let board: Board = "
        #########.
        #########.
        #########.
        #########.
    "
    .parse()
    .unwrap();
    let (_, out) = run_with("IX\n", config, board);

    let reports: Vec<TurnReport> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(reports.len(), 1);

    let r = reports[0];
    assert_eq!((r.rotation, r.column), (1, 9));
    assert_eq!(r.landing_row, 16);
    assert_eq!(r.lines_cleared, 4);
    assert_eq!(r.score, 800);
    assert_eq!(r.placed_pieces, 1);
    assert!(!r.deadline_touched);
}

#[test]
fn test_game_over_ends_quietly() {
    let mut board = Board::new();
    for x in 0..9 {
        board.set(x, 0, Some(PieceKind::Z));
    }
    board.set(9, 1, Some(PieceKind::Z));

    let (summary, out) = run_with("TO\nX\n", SessionConfig::default(), board);
    assert_eq!(summary.end, SessionEnd::GameOver);
    assert_eq!(summary.statistics.placed_pieces(), 0);
    assert!(out.is_empty());
}

#[test]
fn test_stop_on_deadline() {
    let config = SessionConfig {
        stop_on_deadline: true,
        ..SessionConfig::default()
    };
    let (summary, out) = run_with("OT\nL\nX\n", config, deadline_board());
    assert_eq!(summary.end, SessionEnd::DeadlineTouched);
    assert!(summary.deadline_touched);
    assert_eq!(out.lines().count(), 2);

    // Without the option the session plays on.
    let (summary, _) = run_with("OT\nL\nX\n", SessionConfig::default(), deadline_board());
    assert_eq!(summary.end, SessionEnd::EndOfSequence);
    assert!(summary.deadline_touched);
    assert_eq!(summary.statistics.placed_pieces(), 3);
}

#[test]
fn test_unknown_token_is_an_error() {
    let mut session = Session::new(&b"OT\nQ\n"[..], Vec::new(), SessionConfig::default());
    let err = session.run().unwrap_err();
    assert_eq!(
        err.downcast_ref::<ProtocolError>(),
        Some(&ProtocolError::UnknownToken { line: 2, found: 'Q' })
    );

    // The turn decided before the bad line was still reported.
    let out = String::from_utf8(session.into_output()).unwrap();
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn test_malformed_first_line() {
    let mut session = Session::new(&b"OTL\n"[..], Vec::new(), SessionConfig::default());
    let err = session.run().unwrap_err();
    assert_eq!(
        err.downcast_ref::<ProtocolError>().map(|e| e.code()),
        Some("wrong_length")
    );
}

#[test]
fn test_detail_view_goes_to_its_own_sink() {
    let detail = SharedBuf::default();
    let config = SessionConfig {
        color: false,
        ..SessionConfig::default()
    };
    let mut session =
        Session::new(&b"OI\nX\n"[..], Vec::new(), config).with_detail_output(detail.clone());
    session.run().unwrap();

    let out = String::from_utf8(session.into_output()).unwrap();
    assert_eq!(out.lines().count(), 4);

    let text = String::from_utf8(detail.0.borrow().clone()).unwrap();
    assert_eq!(text.matches("operation: ").count(), 2);
    assert!(text.contains("operation: rotation=0, column=0"));
    assert!(text.contains("19 |[][]"));
    assert!(!text.contains('\x1b'));
}
