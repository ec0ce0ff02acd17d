//! Decision session on stdin/stdout (default binary).
//!
//! Reads the piece stream from stdin and answers each turn on stdout.
//! Logs and the optional detail view go to stderr.

use std::io;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use tetris_ai::adapter::{OutputFormat, Session, SessionConfig, SessionEnd};

#[derive(Debug, Parser)]
#[command(name = "tetris-ai", version, about = "Single-piece Tetris placement decider")]
struct Cli {
    #[arg(long, help = "Turn report format: text or json [env: TETRIS_AI_FORMAT]")]
    format: Option<OutputFormat>,

    #[arg(long, help = "Render the board after each turn to stderr [env: TETRIS_AI_DETAIL]")]
    detail: bool,

    #[arg(long, help = "Disable colors in the detail view [env: TETRIS_AI_COLOR=0]")]
    no_color: bool,

    #[arg(long, help = "Stop once the stack reaches the deadline row [env: TETRIS_AI_STOP_ON_DEADLINE]")]
    stop_on_deadline: bool,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE) [env: TETRIS_AI_LOG]")]
    verbose: u8,
}

impl Cli {
    /// Flags given on the command line win over the environment
    fn session_config(&self, mut config: SessionConfig) -> SessionConfig {
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.detail {
            config.detail = true;
        }
        if self.no_color {
            config.color = false;
        }
        if self.stop_on_deadline {
            config.stop_on_deadline = true;
        }
        config
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => std::env::var("TETRIS_AI_LOG")
                .ok()
                .and_then(|s| Level::from_str(s.trim()).ok())
                .unwrap_or(Level::WARN),
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(cli.log_level()))
        .init();

    let config = cli.session_config(SessionConfig::from_env());
    let mut session = Session::new(io::stdin().lock(), io::stdout().lock(), config);
    let summary = session.run().context("decision session failed")?;

    if summary.end == SessionEnd::GameOver {
        info!(score = summary.statistics.score(), "no legal placement left");
    }

    Ok(())
}
