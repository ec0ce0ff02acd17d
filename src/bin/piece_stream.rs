//! Random piece sequence generator.
//!
//! Prints `length` pieces from a seeded generator in the decision session's
//! input format, so the two can be piped together:
//!
//! ```bash
//! piece-stream 42 1000 | tetris-ai
//! ```

use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;

use tetris_ai::adapter::write_sequence;
use tetris_ai::core::{PieceStream, StreamOrder};

#[derive(Debug, Parser)]
#[command(name = "piece-stream", version, about = "Seeded Tetris piece sequence generator")]
struct Cli {
    #[arg(help = "RNG seed; the same seed always yields the same sequence")]
    seed: u32,

    #[arg(help = "Number of pieces to print before the closing X")]
    length: usize,

    #[arg(long, help = "Draw from shuffled 7-piece bags instead of uniformly")]
    bag: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let order = if cli.bag {
        StreamOrder::SevenBag
    } else {
        StreamOrder::Uniform
    };
    let pieces = PieceStream::new(cli.seed, order).take(cli.length);

    let mut out = BufWriter::new(io::stdout().lock());
    write_sequence(&mut out, pieces).context("writing piece sequence")?;
    Ok(())
}
