//! DetailRenderer: flushes encoded detail views to a byte sink.
//!
//! Normally the sink is stderr, keeping stdout a clean protocol stream.

use std::io::{self, Write};

use anyhow::Result;

use crate::core::GameState;
use crate::detail::DetailView;
use crate::types::Operation;

pub struct DetailRenderer<W: Write> {
    out: W,
    view: DetailView,
    buf: Vec<u8>,
}

impl DetailRenderer<io::Stderr> {
    pub fn stderr(view: DetailView) -> Self {
        Self::new(io::stderr(), view)
    }
}

impl<W: Write> DetailRenderer<W> {
    pub fn new(out: W, view: DetailView) -> Self {
        Self {
            out,
            view,
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    /// Encode and write the view of one committed turn
    pub fn draw(&mut self, operation: Operation, state: &GameState) -> Result<()> {
        self.buf.clear();
        self.view.render_into(operation, state, &mut self.buf)?;
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
