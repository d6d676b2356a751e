//! Composite widgets. Each consumes a slice of a content tree plus the render
//! context and appends structure through the drawing primitives.

pub mod cloze;
pub mod frame;
pub mod investigation;
pub mod matching;
pub mod questions;
pub mod word_bank;

use super::model::{Cell, Paragraph};
use super::primitives::*;
use super::Ctx;
use crate::styles::colours;

pub const WRITING_LINE: &str =
  "______________________________________________________________________";

/// Answer-key text for a question or sentence with no answer supplied.
pub const NO_ANSWER: &str = "[answer not provided]";

/// Full-width single-cell table, shaded and bordered; returns the cell.
pub(crate) fn boxed_cell<'c, C: Container + ?Sized>(container: &'c mut C, fill: &str, border: &str, weight: u32) -> &'c mut Cell {
  let table = add_table(container, 1, 1);
  full_width_table(table);
  let c = cell(table, 0, 0);
  shade_cell(c, fill);
  border_cell(c, border, weight);
  c
}

/// `count` ruled lines for pupil writing.
pub(crate) fn writing_lines<C: Container + ?Sized>(container: &mut C, ctx: &Ctx, count: usize) {
  for _ in 0..count {
    let p = add_spaced_paragraph(container, 4, 4);
    add_run(p, WRITING_LINE, Font::new(ctx.body()).colour(colours::HINT_TEXT));
  }
}

/// Writes paragraphs into a cell, reusing the cell's initial empty paragraph.
pub(crate) struct CellCursor<'c> {
  cell: &'c mut Cell,
  started: bool,
}

impl<'c> CellCursor<'c> {
  pub(crate) fn new(cell: &'c mut Cell) -> Self {
    CellCursor { cell, started: false }
  }

  pub(crate) fn paragraph(&mut self) -> &mut Paragraph {
    if self.started {
      add_paragraph(&mut *self.cell)
    } else {
      self.started = true;
      first_paragraph(&mut *self.cell)
    }
  }
}
