//! Cloze paragraphs: the inline blank state machine.
//!
//! Per piece, appended to one running paragraph:
//! - text: verbatim in body styling;
//! - blank, answer key: `[answer]` bold in the word-type colour, nothing else;
//! - blank, student: symbol + underscore blank, then a choices line
//!   (developing only), else a hint line, else nothing.

use crate::content::{Blank, Piece, Sentence};
use crate::domain::Level;
use crate::render::model::{Document, Paragraph};
use crate::render::primitives::*;
use crate::render::Ctx;
use crate::styles::{self, colours};

use super::CellCursor;

pub const BLANK_LINE: &str = " ________________ ";
const MISSING_ANSWER: &str = "answer not provided";

/// How a blank is drawn, decided once per blank.
#[derive(Debug, PartialEq, Eq)]
pub enum BlankMode<'a> {
  Answer(&'a str),
  Choices(&'a [String]),
  Hint(&'a str),
  Bare,
}

pub fn blank_mode<'a>(blank: &'a Blank, level: Level, show_answers: bool) -> BlankMode<'a> {
  if show_answers {
    return BlankMode::Answer(blank.answer.as_deref().unwrap_or(MISSING_ANSWER));
  }
  if level.is_developing() && !blank.choices.is_empty() {
    return BlankMode::Choices(&blank.choices);
  }
  match &blank.hint {
    Some(hint) => BlankMode::Hint(hint),
    None => BlankMode::Bare,
  }
}

fn hint_size(level: Level) -> u32 {
  match level {
    Level::Developing => 11,
    Level::Expected => 10,
    Level::GreaterDepth => 9,
  }
}

fn append_blank(p: &mut Paragraph, ctx: &Ctx, blank: &Blank) {
  let wt = styles::word_type(&blank.word_type);
  let body = ctx.body();
  match blank_mode(blank, ctx.level, ctx.show_answers) {
    BlankMode::Answer(answer) => {
      add_run(p, format!("[{answer}]"), Font::new(body).bold().colour(wt.text));
    }
    mode => {
      add_run(p, format!(" {}", wt.symbol), Font::new(body).bold().colour(wt.text));
      add_run(p, BLANK_LINE, Font::new(body).bold().colour(wt.text));
      match mode {
        BlankMode::Choices(choices) => {
          add_break(p);
          add_run(
            p,
            format!("     {} Choose:  {}", wt.symbol, choices.join("   /   ")),
            Font::new(14).bold().italic().colour(wt.text),
          );
          add_break(p);
        }
        BlankMode::Hint(hint) => {
          add_break(p);
          add_run(
            p,
            format!("     {} {}: {}", wt.symbol, wt.label, hint),
            Font::new(hint_size(ctx.level)).italic().colour(wt.text),
          );
          add_break(p);
        }
        _ => {}
      }
    }
  }
}

fn fill_paragraph(p: &mut Paragraph, ctx: &Ctx, pieces: &[Piece]) {
  zero_paragraph_spacing(p);
  let (before, after) = if ctx.developing() { (6, 4) } else { (4, 2) };
  set_spacing(p, before, after);
  set_line_spacing(p, ctx.level_entry.line_spacing);
  for piece in pieces {
    match piece {
      Piece::Text { text } => {
        add_run(p, text.as_str(), Font::new(ctx.body()).colour(colours::BLACK));
      }
      Piece::Blank(blank) => append_blank(p, ctx, blank),
      Piece::Unknown => {}
    }
  }
}

/// Appends one cloze paragraph built from `pieces`.
pub fn cloze_paragraph<C: Container + ?Sized>(container: &mut C, ctx: &Ctx, pieces: &[Piece]) {
  fill_paragraph(add_paragraph(container), ctx, pieces);
}

/// Themed container holding a section's cloze paragraphs.
pub fn section_body(doc: &mut Document, ctx: &Ctx, paragraphs: &[Sentence]) {
  let table = add_table(doc, 1, 1);
  full_width_table(table);
  let c = cell(table, 0, 0);
  shade_cell(c, ctx.theme.body);
  let pad = ctx.level_entry.padding;
  pad_cell(c, pad, pad, 200, 200);
  let mut cursor = CellCursor::new(c);
  for para in paragraphs {
    fill_paragraph(cursor.paragraph(), ctx, &para.pieces);
  }
}
