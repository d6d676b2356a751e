//! Drawing primitives: the only functions that touch the document model.
//!
//! Every primitive is scoped to the element passed in and uses replace
//! semantics, so applying it twice is the same as applying it once.

use super::model::*;
use crate::styles::FONT_NAME;

/// 1.5 cm and 2 cm in twips.
const MARGIN_TOP_BOTTOM: u32 = 850;
const MARGIN_LEFT_RIGHT: u32 = 1134;
const BASE_FONT_SIZE: u32 = 14;
const EXTRA_LINE_SPACING: u32 = 36;

/// Anything blocks can be appended to: the document body or a table cell.
pub trait Container {
  fn blocks_mut(&mut self) -> &mut Vec<Block>;
}

impl Container for Document {
  fn blocks_mut(&mut self) -> &mut Vec<Block> { &mut self.blocks }
}

impl Container for Cell {
  fn blocks_mut(&mut self) -> &mut Vec<Block> { &mut self.blocks }
}

/// Font settings for a run. Built fluently, applied by `apply_run_style`.
#[derive(Clone, Copy, Debug)]
pub struct Font<'a> {
  pub size: u32,
  pub bold: bool,
  pub italic: bool,
  pub colour: Option<&'a str>,
}

impl<'a> Font<'a> {
  pub fn new(size: u32) -> Self { Font { size, bold: false, italic: false, colour: None } }
  pub fn bold(mut self) -> Self { self.bold = true; self }
  pub fn italic(mut self) -> Self { self.italic = true; self }
  pub fn colour(mut self, hex: &'a str) -> Self { self.colour = Some(hex); self }
}

// ── document ──

/// Empty A4 document with worksheet margins and default font.
pub fn base_document(extra_spacing: bool) -> Document {
  Document {
    blocks: Vec::new(),
    margins: PageMargins {
      top: MARGIN_TOP_BOTTOM,
      bottom: MARGIN_TOP_BOTTOM,
      left: MARGIN_LEFT_RIGHT,
      right: MARGIN_LEFT_RIGHT,
    },
    font: FONT_NAME.to_string(),
    font_size: BASE_FONT_SIZE,
    line_spacing: extra_spacing.then_some(EXTRA_LINE_SPACING),
  }
}

pub fn add_paragraph<C: Container + ?Sized>(container: &mut C) -> &mut Paragraph {
  let blocks = container.blocks_mut();
  blocks.push(Block::Paragraph(Paragraph::default()));
  match blocks.last_mut() {
    Some(Block::Paragraph(p)) => p,
    _ => unreachable!("paragraph was just pushed"),
  }
}

/// Paragraph with explicit before/after spacing and nothing else.
pub fn add_spaced_paragraph<C: Container + ?Sized>(container: &mut C, before: u32, after: u32) -> &mut Paragraph {
  let p = add_paragraph(container);
  zero_paragraph_spacing(p);
  set_spacing(p, before, after);
  p
}

/// Vertical gap made of an empty paragraph.
pub fn add_spacer<C: Container + ?Sized>(container: &mut C, before: u32, after: u32) {
  let p = add_paragraph(container);
  set_spacing(p, before, after);
}

/// `rows x cols` table of empty cells.
pub fn add_table<C: Container + ?Sized>(container: &mut C, rows: usize, cols: usize) -> &mut Table {
  let table = Table {
    rows: (0..rows).map(|_| Row { cells: (0..cols).map(|_| Cell::default()).collect() }).collect(),
    columns: cols,
    full_width: false,
    borderless: false,
  };
  let blocks = container.blocks_mut();
  blocks.push(Block::Table(table));
  match blocks.last_mut() {
    Some(Block::Table(t)) => t,
    _ => unreachable!("table was just pushed"),
  }
}

// ── runs ──

/// Sets every character property at once, replacing earlier overrides.
pub fn apply_run_style(run: &mut Run, font: &str, size: u32, bold: bool, italic: bool, colour: Option<&str>) {
  run.style = RunStyle {
    font: Some(font.to_string()),
    size: Some(size),
    bold,
    italic,
    colour: colour.map(str::to_string),
  };
}

/// Appends a run and styles it with the worksheet font.
pub fn add_run<'p>(paragraph: &'p mut Paragraph, text: impl Into<String>, font: Font<'_>) -> &'p mut Run {
  paragraph.inlines.push(Inline::Run(Run { text: text.into(), style: RunStyle::default() }));
  let run = match paragraph.inlines.last_mut() {
    Some(Inline::Run(r)) => r,
    _ => unreachable!("run was just pushed"),
  };
  apply_run_style(run, FONT_NAME, font.size, font.bold, font.italic, font.colour);
  run
}

pub fn add_break(paragraph: &mut Paragraph) {
  paragraph.inlines.push(Inline::Break);
}

// ── paragraphs ──

pub fn zero_paragraph_spacing(paragraph: &mut Paragraph) {
  paragraph.spacing.before = Some(0);
  paragraph.spacing.after = Some(0);
}

pub fn set_spacing(paragraph: &mut Paragraph, before: u32, after: u32) {
  paragraph.spacing.before = Some(before);
  paragraph.spacing.after = Some(after);
}

pub fn set_line_spacing(paragraph: &mut Paragraph, points: u32) {
  paragraph.spacing.line = Some(points);
}

pub fn align(paragraph: &mut Paragraph, alignment: Align) {
  paragraph.align = alignment;
}

// ── cells ──

pub fn cell(table: &mut Table, row: usize, col: usize) -> &mut Cell {
  &mut table.rows[row].cells[col]
}

/// First paragraph of a cell, creating it if the cell was emptied.
pub fn first_paragraph(cell: &mut Cell) -> &mut Paragraph {
  if !matches!(cell.blocks.first(), Some(Block::Paragraph(_))) {
    cell.blocks.insert(0, Block::Paragraph(Paragraph::default()));
  }
  match cell.blocks.first_mut() {
    Some(Block::Paragraph(p)) => p,
    _ => unreachable!("first block is a paragraph"),
  }
}

pub fn shade_cell(cell: &mut Cell, hex: &str) {
  cell.props.shading = Some(hex.to_string());
}

pub fn border_cell(cell: &mut Cell, hex: &str, size: u32) {
  cell.props.border = Some(CellBorder { colour: hex.to_string(), size });
}

pub fn pad_cell(cell: &mut Cell, top: u32, bottom: u32, left: u32, right: u32) {
  cell.props.padding = Some(Padding { top, bottom, left, right });
}

/// Removes all content and formatting; the cell keeps one empty paragraph.
pub fn clear_cell(cell: &mut Cell) {
  *cell = Cell::default();
}

// ── tables ──

pub fn full_width_table(table: &mut Table) {
  table.full_width = true;
}

pub fn strip_table_borders(table: &mut Table) {
  table.borderless = true;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn shading_and_border_are_idempotent() {
    let mut once = Cell::default();
    shade_cell(&mut once, "FFF3E0");
    border_cell(&mut once, "E65100", 10);

    let mut twice = Cell::default();
    shade_cell(&mut twice, "FFF3E0");
    shade_cell(&mut twice, "FFF3E0");
    border_cell(&mut twice, "E65100", 10);
    border_cell(&mut twice, "E65100", 10);

    assert_eq!(once, twice);
  }

  #[test]
  fn later_shading_replaces_earlier() {
    let mut c = Cell::default();
    shade_cell(&mut c, "000000");
    shade_cell(&mut c, "FFFFFF");
    pad_cell(&mut c, 1, 2, 3, 4);
    pad_cell(&mut c, 5, 6, 7, 8);
    assert_eq!(c.props.shading.as_deref(), Some("FFFFFF"));
    assert_eq!(c.props.padding, Some(Padding { top: 5, bottom: 6, left: 7, right: 8 }));
  }

  #[test]
  fn run_style_replaces_previous_override() {
    let mut p = Paragraph::default();
    let run = add_run(&mut p, "hi", Font::new(20).bold().italic().colour("123456"));
    apply_run_style(run, "Arial", 9, false, false, None);
    assert_eq!(
      run.style,
      RunStyle { font: Some("Arial".into()), size: Some(9), bold: false, italic: false, colour: None }
    );
  }

  #[test]
  fn cleared_cell_has_no_text_or_formatting() {
    let mut doc = base_document(false);
    let table = add_table(&mut doc, 1, 2);
    let c = cell(table, 0, 1);
    add_run(first_paragraph(c), "x", Font::new(10));
    shade_cell(c, "ABCDEF");
    clear_cell(c);
    assert_eq!(*c, Cell::default());
  }

  #[test]
  fn extra_spacing_sets_document_line_spacing() {
    assert_eq!(base_document(true).line_spacing, Some(36));
    assert_eq!(base_document(false).line_spacing, None);
  }

  #[test]
  fn paragraphs_can_be_added_to_cells() {
    let mut c = Cell::default();
    add_run(add_paragraph(&mut c), "second", Font::new(12));
    assert_eq!(c.text(), "\nsecond");
  }
}
