//! Serialises the document model with `docx-rs`.
//!
//! Cell padding has no per-cell setter in the writer, so each table takes the
//! padding of its first padded cell as its cell margins.

use std::io::Cursor;

use docx_rs::{
  AlignmentType, BorderType, BreakType, Docx, LineSpacing, LineSpacingType, PageMargin, Paragraph as DocxParagraph,
  Run as DocxRun, RunFonts, Shading, ShdType, Table as DocxTable, TableCell, TableCellBorder,
  TableCellBorderPosition, TableCellMargins, TableRow, WidthType,
};

use super::model::*;
use crate::error::RenderError;

/// A4 width less both side margins, in twips.
const TEXT_WIDTH: usize = 11906 - 2 * 1134;
const FULL_WIDTH_PCT: usize = 5000;

fn twips(points: u32) -> u32 {
  points * 20
}

fn fonts(name: &str) -> RunFonts {
  RunFonts::new().ascii(name).hi_ansi(name).east_asia(name).cs(name)
}

fn run(r: &Run) -> DocxRun {
  let mut out = DocxRun::new().add_text(&r.text);
  let s = &r.style;
  if let Some(font) = &s.font {
    out = out.fonts(fonts(font));
  }
  if let Some(size) = s.size {
    out = out.size(size as usize * 2);
  }
  if s.bold {
    out = out.bold();
  }
  if s.italic {
    out = out.italic();
  }
  if let Some(colour) = &s.colour {
    out = out.color(colour);
  }
  out
}

fn paragraph(p: &Paragraph, default_line: Option<u32>) -> DocxParagraph {
  let mut out = DocxParagraph::new();
  let mut current: Option<DocxRun> = None;
  for inline in &p.inlines {
    match inline {
      Inline::Run(r) => {
        if let Some(prev) = current.take() {
          out = out.add_run(prev);
        }
        current = Some(run(r));
      }
      Inline::Break => {
        let carrier = current.take().unwrap_or_else(DocxRun::new);
        out = out.add_run(carrier.add_break(BreakType::TextWrapping));
      }
    }
  }
  if let Some(last) = current {
    out = out.add_run(last);
  }

  out = match p.align {
    Align::Left => out,
    Align::Center => out.align(AlignmentType::Center),
    Align::Right => out.align(AlignmentType::Right),
  };

  let sp = p.spacing;
  let line = sp.line.or(default_line);
  if sp.before.is_some() || sp.after.is_some() || line.is_some() {
    let mut spacing = LineSpacing::new();
    if let Some(before) = sp.before {
      spacing = spacing.before(twips(before));
    }
    if let Some(after) = sp.after {
      spacing = spacing.after(twips(after));
    }
    if let Some(points) = line {
      spacing = spacing.line(twips(points) as i32).line_rule(LineSpacingType::Exact);
    }
    out = out.line_spacing(spacing);
  }
  out
}

fn lower_cell(c: &Cell, default_line: Option<u32>) -> TableCell {
  let mut out = TableCell::new();
  let mut has_paragraph = false;
  for block in &c.blocks {
    match block {
      Block::Paragraph(p) => {
        out = out.add_paragraph(paragraph(p, default_line));
        has_paragraph = true;
      }
      Block::Table(t) => out = out.add_table(table(t, default_line)),
    }
  }
  if !has_paragraph {
    out = out.add_paragraph(DocxParagraph::new());
  }
  if let Some(fill) = &c.props.shading {
    out = out.shading(Shading::new().shd_type(ShdType::Clear).color("auto").fill(fill));
  }
  if let Some(border) = &c.props.border {
    for position in [
      TableCellBorderPosition::Top,
      TableCellBorderPosition::Left,
      TableCellBorderPosition::Bottom,
      TableCellBorderPosition::Right,
    ] {
      out = out.set_border(
        TableCellBorder::new(position)
          .border_type(BorderType::Single)
          .size(border.size as usize)
          .color(&border.colour),
      );
    }
  }
  out
}

fn table(t: &Table, default_line: Option<u32>) -> DocxTable {
  let rows = t
    .rows
    .iter()
    .map(|r| TableRow::new(r.cells.iter().map(|c| lower_cell(c, default_line)).collect()))
    .collect();
  let columns = t.columns.max(1);
  let mut out = DocxTable::new(rows).set_grid(vec![TEXT_WIDTH / columns; columns]);
  if t.full_width {
    out = out.width(FULL_WIDTH_PCT, WidthType::Pct);
  }
  if t.borderless {
    out = out.clear_all_border();
  }
  if let Some(pad) = t.cells().find_map(|c| c.props.padding) {
    out = out.margins(TableCellMargins::new().margin(
      pad.top as usize,
      pad.right as usize,
      pad.bottom as usize,
      pad.left as usize,
    ));
  }
  out
}

/// Packs the model into `.docx` bytes.
pub(super) fn write(doc: &Document) -> Result<Vec<u8>, RenderError> {
  let m = doc.margins;
  let mut docx = Docx::new()
    .page_margin(
      PageMargin::new()
        .top(m.top as i32)
        .bottom(m.bottom as i32)
        .left(m.left as i32)
        .right(m.right as i32),
    )
    .default_fonts(fonts(&doc.font))
    .default_size(doc.font_size as usize * 2);

  for block in &doc.blocks {
    docx = match block {
      Block::Paragraph(p) => docx.add_paragraph(paragraph(p, doc.line_spacing)),
      Block::Table(t) => docx.add_table(table(t, doc.line_spacing)),
    };
  }

  let mut buf = Cursor::new(Vec::new());
  docx.build().pack(&mut buf).map_err(|e| RenderError::Pack(e.to_string()))?;
  Ok(buf.into_inner())
}
