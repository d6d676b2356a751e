//! In-memory rich document: blocks, runs and table cells with their formatting.
//!
//! The model is writer-neutral. It is mutated only through `render::primitives`
//! and lowered to `.docx` by `render::docx`. The read helpers here exist for the
//! writer and for tests.

/// Horizontal paragraph alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
  #[default]
  Left,
  Center,
  Right,
}

/// Character formatting of a run. Sizes in points, colours as 6-digit hex.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStyle {
  pub font: Option<String>,
  pub size: Option<u32>,
  pub bold: bool,
  pub italic: bool,
  pub colour: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Run {
  pub text: String,
  pub style: RunStyle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
  Run(Run),
  /// Soft line break inside the paragraph.
  Break,
}

/// Paragraph spacing in points. `None` leaves the document default in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Spacing {
  pub before: Option<u32>,
  pub after: Option<u32>,
  pub line: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Paragraph {
  pub inlines: Vec<Inline>,
  pub align: Align,
  pub spacing: Spacing,
}

impl Paragraph {
  /// Concatenated text, line breaks as `\n`.
  pub fn text(&self) -> String {
    let mut out = String::new();
    for inline in &self.inlines {
      match inline {
        Inline::Run(r) => out.push_str(&r.text),
        Inline::Break => out.push('\n'),
      }
    }
    out
  }

  pub fn runs(&self) -> impl Iterator<Item = &Run> {
    self.inlines.iter().filter_map(|i| match i {
      Inline::Run(r) => Some(r),
      Inline::Break => None,
    })
  }
}

/// Cell border: colour and weight in eighths of a point, applied to all four edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellBorder {
  pub colour: String,
  pub size: u32,
}

/// Cell padding in twips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Padding {
  pub top: u32,
  pub bottom: u32,
  pub left: u32,
  pub right: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellProps {
  pub shading: Option<String>,
  pub border: Option<CellBorder>,
  pub padding: Option<Padding>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
  pub blocks: Vec<Block>,
  pub props: CellProps,
}

impl Default for Cell {
  /// A cell always holds at least one (possibly empty) paragraph.
  fn default() -> Self {
    Cell { blocks: vec![Block::Paragraph(Paragraph::default())], props: CellProps::default() }
  }
}

impl Cell {
  pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
    self.blocks.iter().filter_map(|b| match b {
      Block::Paragraph(p) => Some(p),
      Block::Table(_) => None,
    })
  }

  /// Paragraph texts joined by `\n`.
  pub fn text(&self) -> String {
    self.paragraphs().map(Paragraph::text).collect::<Vec<_>>().join("\n")
  }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
  pub cells: Vec<Cell>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
  pub rows: Vec<Row>,
  pub columns: usize,
  pub full_width: bool,
  pub borderless: bool,
}

impl Table {
  pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
    self.rows.get(row).and_then(|r| r.cells.get(col))
  }

  pub fn cells(&self) -> impl Iterator<Item = &Cell> {
    self.rows.iter().flat_map(|r| r.cells.iter())
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
  Paragraph(Paragraph),
  Table(Table),
}

/// Page margins in twips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageMargins {
  pub top: u32,
  pub bottom: u32,
  pub left: u32,
  pub right: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
  pub blocks: Vec<Block>,
  pub margins: PageMargins,
  pub font: String,
  /// Default body size in points.
  pub font_size: u32,
  /// Exact line spacing for paragraphs without their own, in points.
  pub line_spacing: Option<u32>,
}

impl Document {
  /// Every top-level table, in document order.
  pub fn tables(&self) -> impl Iterator<Item = &Table> {
    self.blocks.iter().filter_map(|b| match b {
      Block::Table(t) => Some(t),
      Block::Paragraph(_) => None,
    })
  }

  /// Every paragraph, descending into table cells, in reading order.
  pub fn all_paragraphs(&self) -> Vec<&Paragraph> {
    fn walk<'a>(blocks: &'a [Block], out: &mut Vec<&'a Paragraph>) {
      for block in blocks {
        match block {
          Block::Paragraph(p) => out.push(p),
          Block::Table(t) => {
            for cell in t.cells() {
              walk(&cell.blocks, out);
            }
          }
        }
      }
    }
    let mut out = Vec::new();
    walk(&self.blocks, &mut out);
    out
  }

  /// Full reading-order text; handy for assertions.
  pub fn plain_text(&self) -> String {
    self.all_paragraphs().into_iter().map(Paragraph::text).collect::<Vec<_>>().join("\n")
  }
}
