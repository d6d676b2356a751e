//! Reading passages, badged question blocks, scenario data and calculation grids.

use crate::content::{Calculation, DataItem, Question};
use crate::render::model::{Align, Document};
use crate::render::primitives::*;
use crate::render::Ctx;
use crate::styles::colours;

use super::{boxed_cell, writing_lines, CellCursor, NO_ANSWER};

#[derive(Debug, PartialEq, Eq)]
pub struct Badge {
  pub key: &'static str,
  pub label: &'static str,
  pub bg: &'static str,
  pub text: &'static str,
}

/// Which badge vocabulary a question list uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionSet {
  Comprehension,
  Maths,
}

static COMPREHENSION_BADGES: [Badge; 5] = [
  Badge { key: "retrieval", label: "Find and Copy", bg: "E8F5E9", text: "2E7D32" },
  Badge { key: "inference", label: "Think and Infer", bg: "E3F2FD", text: "1565C0" },
  Badge { key: "vocabulary", label: "Word Meaning", bg: "FFF8E1", text: "F57F17" },
  Badge { key: "author_intent", label: "Author's Choice", bg: "F3E5F5", text: "7B1FA2" },
  Badge { key: "evaluation", label: "Your Opinion", bg: "FCE4EC", text: "C62828" },
];

static MATHS_BADGES: [Badge; 4] = [
  Badge { key: "calculate", label: "Calculate", bg: "E3F2FD", text: "1565C0" },
  Badge { key: "explain", label: "Explain", bg: "E8F5E9", text: "2E7D32" },
  Badge { key: "estimate", label: "Estimate", bg: "FFF8E1", text: "F57F17" },
  Badge { key: "prove", label: "Prove It", bg: "F3E5F5", text: "7B1FA2" },
];

/// Badge for a question type; unknown types use the first badge of the set.
pub fn badge(set: QuestionSet, question_type: &str) -> &'static Badge {
  let table: &'static [Badge] = match set {
    QuestionSet::Comprehension => &COMPREHENSION_BADGES,
    QuestionSet::Maths => &MATHS_BADGES,
  };
  let key = question_type.trim().to_lowercase();
  table.iter().find(|b| b.key == key).unwrap_or(&table[0])
}

fn marks_label(marks: u32) -> String {
  if marks == 1 { "[1 mark]".to_string() } else { format!("[{marks} marks]") }
}

/// Passage in a themed box, split into paragraphs on blank lines.
pub fn reading_passage(doc: &mut Document, ctx: &Ctx, title: Option<&str>, text: &str, source_note: Option<&str>) {
  add_spacer(doc, 6, 0);
  let c = boxed_cell(doc, ctx.theme.body, ctx.theme.accent, 6);
  let pad = ctx.level_entry.padding;
  pad_cell(c, pad, pad, 200, 200);
  let mut cursor = CellCursor::new(c);

  if let Some(title) = title {
    let p = cursor.paragraph();
    zero_paragraph_spacing(p);
    align(p, Align::Center);
    add_run(p, format!("{} {}", ctx.theme.icon, title), Font::new(ctx.body() + 2).bold().colour(colours::TITLE_TEXT));
  }
  for chunk in text.split("\n\n").map(str::trim).filter(|s| !s.is_empty()) {
    let p = cursor.paragraph();
    zero_paragraph_spacing(p);
    set_spacing(p, 4, 6);
    set_line_spacing(p, ctx.level_entry.line_spacing);
    add_run(p, chunk, Font::new(ctx.body()).colour(colours::BLACK));
  }
  if let Some(note) = source_note {
    let p = cursor.paragraph();
    set_spacing(p, 4, 0);
    align(p, Align::Right);
    add_run(p, note, Font::new(9).italic().colour(colours::HINT_TEXT));
  }
}

/// Numbered questions with type badge, hint words, and answer lines or model answers.
pub fn question_blocks(doc: &mut Document, ctx: &Ctx, questions: &[Question], set: QuestionSet) {
  let body = ctx.body();
  for q in questions {
    add_spacer(doc, 8, 0);
    let b = badge(set, &q.question_type);
    let table = add_table(doc, 1, 1);
    let c = cell(table, 0, 0);
    shade_cell(c, b.bg);
    border_cell(c, b.text, 4);
    pad_cell(c, 20, 20, 80, 80);
    let p = first_paragraph(c);
    zero_paragraph_spacing(p);
    add_run(p, format!("{}  ", b.label), Font::new(10).bold().colour(b.text));
    add_run(p, marks_label(q.marks), Font::new(9).italic().colour(colours::HINT_TEXT));

    let p = add_spaced_paragraph(doc, 4, 2);
    add_run(p, format!("{}. {}", q.number, q.question), Font::new(body).bold().colour(colours::BLACK));

    if ctx.developing() && !q.word_bank.is_empty() {
      let p = add_spaced_paragraph(doc, 2, 2);
      add_run(
        p,
        format!("Hint words: {}", q.word_bank.join(", ")),
        Font::new(body - 2).italic().colour(colours::HINT_TEXT),
      );
    }

    if ctx.show_answers {
      let p = add_spaced_paragraph(doc, 4, 4);
      let answer = q.answer.as_deref().unwrap_or(NO_ANSWER);
      add_run(p, format!("Answer: {answer}"), Font::new(body - 1).bold().colour(colours::CRITERIA_TEXT));
    } else {
      writing_lines(doc, ctx, q.lines as usize);
    }
  }
}

/// Two-column Item / Value table of scenario facts.
pub fn data_table(doc: &mut Document, ctx: &Ctx, items: &[DataItem]) {
  if items.is_empty() {
    return;
  }
  let body = ctx.body();
  let p = add_spaced_paragraph(doc, 8, 4);
  add_run(p, "Key Information", Font::new(if ctx.developing() { 16 } else { 14 }).bold().colour(colours::TITLE_TEXT));

  let table = add_table(doc, items.len() + 1, 2);
  full_width_table(table);
  for (col, heading) in ["Item", "Value"].iter().enumerate() {
    let c = cell(table, 0, col);
    shade_cell(c, ctx.theme.header);
    border_cell(c, ctx.theme.header, 4);
    pad_cell(c, 60, 60, 100, 100);
    let p = first_paragraph(c);
    zero_paragraph_spacing(p);
    add_run(p, *heading, Font::new(body).bold().colour(colours::WHITE));
  }
  for (i, item) in items.iter().enumerate() {
    let values = [(item.label.as_str(), true), (item.value.as_deref().unwrap_or(""), false)];
    for (col, (text, bold)) in values.into_iter().enumerate() {
      let c = cell(table, i + 1, col);
      shade_cell(c, ctx.theme.body);
      border_cell(c, ctx.theme.header, 4);
      pad_cell(c, 60, 60, 100, 100);
      let p = first_paragraph(c);
      zero_paragraph_spacing(p);
      let font = if bold { Font::new(body).bold() } else { Font::new(body) };
      add_run(p, text, font.colour(colours::BLACK));
    }
  }
  add_spacer(doc, 6, 0);
}

/// Two-column grid of calculation cards; an odd trailing cell is left empty.
pub fn calculation_grid(doc: &mut Document, ctx: &Ctx, calculations: &[Calculation]) {
  if calculations.is_empty() {
    return;
  }
  let body = ctx.body();
  let rows = calculations.len().div_ceil(2);
  let table = add_table(doc, rows, 2);
  full_width_table(table);

  for (i, calc) in calculations.iter().enumerate() {
    let c = cell(table, i / 2, i % 2);
    shade_cell(c, ctx.theme.body);
    border_cell(c, ctx.theme.accent, 6);
    pad_cell(c, 120, 120, 150, 150);
    let p = first_paragraph(c);
    zero_paragraph_spacing(p);
    add_run(p, calc.question.as_str(), Font::new(body).bold().colour(colours::BLACK));

    if ctx.show_answers {
      if let Some(answer) = &calc.answer {
        let p = add_spaced_paragraph(c, 4, 0);
        add_run(p, format!("Answer: {answer}"), Font::new(body).bold().colour(colours::CRITERIA_TEXT));
      }
    } else {
      if let Some(hint) = &calc.working_hint {
        let p = add_spaced_paragraph(c, 2, 0);
        add_run(p, hint.as_str(), Font::new(body - 3).italic().colour(colours::HINT_TEXT));
      }
      let p = add_spaced_paragraph(c, 8, 0);
      add_run(p, "= ____________", Font::new(body).colour(colours::HINT_TEXT));
    }
  }

  if calculations.len() % 2 == 1 {
    clear_cell(cell(table, rows - 1, 1));
  }
  add_spacer(doc, 6, 0);
}
