//! Widgets that frame every worksheet: title, objective, headers, callouts,
//! colour key, success criteria, glossary and footer.

use crate::content::ExtensionBlock;
use crate::render::model::{Align, Document};
use crate::render::primitives::*;
use crate::render::Ctx;
use crate::styles::{self, colours, DEFAULT_KEY_TYPES, EXTENDED_KEY_TYPES};

use super::{boxed_cell, writing_lines, WRITING_LINE};

/// Themed title banner, then a name/date line on student copies.
pub fn title_block(doc: &mut Document, ctx: &Ctx, title: &str, subtitle: &str) {
  let dev = ctx.developing();
  let cell = boxed_cell(doc, ctx.theme.body, ctx.theme.header, 12);
  pad_cell(cell, 150, 150, 200, 200);

  let heading = if ctx.show_answers {
    format!("{} {} - ANSWER KEY", ctx.theme.icon, title)
  } else {
    format!("{} {}", ctx.theme.icon, title)
  };
  let p = first_paragraph(cell);
  align(p, Align::Center);
  zero_paragraph_spacing(p);
  add_run(p, heading, Font::new(if dev { 28 } else { 24 }).bold().colour(colours::TITLE_TEXT));

  let subtitle = if ctx.show_answers { "Teacher Edition" } else { subtitle };
  let p = add_spaced_paragraph(cell, 4, 0);
  align(p, Align::Center);
  add_run(p, subtitle, Font::new(if dev { 14 } else { 12 }).italic().colour(colours::GREY_TEXT));

  if !ctx.show_answers {
    let p = add_spaced_paragraph(doc, 10, 6);
    add_run(
      p,
      "Name: ______________________    Date: ______________",
      Font::new(if dev { 16 } else { 14 }).colour(colours::GREY_TEXT),
    );
  } else {
    add_spacer(doc, 6, 0);
  }
}

pub fn learning_objective(doc: &mut Document, ctx: &Ctx, objective: &str) {
  let cell = boxed_cell(doc, colours::OBJECTIVE_BG, ctx.theme.accent, 8);
  pad_cell(cell, 80, 80, 150, 150);
  let p = first_paragraph(cell);
  zero_paragraph_spacing(p);
  add_run(p, "Learning Objective: ", Font::new(11).bold().colour(colours::TITLE_TEXT));
  add_run(p, objective, Font::new(11).italic().colour(colours::GREY_TEXT));
  add_spacer(doc, 4, 0);
}

/// One-row legend of word-type colours and symbols. Unknown keys are skipped.
pub fn colour_key(doc: &mut Document, ctx: &Ctx, keys: &[&str]) {
  let entries: Vec<_> = keys.iter().filter_map(|k| styles::find_word_type(k)).collect();
  if entries.is_empty() {
    return;
  }
  let size = if ctx.developing() { 11 } else { 9 };
  let table = add_table(doc, 1, entries.len());
  full_width_table(table);
  for (col, entry) in entries.iter().enumerate() {
    let c = cell(table, 0, col);
    shade_cell(c, entry.bg);
    border_cell(c, entry.border, 6);
    pad_cell(c, 40, 40, 60, 60);
    let p = first_paragraph(c);
    align(p, Align::Center);
    zero_paragraph_spacing(p);
    add_run(p, format!("{} {}", entry.symbol, entry.label), Font::new(size).bold().colour(entry.text));
  }
}

/// Word types shown in the legend for this level.
pub fn key_types(ctx: &Ctx) -> Vec<&'static str> {
  let mut keys = DEFAULT_KEY_TYPES.to_vec();
  if !ctx.developing() {
    keys.extend(EXTENDED_KEY_TYPES);
  }
  keys
}

/// Worksheet-level instructions followed by the colour key.
pub fn instructions(doc: &mut Document, ctx: &Ctx, text: &str) {
  let p = add_spaced_paragraph(doc, 8, 4);
  add_run(p, text, Font::new(ctx.body() - 2).italic().colour(colours::GREY_TEXT));
  colour_key(doc, ctx, &key_types(ctx));
  add_spacer(doc, 4, 0);
}

/// Short italic note under a section header.
pub fn activity_note(doc: &mut Document, ctx: &Ctx, text: &str) {
  let p = add_spaced_paragraph(doc, 4, 4);
  add_run(p, text, Font::new(ctx.body() - 2).italic().colour(colours::GREY_TEXT));
}

/// Full-width header bar, numbered (`Mission 2: ...`) or plain.
pub fn section_header(doc: &mut Document, ctx: &Ctx, number: Option<usize>, title: &str) {
  add_spacer(doc, 8, 2);
  let cell = boxed_cell(doc, ctx.theme.header, ctx.theme.header, 4);
  pad_cell(cell, 60, 60, 150, 150);
  let text = match number {
    Some(n) => format!("{} {} {}: {}", ctx.theme.icon, ctx.theme.section, n, title),
    None => format!("{} {}", ctx.theme.icon, title),
  };
  let p = first_paragraph(cell);
  align(p, Align::Center);
  zero_paragraph_spacing(p);
  add_run(p, text, Font::new(18).bold().colour(colours::WHITE));
}

pub fn reminder_box(doc: &mut Document, ctx: &Ctx, text: &str) {
  add_spacer(doc, 4, 0);
  let cell = boxed_cell(doc, colours::REMINDER_BG, colours::REMINDER_BORDER, 6);
  pad_cell(cell, 60, 60, 150, 150);
  let p = first_paragraph(cell);
  zero_paragraph_spacing(p);
  add_run(p, format!("{}! ", ctx.theme.reminder), Font::new(12).bold().colour(colours::REMINDER_TEXT));
  add_run(p, text, Font::new(12).italic().colour(colours::REMINDER_TEXT));
}

/// Bonus / extension / challenge block with writing lines.
pub fn extension_block(doc: &mut Document, ctx: &Ctx, number: usize, block: &ExtensionBlock) {
  section_header(doc, ctx, Some(number), &block.title);
  if let Some(instr) = &block.instructions {
    activity_note(doc, ctx, instr);
  }
  writing_lines(doc, ctx, block.lines as usize);
}

/// Checklist box. An empty list still draws the titled container.
pub fn success_criteria(doc: &mut Document, ctx: &Ctx, items: &[String]) {
  let dev = ctx.developing();
  add_spacer(doc, 10, 0);
  let cell = boxed_cell(doc, colours::CRITERIA_BG, colours::CRITERIA_BORDER, 10);
  pad_cell(cell, 100, 100, 150, 150);
  let p = first_paragraph(cell);
  zero_paragraph_spacing(p);
  add_run(
    p,
    format!("{} {}", ctx.theme.icon, ctx.theme.criteria),
    Font::new(if dev { 16 } else { 14 }).bold().colour(colours::CRITERIA_TEXT),
  );
  for item in items {
    let p = add_spaced_paragraph(cell, 4, 2);
    add_run(p, format!("☐  {item}"), Font::new(if dev { 14 } else { 12 }).colour(colours::BLACK));
  }
}

/// Fixed lined box for pupils to note home-language translations.
pub fn eal_glossary(doc: &mut Document) {
  add_spacer(doc, 10, 0);
  let table = add_table(doc, 1, 1);
  full_width_table(table);
  let c = cell(table, 0, 0);
  border_cell(c, colours::GLOSSARY_BORDER, 6);
  pad_cell(c, 100, 100, 150, 150);
  let p = first_paragraph(c);
  zero_paragraph_spacing(p);
  add_run(p, "My Word Translations / Notes:", Font::new(12).bold().colour(colours::GREY_TEXT));
  for _ in 0..4 {
    let p = add_spaced_paragraph(c, 8, 0);
    add_run(p, WRITING_LINE, Font::new(12).colour(colours::HINT_TEXT));
  }
}

pub fn footer(doc: &mut Document, ctx: &Ctx, worksheet_label: &str) {
  let p = add_spaced_paragraph(doc, 12, 0);
  align(p, Align::Right);
  add_run(
    p,
    format!("{} — {}", worksheet_label, ctx.level_entry.label),
    Font::new(9).italic().colour(colours::HINT_TEXT),
  );
}
