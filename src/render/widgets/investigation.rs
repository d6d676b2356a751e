//! Science investigation planner widgets.

use crate::content::{InvestigationPlan, ResultsTable, Variables};
use crate::render::model::{Align, Document};
use crate::render::primitives::*;
use crate::render::Ctx;
use crate::styles::colours;

use super::{boxed_cell, writing_lines};

const NBSP: &str = "\u{00A0}";
const DEFAULT_PREDICTION_STARTER: &str = "I predict that...";
const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

fn response_lines(ctx: &Ctx) -> usize {
  if ctx.developing() { 3 } else { 2 }
}

/// The investigation question in a themed callout.
pub fn question_box(doc: &mut Document, ctx: &Ctx, question: &str) {
  add_spacer(doc, 4, 0);
  let c = boxed_cell(doc, ctx.theme.body, ctx.theme.accent, 8);
  pad_cell(c, 120, 120, 150, 150);
  let p = first_paragraph(c);
  zero_paragraph_spacing(p);
  align(p, Align::Center);
  add_run(p, question, Font::new(16).bold().colour(colours::TITLE_TEXT));
}

/// Lettered options when choices exist, else a sentence starter with lines.
pub fn prediction(doc: &mut Document, ctx: &Ctx, plan: &InvestigationPlan) {
  let body = ctx.body();
  if !plan.prediction_choices.is_empty() {
    let p = add_spaced_paragraph(doc, 4, 2);
    add_run(p, "Circle your prediction:", Font::new(body - 2).italic().colour(colours::GREY_TEXT));
    for (choice, letter) in plan.prediction_choices.iter().zip(LETTERS.chars()) {
      let p = add_spaced_paragraph(doc, 4, 2);
      add_run(p, format!("    {letter})  {choice}"), Font::new(body).colour(colours::BLACK));
    }
    return;
  }
  let starter = plan.prediction.as_deref().unwrap_or(DEFAULT_PREDICTION_STARTER);
  let p = add_spaced_paragraph(doc, 4, 2);
  add_run(p, starter, Font::new(body).italic().colour(colours::GREY_TEXT));
  writing_lines(doc, ctx, response_lines(ctx));
}

/// Three-column fair-test table: change / measure / keep the same.
pub fn variables_table(doc: &mut Document, ctx: &Ctx, vars: &Variables) {
  let body = ctx.body();
  let table = add_table(doc, 2, 3);
  full_width_table(table);
  let headers = ["What we will change", "What we will measure", "What we will keep the same"];
  let values = [vars.change.clone(), vars.measure.clone(), vars.keep_same.join("\n")];

  for (col, heading) in headers.iter().enumerate() {
    let c = cell(table, 0, col);
    shade_cell(c, ctx.theme.header);
    border_cell(c, ctx.theme.header, 4);
    pad_cell(c, 60, 60, 100, 100);
    let p = first_paragraph(c);
    zero_paragraph_spacing(p);
    align(p, Align::Center);
    add_run(p, *heading, Font::new(body - 2).bold().colour(colours::WHITE));
  }
  for (col, value) in values.iter().enumerate() {
    let c = cell(table, 1, col);
    shade_cell(c, ctx.theme.body);
    border_cell(c, ctx.theme.header, 4);
    pad_cell(c, 80, 80, 100, 100);
    let mut lines = value.split('\n');
    let p = first_paragraph(c);
    zero_paragraph_spacing(p);
    add_run(p, lines.next().unwrap_or_default(), Font::new(body).colour(colours::BLACK));
    for line in lines {
      let p = add_spaced_paragraph(c, 2, 0);
      add_run(p, line, Font::new(body).colour(colours::BLACK));
    }
  }
  add_spacer(doc, 4, 0);
}

pub fn equipment_list(doc: &mut Document, ctx: &Ctx, items: &[String]) {
  for item in items {
    let p = add_spaced_paragraph(doc, 2, 2);
    add_run(p, format!("•  {item}"), Font::new(ctx.body()).colour(colours::BLACK));
  }
}

pub fn method_steps(doc: &mut Document, ctx: &Ctx, steps: &[String]) {
  let body = ctx.body();
  for (i, step) in steps.iter().enumerate() {
    let p = add_spaced_paragraph(doc, 3, 3);
    add_run(p, format!("{}.  ", i + 1), Font::new(body).bold().colour(colours::GREY_TEXT));
    add_run(p, step.as_str(), Font::new(body).colour(colours::BLACK));
  }
}

/// Header row of `name` plus a wrapped `(unit)`, then empty alternating rows.
pub fn results_table(doc: &mut Document, ctx: &Ctx, spec: &ResultsTable) {
  if spec.columns.is_empty() {
    return;
  }
  let body = ctx.body();
  let rows = spec.rows.max(1) as usize;
  let table = add_table(doc, rows + 1, spec.columns.len());
  full_width_table(table);

  for (col, name) in spec.columns.iter().enumerate() {
    let c = cell(table, 0, col);
    shade_cell(c, ctx.theme.header);
    border_cell(c, ctx.theme.header, 4);
    pad_cell(c, 60, 60, 80, 80);
    let p = first_paragraph(c);
    zero_paragraph_spacing(p);
    align(p, Align::Center);
    add_run(p, name.as_str(), Font::new(body - 2).bold().colour(colours::WHITE));
    if let Some(unit) = spec.units.get(col).filter(|u| !u.trim().is_empty()) {
      add_break(p);
      add_run(p, format!("({unit})"), Font::new(body - 4).colour(colours::WHITE));
    }
  }
  for row in 1..=rows {
    for col in 0..spec.columns.len() {
      let c = cell(table, row, col);
      if row % 2 == 0 {
        shade_cell(c, ctx.theme.body);
      }
      border_cell(c, ctx.theme.header, 4);
      pad_cell(c, 120, 120, 80, 80);
      let p = first_paragraph(c);
      zero_paragraph_spacing(p);
      add_run(p, NBSP, Font::new(body).colour(colours::BLACK));
    }
  }
  add_spacer(doc, 4, 0);
}

/// Each prompt as a bold sentence starter followed by writing lines.
pub fn conclusion_prompts(doc: &mut Document, ctx: &Ctx, prompts: &[String]) {
  for prompt in prompts {
    let p = add_spaced_paragraph(doc, 6, 2);
    add_run(p, prompt.as_str(), Font::new(ctx.body()).bold().colour(colours::GREY_TEXT));
    writing_lines(doc, ctx, response_lines(ctx));
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Level, ThemeKey};
  use crate::render::model::Inline;
  use crate::render::widgets::WRITING_LINE;

  fn ctx(level: Level) -> Ctx {
    Ctx::new(ThemeKey::Jungle, level, false, None)
  }

  #[test]
  fn prediction_letters_choices() {
    let plan = InvestigationPlan {
      question: "Which ball bounces highest?".into(),
      prediction_choices: vec!["Tennis ball".into(), "Football".into()],
      ..Default::default()
    };
    let mut doc = base_document(false);
    prediction(&mut doc, &ctx(Level::Developing), &plan);
    let text = doc.plain_text();
    assert!(text.contains("    a)  Tennis ball"));
    assert!(text.contains("    b)  Football"));
    assert!(!text.contains(WRITING_LINE));
  }

  #[test]
  fn prediction_without_choices_uses_starter_and_lines() {
    let plan = InvestigationPlan { prediction: Some("I think the ... will ...".into()), ..Default::default() };
    let mut doc = base_document(false);
    prediction(&mut doc, &ctx(Level::GreaterDepth), &plan);
    let text = doc.plain_text();
    assert!(text.contains("I think the ... will ..."));
    assert_eq!(text.matches(WRITING_LINE).count(), 2);
  }

  #[test]
  fn keep_same_variables_are_one_per_line() {
    let vars = Variables {
      change: "Height of drop".into(),
      measure: "Bounce height".into(),
      keep_same: vec!["Same ball".into(), "Same floor".into()],
    };
    let mut doc = base_document(false);
    variables_table(&mut doc, &ctx(Level::Expected), &vars);
    let t = doc.tables().next().unwrap();
    assert_eq!(t.cell(0, 2).unwrap().text(), "What we will keep the same");
    assert_eq!(t.cell(1, 2).unwrap().text(), "Same ball\nSame floor");
  }

  #[test]
  fn results_header_wraps_unit_and_rows_alternate() {
    let spec = ResultsTable {
      columns: vec!["Drop height".into(), "Bounce".into()],
      units: vec!["cm".into()],
      rows: 4,
    };
    let mut doc = base_document(false);
    let c = ctx(Level::Expected);
    results_table(&mut doc, &c, &spec);
    let t = doc.tables().next().unwrap();
    assert_eq!(t.rows.len(), 5);
    let header = t.cell(0, 0).unwrap().paragraphs().next().unwrap().clone();
    assert!(header.inlines.contains(&Inline::Break));
    assert_eq!(t.cell(0, 0).unwrap().text(), "Drop height\n(cm)");
    assert_eq!(t.cell(0, 1).unwrap().text(), "Bounce");
    assert_eq!(t.cell(1, 0).unwrap().props.shading, None);
    assert_eq!(t.cell(2, 0).unwrap().props.shading.as_deref(), Some(c.theme.body));
    assert_eq!(t.cell(3, 1).unwrap().text(), NBSP);
  }

  #[test]
  fn method_steps_are_numbered() {
    let mut doc = base_document(false);
    method_steps(&mut doc, &ctx(Level::Expected), &["Drop the ball.".into(), "Measure.".into()]);
    let text = doc.plain_text();
    assert!(text.contains("1.  Drop the ball."));
    assert!(text.contains("2.  Measure."));
  }

  #[test]
  fn conclusion_lines_vary_by_level() {
    let prompts = vec!["I found that...".to_string()];
    let count = |level| {
      let mut doc = base_document(false);
      conclusion_prompts(&mut doc, &ctx(level), &prompts);
      doc.plain_text().matches(WRITING_LINE).count()
    };
    assert_eq!(count(Level::Developing), 3);
    assert_eq!(count(Level::Expected), 2);
  }
}
