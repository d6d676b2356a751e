//! One fixed-order pipeline shared by every worksheet type:
//! title, objective, body, extension (not at developing), success criteria,
//! EAL glossary, footer. Types only supply the subtitle, the body and an
//! optional extension block.

mod literacy;
mod reasoning;

use crate::content::{ContentTree, ExtensionBlock};
use crate::domain::Level;
use crate::error::RenderError;

use super::model::Document;
use super::primitives::base_document;
use super::widgets::frame;
use super::{Ctx, RenderOptions};

pub(crate) trait Assembler {
  fn subtitle(&self, level: Level) -> &'static str;

  fn body(&self, doc: &mut Document, ctx: &mut Ctx);

  /// Closing bonus activity and the section number it is shown under.
  fn extension(&self) -> Option<(usize, &ExtensionBlock)> {
    None
  }
}

fn assembler(tree: &ContentTree) -> &dyn Assembler {
  match tree {
    ContentTree::Cloze(c) => c,
    ContentTree::WordBank(c) => c,
    ContentTree::Matching(c) => c,
    ContentTree::SentenceBuilder(c) => c,
    ContentTree::ReadingComprehension(c) => c,
    ContentTree::ProblemSolving(c) => c,
    ContentTree::CalculationPractice(c) => c,
    ContentTree::Investigation(c) => c,
  }
}

pub(super) fn assemble(tree: &ContentTree, ctx: &mut Ctx, opts: &RenderOptions) -> Result<Document, RenderError> {
  let title = tree.title().trim();
  if title.is_empty() {
    return Err(RenderError::MissingField("title"));
  }
  let parts = assembler(tree);
  let mut doc = base_document(opts.extra_spacing);

  frame::title_block(&mut doc, ctx, title, parts.subtitle(ctx.level));
  let objective = opts.objective.trim();
  if !objective.is_empty() {
    frame::learning_objective(&mut doc, ctx, objective);
  }
  parts.body(&mut doc, ctx);
  if !ctx.developing() {
    if let Some((number, block)) = parts.extension() {
      frame::extension_block(&mut doc, ctx, number, block);
    }
  }
  frame::success_criteria(&mut doc, ctx, tree.success_criteria());
  if opts.eal_glossary {
    frame::eal_glossary(&mut doc);
  }
  frame::footer(&mut doc, ctx, tree.kind().display_name());
  Ok(doc)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{ThemeKey, WorksheetType};
  use serde_json::{json, Value};

  fn opts(level: Level, show_answers: bool) -> RenderOptions {
    RenderOptions {
      theme: ThemeKey::Ocean,
      level,
      objective: String::new(),
      extra_spacing: false,
      eal_glossary: false,
      show_answers,
      seed: Some(11),
    }
  }

  fn build(kind: WorksheetType, level: Level, show_answers: bool, raw: Value) -> Document {
    let tree = ContentTree::parse(kind, level, raw).unwrap();
    let o = opts(level, show_answers);
    assemble(&tree, &mut Ctx::new(o.theme, level, show_answers, o.seed), &o).unwrap()
  }

  fn matching_raw() -> Value {
    json!({
      "title": "Planet Pairs",
      "activities": [ { "title": "Our Solar System", "pairs": [
        { "left": "Sun", "right": "A star" }, { "left": "Moon", "right": "Orbits Earth" }
      ] } ],
      "bonus_activity": { "title": "Design a Planet", "instructions": "Describe it." },
      "success_criteria": ["I can match words to meanings"]
    })
  }

  fn position(text: &str, needle: &str) -> usize {
    text.find(needle).unwrap_or_else(|| panic!("missing {needle:?} in:\n{text}"))
  }

  #[test]
  fn pipeline_order_is_fixed() {
    let tree = ContentTree::parse(WorksheetType::Matching, Level::Expected, matching_raw()).unwrap();
    let mut o = opts(Level::Expected, false);
    o.objective = "To recall facts about space".into();
    o.eal_glossary = true;
    let doc = assemble(&tree, &mut Ctx::new(o.theme, o.level, false, o.seed), &o).unwrap();
    let text = doc.plain_text();

    let order = [
      "🌊 Planet Pairs",
      "Learning Objective: ",
      "🌊 Dive 1: Our Solar System",
      "🌊 Dive 2: Design a Planet",
      "🌊 Dive Log",
      "My Word Translations / Notes:",
      "Matching Activity — Expected (Moderate Support)",
    ];
    let positions: Vec<usize> = order.iter().map(|n| position(&text, n)).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
  }

  #[test]
  fn extension_is_never_shown_at_developing() {
    let doc = build(WorksheetType::Matching, Level::Developing, false, matching_raw());
    assert!(!doc.plain_text().contains("Design a Planet"));
    let doc = build(WorksheetType::Matching, Level::GreaterDepth, false, matching_raw());
    assert!(doc.plain_text().contains("Design a Planet"));
  }

  #[test]
  fn blank_title_is_a_hard_failure() {
    let mut raw = matching_raw();
    raw["title"] = json!("   ");
    let tree = ContentTree::parse(WorksheetType::Matching, Level::Expected, raw).unwrap();
    let o = opts(Level::Expected, false);
    let err = assemble(&tree, &mut Ctx::new(o.theme, o.level, false, None), &o).unwrap_err();
    assert!(matches!(err, RenderError::MissingField("title")));
  }

  #[test]
  fn objective_and_glossary_are_optional() {
    let text = build(WorksheetType::Matching, Level::Expected, false, matching_raw()).plain_text();
    assert!(!text.contains("Learning Objective"));
    assert!(!text.contains("My Word Translations"));
  }

  #[test]
  fn answer_key_matching_uses_ordered_table() {
    let doc = build(WorksheetType::Matching, Level::Expected, true, matching_raw());
    let text = doc.plain_text();
    assert!(text.contains("Planet Pairs - ANSWER KEY"));
    assert!(text.contains("Correct Match"));
    assert!(text.contains("1. Sun"));
  }

  #[test]
  fn every_type_renders_a_seed_tree_at_every_level() {
    for kind in WorksheetType::ALL {
      for level in Level::ALL {
        let raw = crate::seeds::sample_content(kind, level);
        for answers in [false, true] {
          let doc = build(kind, level, answers, raw.clone());
          let text = doc.plain_text();
          assert!(text.contains(kind.display_name()), "{kind:?} {level:?}");
        }
      }
    }
  }
}
