//! Matching tables (shuffled for pupils, ordered for the answer key) and
//! sentence-builder card rows.

use rand::seq::SliceRandom;

use crate::content::{MatchPair, SentencePart};
use crate::render::model::{Align, Document, Table};
use crate::render::primitives::*;
use crate::render::Ctx;
use crate::styles::{self, colours};

use super::{NO_ANSWER, WRITING_LINE};

const ARROW: &str = "→";
const CARDS_PER_ROW: usize = 5;

fn header_row(table: &mut Table, labels: [&str; 3], fill: &str, text: &str, size: u32) {
  for (col, label) in labels.iter().enumerate() {
    let c = cell(table, 0, col);
    shade_cell(c, fill);
    border_cell(c, colours::GLOSSARY_BORDER, 4);
    pad_cell(c, 60, 60, 100, 100);
    let p = first_paragraph(c);
    zero_paragraph_spacing(p);
    align(p, Align::Center);
    add_run(p, *label, Font::new(size).bold().colour(text));
  }
}

fn body_cell(table: &mut Table, row: usize, col: usize, text: &str, font: Font<'_>, alignment: Align) {
  let c = cell(table, row, col);
  border_cell(c, colours::GLOSSARY_BORDER, 4);
  pad_cell(c, 60, 60, 100, 100);
  let p = first_paragraph(c);
  zero_paragraph_spacing(p);
  align(p, alignment);
  add_run(p, text, font);
}

/// Pupil copy: left column in source order, right column shuffled.
pub fn matching_table(doc: &mut Document, ctx: &mut Ctx, pairs: &[MatchPair]) {
  if pairs.is_empty() {
    return;
  }
  let mut rights: Vec<&str> = pairs.iter().map(|p| p.right.as_str()).collect();
  rights.shuffle(&mut ctx.rng);

  let body = ctx.body();
  let table = add_table(doc, pairs.len() + 1, 3);
  full_width_table(table);
  header_row(table, ["Term", "", "Definition"], colours::TABLE_HEADER_BG, colours::GREY_TEXT, body - 2);
  for (i, (pair, right)) in pairs.iter().zip(rights).enumerate() {
    let row = i + 1;
    body_cell(table, row, 0, &pair.left, Font::new(body).bold().colour(colours::BLACK), Align::Left);
    body_cell(table, row, 1, ARROW, Font::new(body).colour(colours::HINT_TEXT), Align::Center);
    body_cell(table, row, 2, right, Font::new(body).colour(colours::BLACK), Align::Left);
  }
  add_spacer(doc, 6, 0);
}

/// Answer key: pairs in source order, numbered, matches in bold green.
pub fn matching_answer_table(doc: &mut Document, ctx: &Ctx, pairs: &[MatchPair]) {
  if pairs.is_empty() {
    return;
  }
  let body = ctx.body();
  let table = add_table(doc, pairs.len() + 1, 3);
  full_width_table(table);
  header_row(table, ["Term", "", "Correct Match"], colours::ANSWER_HEADER_BG, colours::CRITERIA_TEXT, body - 2);
  for (i, pair) in pairs.iter().enumerate() {
    let row = i + 1;
    let left = format!("{}. {}", i + 1, pair.left);
    body_cell(table, row, 0, &left, Font::new(body).bold().colour(colours::BLACK), Align::Left);
    body_cell(table, row, 1, ARROW, Font::new(body).colour(colours::CRITERIA_TEXT), Align::Center);
    body_cell(table, row, 2, &pair.right, Font::new(body).bold().colour(colours::CRITERIA_TEXT), Align::Left);
  }
  add_spacer(doc, 6, 0);
}

/// Pupil copy: shuffled word cards in rows of five, then a writing line.
/// Answer key: the model sentence only.
pub fn sentence_builder(doc: &mut Document, ctx: &mut Ctx, parts: &[SentencePart], correct: Option<&str>) {
  let body = ctx.body();
  if ctx.show_answers {
    let p = add_spaced_paragraph(doc, 8, 0);
    let sentence = correct.unwrap_or(NO_ANSWER);
    add_run(p, format!("Answer: {sentence}"), Font::new(body).bold().colour(colours::CRITERIA_TEXT));
    return;
  }

  let mut cards: Vec<&SentencePart> = parts.iter().collect();
  cards.shuffle(&mut ctx.rng);
  for chunk in cards.chunks(CARDS_PER_ROW) {
    add_spacer(doc, 4, 0);
    let table = add_table(doc, 1, chunk.len());
    strip_table_borders(table);
    for (col, part) in chunk.iter().enumerate() {
      let entry = styles::word_type(&part.word_type);
      let c = cell(table, 0, col);
      shade_cell(c, entry.bg);
      border_cell(c, entry.border, 8);
      pad_cell(c, 80, 80, 100, 100);
      let p = first_paragraph(c);
      zero_paragraph_spacing(p);
      align(p, Align::Center);
      add_run(p, format!("{} ", entry.symbol), Font::new(body - 4).colour(entry.text));
      add_run(p, part.part.as_str(), Font::new(body).bold().colour(entry.text));
    }
  }

  let p = add_spaced_paragraph(doc, 8, 4);
  add_run(p, "Write your sentence: ", Font::new(body - 2).bold().colour(colours::GREY_TEXT));
  let p = add_spaced_paragraph(doc, 4, 4);
  add_run(p, WRITING_LINE, Font::new(body).colour(colours::HINT_TEXT));
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Level, ThemeKey};

  // ── helpers ──

  fn pairs(items: &[(&str, &str)]) -> Vec<MatchPair> {
    items.iter().map(|(l, r)| MatchPair { left: (*l).into(), right: (*r).into() }).collect()
  }

  fn column(table: &Table, col: usize) -> Vec<String> {
    (1..table.rows.len()).map(|r| table.cell(r, col).unwrap().text()).collect()
  }

  fn row_text(table: &Table, row: usize) -> String {
    (0..3).map(|c| table.cell(row, c).unwrap().text()).collect::<Vec<_>>().join(" ")
  }

  // ── matching ──

  #[test]
  fn answer_key_rows_are_stable_and_numbered() {
    let ps = pairs(&[("Sun", "A star"), ("Moon", "Orbits Earth")]);
    for seed in 0..5 {
      let mut doc = base_document(false);
      let ctx = Ctx::new(ThemeKey::Space, Level::Expected, true, Some(seed));
      matching_answer_table(&mut doc, &ctx, &ps);
      let t = doc.tables().next().unwrap();
      assert_eq!(row_text(t, 1), "1. Sun → A star");
      assert_eq!(row_text(t, 2), "2. Moon → Orbits Earth");
      assert_eq!(t.cell(0, 2).unwrap().text(), "Correct Match");
    }
  }

  #[test]
  fn student_shuffle_preserves_right_hand_multiset() {
    let ps = pairs(&[("Sun", "A star"), ("Moon", "Orbits Earth"), ("Mars", "Red planet"), ("Comet", "Icy visitor")]);
    let mut doc = base_document(false);
    let mut ctx = Ctx::new(ThemeKey::Space, Level::Expected, false, Some(42));
    matching_table(&mut doc, &mut ctx, &ps);
    matching_answer_table(&mut doc, &ctx, &ps);

    let tables: Vec<_> = doc.tables().collect();
    let mut student = column(tables[0], 2);
    let mut answer = column(tables[1], 2);
    assert_eq!(column(tables[0], 0), vec!["Sun", "Moon", "Mars", "Comet"]);
    student.sort();
    answer.sort();
    assert_eq!(student, answer);
  }

  #[test]
  fn same_seed_gives_same_shuffle() {
    let ps = pairs(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4"), ("e", "5")]);
    let render = |seed| {
      let mut doc = base_document(false);
      matching_table(&mut doc, &mut Ctx::new(ThemeKey::Classic, Level::Expected, false, Some(seed)), &ps);
      let rights = column(doc.tables().next().unwrap(), 2);
      rights
    };
    assert_eq!(render(9), render(9));
  }

  // ── sentence builder ──

  fn parts() -> Vec<SentencePart> {
    ["The", "dragon", "flew", "over", "the", "castle", "."]
      .iter()
      .zip(["name", "noun", "verb", "preposition", "name", "noun", "punctuation"])
      .map(|(p, w)| SentencePart { part: (*p).into(), word_type: w.into() })
      .collect()
  }

  #[test]
  fn cards_wrap_at_five_per_row() {
    let mut doc = base_document(false);
    let mut ctx = Ctx::new(ThemeKey::Jungle, Level::Expected, false, Some(3));
    sentence_builder(&mut doc, &mut ctx, &parts(), Some("The dragon flew over the castle."));
    let widths: Vec<usize> = doc.tables().map(|t| t.columns).collect();
    assert_eq!(widths, vec![5, 2]);
    let text = doc.plain_text();
    assert!(text.contains("Write your sentence: "));
    assert!(!text.contains("Answer:"));
  }

  #[test]
  fn answer_mode_shows_correct_sentence_in_success_colour() {
    let mut doc = base_document(false);
    let mut ctx = Ctx::new(ThemeKey::Jungle, Level::Expected, true, Some(3));
    sentence_builder(&mut doc, &mut ctx, &parts(), Some("The dragon flew over the castle."));
    assert_eq!(doc.tables().count(), 0);
    let last = doc.all_paragraphs().into_iter().last().unwrap().clone();
    assert_eq!(last.text(), "Answer: The dragon flew over the castle.");
    let run = last.runs().next().unwrap();
    assert!(run.style.bold);
    assert_eq!(run.style.colour.as_deref(), Some(colours::CRITERIA_TEXT));
  }
}
