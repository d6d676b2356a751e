//! Colour-coded word bank grid and the reading vocabulary box.

use crate::content::{VocabEntry, WordCategory};
use crate::render::model::Document;
use crate::render::primitives::*;
use crate::render::Ctx;
use crate::styles::{self, colours};

use super::boxed_cell;

/// Category heading, prefixed with the symbol unless the model already did.
fn category_heading(cat: &WordCategory) -> String {
  let entry = styles::word_type(&cat.word_type);
  let label = cat.label.as_deref().unwrap_or(entry.label);
  if label.starts_with(entry.symbol) {
    label.to_string()
  } else {
    format!("{} {}", entry.symbol, label)
  }
}

/// Two-column grid of word categories; an odd trailing cell is left empty.
pub fn word_bank(doc: &mut Document, ctx: &Ctx, categories: &[WordCategory]) {
  if categories.is_empty() {
    return;
  }
  let dev = ctx.developing();
  let p = add_spaced_paragraph(doc, 8, 2);
  add_run(p, "Word Bank", Font::new(if dev { 18 } else { 16 }).bold().colour(colours::TITLE_TEXT));
  let p = add_spaced_paragraph(doc, 0, 4);
  add_run(
    p,
    "Match the colour and symbol to find the right word!",
    Font::new(10).italic().colour(colours::HINT_TEXT),
  );

  let rows = categories.len().div_ceil(2);
  let table = add_table(doc, rows, 2);
  full_width_table(table);
  let word_size = ctx.body() - 2;

  for (i, cat) in categories.iter().enumerate() {
    let entry = styles::word_type(&cat.word_type);
    let c = cell(table, i / 2, i % 2);
    shade_cell(c, entry.bg);
    border_cell(c, entry.border, 10);
    pad_cell(c, 80, 80, 120, 120);

    let p = first_paragraph(c);
    zero_paragraph_spacing(p);
    add_run(p, category_heading(cat), Font::new(if dev { 13 } else { 12 }).bold().colour(entry.text));

    if dev {
      for w in &cat.words {
        let p = add_spaced_paragraph(c, 2, 0);
        add_run(p, format!("  {}", w.word), Font::new(word_size).bold().colour(colours::BLACK));
        if let Some(def) = &w.definition {
          add_run(p, format!(" — {def}"), Font::new(word_size - 2).italic().colour(colours::GREY_TEXT));
        }
      }
    } else if !cat.words.is_empty() {
      let words: Vec<&str> = cat.words.iter().map(|w| w.word.as_str()).collect();
      let p = add_spaced_paragraph(c, 4, 0);
      add_run(p, format!("  {}", words.join("  |  ")), Font::new(word_size).colour(colours::BLACK));
    }
  }

  if categories.len() % 2 == 1 {
    clear_cell(cell(table, rows - 1, 1));
  }
  add_spacer(doc, 4, 0);
}

/// Key vocabulary from a reading passage, each word coded by its type.
pub fn vocabulary_box(doc: &mut Document, ctx: &Ctx, vocabulary: &[VocabEntry]) {
  if vocabulary.is_empty() {
    return;
  }
  add_spacer(doc, 6, 0);
  let c = boxed_cell(doc, ctx.theme.body, ctx.theme.accent, 8);
  pad_cell(c, 100, 100, 150, 150);
  let p = first_paragraph(c);
  zero_paragraph_spacing(p);
  add_run(p, "Key Vocabulary", Font::new(14).bold().colour(colours::TITLE_TEXT));

  let size = ctx.body() - 2;
  for v in vocabulary {
    let entry = styles::word_type(&v.word_type);
    let p = add_spaced_paragraph(c, 3, 0);
    add_run(p, format!("{} {}", entry.symbol, v.word), Font::new(size).bold().colour(entry.text));
    if let Some(def) = &v.definition {
      add_run(p, format!(" — {def}"), Font::new(size).italic().colour(colours::GREY_TEXT));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::Word;
  use crate::domain::{Level, ThemeKey};
  use crate::render::model::Cell;

  fn category(word_type: &str, words: &[(&str, Option<&str>)]) -> WordCategory {
    WordCategory {
      word_type: word_type.into(),
      label: None,
      words: words
        .iter()
        .map(|(w, d)| Word { word: (*w).into(), definition: d.map(str::to_string) })
        .collect(),
    }
  }

  fn render(level: Level, cats: &[WordCategory]) -> Document {
    let mut doc = base_document(false);
    word_bank(&mut doc, &Ctx::new(ThemeKey::Ocean, level, false, None), cats);
    doc
  }

  #[test]
  fn odd_category_count_leaves_trailing_cell_empty() {
    let cats = vec![
      category("noun", &[("lava", None)]),
      category("verb", &[("erupt", None)]),
      category("adjective", &[("hot", None)]),
    ];
    let doc = render(Level::Expected, &cats);
    let grid = doc.tables().next().unwrap();
    assert_eq!(grid.rows.len(), 2);
    assert_eq!(*grid.cell(1, 1).unwrap(), Cell::default());
    assert_eq!(grid.cell(1, 0).unwrap().props.shading.as_deref(), Some("E8F5E9"));
  }

  #[test]
  fn developing_lists_definitions_one_per_line() {
    let cats = vec![category("noun", &[("magma", Some("melted rock")), ("ash", None)])];
    let doc = render(Level::Developing, &cats);
    let text = doc.tables().next().unwrap().cell(0, 0).unwrap().text();
    assert_eq!(text, "● Things & Places (Nouns)\n  magma — melted rock\n  ash");
  }

  #[test]
  fn other_levels_use_pipe_lists() {
    let cats = vec![category("noun", &[("magma", Some("melted rock")), ("ash", None)])];
    let doc = render(Level::GreaterDepth, &cats);
    let text = doc.tables().next().unwrap().cell(0, 0).unwrap().text();
    assert_eq!(text, "● Things & Places (Nouns)\n  magma  |  ash");
  }

  #[test]
  fn model_supplied_label_is_not_double_prefixed() {
    let mut cat = category("noun", &[]);
    cat.label = Some("● Naming Words".into());
    assert_eq!(category_heading(&cat), "● Naming Words");
    cat.label = Some("Naming Words".into());
    assert_eq!(category_heading(&cat), "● Naming Words");
  }

  #[test]
  fn vocabulary_box_codes_words_by_type() {
    let mut doc = base_document(false);
    let vocab = vec![VocabEntry { word: "erupt".into(), definition: Some("burst out".into()), word_type: "verb".into() }];
    vocabulary_box(&mut doc, &Ctx::new(ThemeKey::Classic, Level::Expected, false, None), &vocab);
    let text = doc.plain_text();
    assert!(text.contains("Key Vocabulary"));
    assert!(text.contains("⚡ erupt — burst out"));
  }
}
