//! Cloze, word bank, matching and sentence builder bodies.

use crate::content::{ClozeContent, ExtensionBlock, MatchingContent, SentenceBuilderContent, WordBankContent};
use crate::domain::Level;
use crate::render::model::Document;
use crate::render::primitives::add_spacer;
use crate::render::widgets::{cloze, frame, matching, word_bank};
use crate::render::Ctx;

use super::Assembler;

impl Assembler for ClozeContent {
  fn subtitle(&self, level: Level) -> &'static str {
    match level {
      Level::Developing => "Use the word bank and the choices to write your story!",
      Level::Expected => "Use your plan and the word bank to help you!",
      Level::GreaterDepth => "Use the word bank for ideas, then add your own!",
    }
  }

  fn body(&self, doc: &mut Document, ctx: &mut Ctx) {
    word_bank::word_bank(doc, ctx, &self.word_bank);
    let instructions = match ctx.level {
      Level::Developing => "Write the word you choose on the line. Match the colours!",
      Level::Expected => "Fill in the blanks below. Match the colour and symbol to find the right word in the word bank!",
      Level::GreaterDepth => {
        "Fill in the blanks below. Use the word bank for ideas, but feel free to use your own words too!"
      }
    };
    frame::instructions(doc, ctx, instructions);
    for (i, section) in self.sections.iter().enumerate() {
      frame::section_header(doc, ctx, Some(i + 1), &section.title);
      if let Some(reminder) = &section.reminder {
        frame::reminder_box(doc, ctx, reminder);
      }
      cloze::section_body(doc, ctx, &section.paragraphs);
    }
  }
}

impl Assembler for WordBankContent {
  fn subtitle(&self, _level: Level) -> &'static str {
    "Learn new words and use them in sentences!"
  }

  fn body(&self, doc: &mut Document, ctx: &mut Ctx) {
    word_bank::word_bank(doc, ctx, &self.categories);
    let instructions = match ctx.level {
      Level::Developing => "Choose a word from the word bank to complete each sentence. Match the colours!",
      Level::Expected => "Use the words from the word bank to complete the sentences below.",
      Level::GreaterDepth => {
        "Use the word bank for ideas, then complete the sentences. Can you think of your own words too?"
      }
    };
    frame::instructions(doc, ctx, instructions);
    for (i, activity) in self.activities.iter().enumerate() {
      frame::section_header(doc, ctx, Some(i + 1), &activity.title);
      if let Some(note) = &activity.instructions {
        frame::activity_note(doc, ctx, note);
      }
      for sentence in &activity.sentences {
        cloze::cloze_paragraph(doc, ctx, &sentence.pieces);
      }
    }
  }
}

impl Assembler for MatchingContent {
  fn subtitle(&self, _level: Level) -> &'static str {
    "Draw lines to match the pairs!"
  }

  fn body(&self, doc: &mut Document, ctx: &mut Ctx) {
    for (i, activity) in self.activities.iter().enumerate() {
      frame::section_header(doc, ctx, Some(i + 1), &activity.title);
      if let Some(note) = &activity.instructions {
        frame::activity_note(doc, ctx, note);
      }
      if ctx.show_answers {
        matching::matching_answer_table(doc, ctx, &activity.pairs);
      } else {
        matching::matching_table(doc, ctx, &activity.pairs);
      }
    }
  }

  fn extension(&self) -> Option<(usize, &ExtensionBlock)> {
    self.bonus_activity.as_ref().map(|b| (self.activities.len() + 1, b))
  }
}

impl SentenceBuilderContent {
  /// Distinct word types across every exercise, in first-seen order.
  fn word_types_used(&self) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for part in self.exercises.iter().flat_map(|e| &e.sentence_parts) {
      if !seen.contains(&part.word_type.as_str()) {
        seen.push(part.word_type.as_str());
      }
    }
    seen
  }
}

impl Assembler for SentenceBuilderContent {
  fn subtitle(&self, _level: Level) -> &'static str {
    "Build sentences from the word cards!"
  }

  fn body(&self, doc: &mut Document, ctx: &mut Ctx) {
    add_spacer(doc, 6, 2);
    let used = self.word_types_used();
    if used.is_empty() {
      frame::colour_key(doc, ctx, &frame::key_types(ctx));
    } else {
      frame::colour_key(doc, ctx, &used);
    }

    for (i, exercise) in self.exercises.iter().enumerate() {
      frame::section_header(doc, ctx, Some(i + 1), &exercise.title);
      if let Some(note) = &exercise.instructions {
        frame::activity_note(doc, ctx, note);
      }
      matching::sentence_builder(doc, ctx, &exercise.sentence_parts, exercise.correct_sentence.as_deref());
    }
  }

  fn extension(&self) -> Option<(usize, &ExtensionBlock)> {
    self.extension.as_ref().map(|b| (self.exercises.len() + 1, b))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::ContentTree;
  use crate::domain::{ThemeKey, WorksheetType};
  use crate::render::{build_document, RenderOptions};
  use serde_json::json;

  fn lava_lab() -> serde_json::Value {
    json!({
      "title": "Lava Lab",
      "word_bank": [ { "word_type": "noun", "words": ["magma", "ash"] } ],
      "sections": [ {
        "title": "THE ERUPTION",
        "reminder": "Use describing words!",
        "paragraphs": [ [
          { "type": "text", "text": "The volcano erupts with " },
          { "type": "blank", "word_type": "noun", "hint": "a hot, melted rock", "answer": "magma" },
          { "type": "text", "text": "." }
        ] ]
      } ],
      "success_criteria": ["I can choose nouns"]
    })
  }

  fn render(kind: WorksheetType, level: Level, show_answers: bool, raw: serde_json::Value) -> Document {
    let tree = ContentTree::parse(kind, level, raw).unwrap();
    let opts = RenderOptions {
      theme: ThemeKey::Classic,
      level,
      objective: String::new(),
      extra_spacing: false,
      eal_glossary: false,
      show_answers,
      seed: Some(5),
    };
    build_document(&tree, &opts).unwrap()
  }

  #[test]
  fn cloze_puts_word_bank_before_instructions_and_sections() {
    let text = render(WorksheetType::Cloze, Level::Expected, false, lava_lab()).plain_text();
    let bank = text.find("Word Bank").unwrap();
    let instr = text.find("Fill in the blanks below. Match the colour").unwrap();
    let section = text.find("📚 Section 1: THE ERUPTION").unwrap();
    let reminder = text.find("Remember! Use describing words!").unwrap();
    let hint = text.find("● Things & Places (Nouns): a hot, melted rock").unwrap();
    assert!(bank < instr && instr < section && section < reminder && reminder < hint);
    assert!(text.contains("Use your plan and the word bank to help you!"));
  }

  #[test]
  fn cloze_answer_key_shows_bracketed_answer_without_hints() {
    let text = render(WorksheetType::Cloze, Level::Expected, true, lava_lab()).plain_text();
    assert!(text.contains("The volcano erupts with [magma]."));
    assert!(!text.contains("a hot, melted rock"));
    assert!(text.contains("Teacher Edition"));
  }

  #[test]
  fn word_bank_sentences_render_as_cloze_lines() {
    let raw = json!({
      "title": "Weather Words",
      "categories": [ { "word_type": "adjective", "words": [ { "word": "stormy", "definition": "wild and windy" } ] } ],
      "activities": [ { "title": "Complete", "instructions": "Pick one.", "sentences": [
        [ { "type": "text", "text": "It was a " }, { "type": "blank", "word_type": "adjective", "choices": ["stormy", "sunny", "calm"] }, { "type": "text", "text": " night." } ]
      ] } ]
    });
    let text = render(WorksheetType::WordBank, Level::Developing, false, raw).plain_text();
    assert!(text.contains("stormy — wild and windy"));
    assert!(text.contains("⭐ Choose:  stormy   /   sunny   /   calm"));
    assert!(text.contains("Pick one."));
  }

  #[test]
  fn sentence_builder_extension_is_numbered_after_exercises() {
    let raw = json!({
      "title": "Build It",
      "exercises": [
        { "title": "One", "sentence_parts": [ { "part": "Cats", "word_type": "noun" }, { "part": "nap", "word_type": "verb" } ], "correct_sentence": "Cats nap." },
        { "title": "Two", "sentence_parts": [ { "part": "Dogs", "word_type": "noun" } ] }
      ],
      "extension": { "title": "Your Turn" }
    });
    let text = render(WorksheetType::SentenceBuilder, Level::Expected, true, raw).plain_text();
    assert!(text.contains("📚 Section 3: Your Turn"));
    assert!(text.contains("Answer: Cats nap."));
    assert!(text.contains("Answer: [answer not provided]"));
  }

  #[test]
  fn sentence_builder_key_lists_only_the_word_types_used() {
    let raw = json!({
      "title": "Build It",
      "exercises": [
        { "title": "One", "sentence_parts": [ { "part": "Cats", "word_type": "noun" }, { "part": "nap", "word_type": "verb" } ] },
        { "title": "Two", "sentence_parts": [ { "part": "Dogs", "word_type": "noun" }, { "part": ".", "word_type": "punctuation" } ] }
      ]
    });
    let doc = render(WorksheetType::SentenceBuilder, Level::Expected, false, raw);
    let key = doc
      .tables()
      .find(|t| t.cell(0, 0).is_some_and(|c| c.text().contains("Nouns")))
      .unwrap();
    let labels: Vec<String> = (0..key.columns).map(|c| key.cell(0, c).unwrap().text()).collect();
    assert_eq!(labels, vec!["● Things & Places (Nouns)", "⚡ Doing Words (Verbs)", "✂ Punctuation"]);
    assert!(!doc.plain_text().contains("Describing Words (Adjectives)"));
  }
}
