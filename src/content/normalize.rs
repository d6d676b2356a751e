//! Per-level defaults applied once at ingestion.

use crate::domain::Level;
use crate::styles::{self, FALLBACK_WORD_TYPE};

use super::schema::*;
use super::ContentTree;

const DEFAULT_QUESTION_LINES: u32 = 2;
const DEFAULT_EXTENSION_LINES: u32 = 4;
const DEFAULT_CHALLENGE_LINES: u32 = 3;
const DEFAULT_RESULT_ROWS: u32 = 4;
const MAX_CHOICES: usize = 3;
const MAX_WRITING_LINES: u32 = 20;
const MAX_RESULT_ROWS: u32 = 30;

/// Canonical registry key for whatever the model wrote.
pub(crate) fn resolve_word_type(raw: &str) -> String {
  let key = raw.trim().to_lowercase();
  match styles::find_word_type(&key) {
    Some(entry) => entry.key.to_string(),
    None => FALLBACK_WORD_TYPE.to_string(),
  }
}

fn non_empty(opt: &mut Option<String>) {
  if opt.as_deref().is_some_and(|s| s.trim().is_empty()) {
    *opt = None;
  }
}

fn normalize_pieces(pieces: &mut Vec<Piece>, level: Level) {
  pieces.retain(|p| match p {
    Piece::Text { text } => !text.is_empty(),
    Piece::Blank(_) => true,
    Piece::Unknown => false,
  });
  for piece in pieces.iter_mut() {
    if let Piece::Blank(blank) = piece {
      blank.word_type = resolve_word_type(&blank.word_type);
      non_empty(&mut blank.hint);
      non_empty(&mut blank.answer);
      blank.choices.retain(|c| !c.trim().is_empty());
      if level.is_developing() {
        blank.choices.truncate(MAX_CHOICES);
      } else {
        blank.choices.clear();
      }
    }
  }
}

fn normalize_categories(categories: &mut [WordCategory]) {
  for cat in categories {
    cat.word_type = resolve_word_type(&cat.word_type);
    non_empty(&mut cat.label);
    cat.words.retain(|w| !w.word.trim().is_empty());
  }
}

fn normalize_questions(questions: &mut [Question]) {
  for (idx, q) in questions.iter_mut().enumerate() {
    if q.number == 0 {
      q.number = idx as u32 + 1;
    }
    if q.marks == 0 {
      q.marks = 1;
    }
    if q.lines == 0 {
      q.lines = DEFAULT_QUESTION_LINES;
    }
    q.lines = q.lines.min(MAX_WRITING_LINES);
    non_empty(&mut q.answer);
    q.word_bank.retain(|w| !w.trim().is_empty());
  }
}

fn normalize_extension(block: &mut Option<ExtensionBlock>, default_lines: u32) {
  if let Some(b) = block {
    if b.lines == 0 {
      b.lines = default_lines;
    }
    b.lines = b.lines.min(MAX_WRITING_LINES);
    non_empty(&mut b.instructions);
  }
}

impl ContentTree {
  pub(crate) fn normalize(&mut self, level: Level) {
    match self {
      ContentTree::Cloze(c) => {
        normalize_categories(&mut c.word_bank);
        for section in &mut c.sections {
          non_empty(&mut section.reminder);
          for para in &mut section.paragraphs {
            normalize_pieces(&mut para.pieces, level);
          }
        }
      }
      ContentTree::WordBank(c) => {
        normalize_categories(&mut c.categories);
        for activity in &mut c.activities {
          non_empty(&mut activity.instructions);
          for sentence in &mut activity.sentences {
            normalize_pieces(&mut sentence.pieces, level);
          }
        }
      }
      ContentTree::Matching(c) => {
        for activity in &mut c.activities {
          non_empty(&mut activity.instructions);
        }
        normalize_extension(&mut c.bonus_activity, DEFAULT_EXTENSION_LINES);
      }
      ContentTree::SentenceBuilder(c) => {
        for ex in &mut c.exercises {
          non_empty(&mut ex.instructions);
          non_empty(&mut ex.correct_sentence);
          ex.sentence_parts.retain(|p| !p.part.trim().is_empty());
          for part in &mut ex.sentence_parts {
            part.word_type = resolve_word_type(&part.word_type);
          }
        }
        normalize_extension(&mut c.extension, DEFAULT_EXTENSION_LINES);
      }
      ContentTree::ReadingComprehension(c) => {
        non_empty(&mut c.passage.title);
        non_empty(&mut c.passage.source_note);
        for v in &mut c.vocabulary {
          v.word_type = resolve_word_type(&v.word_type);
          non_empty(&mut v.definition);
        }
        normalize_questions(&mut c.questions);
      }
      ContentTree::ProblemSolving(c) => {
        non_empty(&mut c.scenario.title);
        normalize_questions(&mut c.questions);
      }
      ContentTree::CalculationPractice(c) => {
        for section in &mut c.sections {
          non_empty(&mut section.instructions);
          for calc in &mut section.calculations {
            non_empty(&mut calc.answer);
            non_empty(&mut calc.working_hint);
          }
        }
        normalize_extension(&mut c.challenge, DEFAULT_CHALLENGE_LINES);
      }
      ContentTree::Investigation(c) => {
        non_empty(&mut c.investigation.prediction);
        c.investigation.prediction_choices.retain(|s| !s.trim().is_empty());
        if let Some(table) = &mut c.results_table {
          if table.rows == 0 {
            table.rows = DEFAULT_RESULT_ROWS;
          }
          table.rows = table.rows.min(MAX_RESULT_ROWS);
        }
        if c.results_table.as_ref().is_some_and(|t| t.columns.is_empty()) {
          c.results_table = None;
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::WorksheetType;
  use serde_json::json;

  fn cloze_with_blank(level: Level, blank: serde_json::Value) -> Blank {
    let tree = ContentTree::parse(
      WorksheetType::Cloze,
      level,
      json!({
        "title": "T",
        "sections": [ { "title": "S", "paragraphs": [ [ { "type": "text", "text": "" }, blank, { "type": "gap" } ] ] } ]
      }),
    )
    .unwrap();
    let ContentTree::Cloze(c) = tree else { panic!("wrong variant") };
    let pieces = &c.sections[0].paragraphs[0].pieces;
    assert_eq!(pieces.len(), 1, "empty text and unknown pieces are dropped");
    match &pieces[0] {
      Piece::Blank(b) => b.clone(),
      other => panic!("expected blank, got {other:?}"),
    }
  }

  #[test]
  fn unknown_word_types_resolve_to_open() {
    let b = cloze_with_blank(Level::Expected, json!({ "type": "blank", "word_type": "Gerund", "hint": "x" }));
    assert_eq!(b.word_type, "open");
    let b = cloze_with_blank(Level::Expected, json!({ "type": "blank", "hint": "x" }));
    assert_eq!(b.word_type, "open");
    let b = cloze_with_blank(Level::Expected, json!({ "type": "blank", "word_type": " NOUN " }));
    assert_eq!(b.word_type, "noun");
  }

  #[test]
  fn developing_keeps_three_choices_others_drop_them() {
    let raw = json!({ "type": "blank", "word_type": "verb", "choices": ["run", "jump", "", "swim", "fly"] });
    let dev = cloze_with_blank(Level::Developing, raw.clone());
    assert_eq!(dev.choices, vec!["run", "jump", "swim"]);
    let exp = cloze_with_blank(Level::Expected, raw);
    assert!(exp.choices.is_empty());
  }

  #[test]
  fn blank_strings_become_absent() {
    let b = cloze_with_blank(Level::Expected, json!({ "type": "blank", "word_type": "noun", "hint": "  ", "answer": "" }));
    assert_eq!(b.hint, None);
    assert_eq!(b.answer, None);
  }

  #[test]
  fn question_defaults_fill_numbers_marks_and_lines() {
    let tree = ContentTree::parse(
      WorksheetType::ReadingComprehension,
      Level::Expected,
      json!({
        "title": "Volcano Diary",
        "passage": { "text": "One.\n\nTwo." },
        "questions": [ { "question": "Why?" }, { "question": "Where?", "number": 7, "marks": 3, "lines": 4 } ]
      }),
    )
    .unwrap();
    let ContentTree::ReadingComprehension(r) = tree else { panic!("wrong variant") };
    assert_eq!((r.questions[0].number, r.questions[0].marks, r.questions[0].lines), (1, 1, 2));
    assert_eq!((r.questions[1].number, r.questions[1].marks, r.questions[1].lines), (7, 3, 4));
  }

  #[test]
  fn extension_and_results_defaults() {
    let tree = ContentTree::parse(
      WorksheetType::CalculationPractice,
      Level::GreaterDepth,
      json!({ "title": "Sums", "sections": [], "challenge": { "title": "Stretch" } }),
    )
    .unwrap();
    let ContentTree::CalculationPractice(c) = tree else { panic!("wrong variant") };
    assert_eq!(c.challenge.map(|b| b.lines), Some(3));

    let tree = ContentTree::parse(
      WorksheetType::Investigation,
      Level::Expected,
      json!({
        "title": "Plants",
        "investigation": { "question": "Do plants need light?" },
        "results_table": { "columns": ["Day", "Height"], "units": ["", "cm"] }
      }),
    )
    .unwrap();
    let ContentTree::Investigation(i) = tree else { panic!("wrong variant") };
    assert_eq!(i.results_table.map(|t| t.rows), Some(4));
  }

  #[test]
  fn results_table_without_columns_is_dropped() {
    let tree = ContentTree::parse(
      WorksheetType::Investigation,
      Level::Expected,
      json!({ "title": "Plants", "investigation": {}, "results_table": { "rows": 3 } }),
    )
    .unwrap();
    let ContentTree::Investigation(i) = tree else { panic!("wrong variant") };
    assert!(i.results_table.is_none());
  }

  #[test]
  fn oversized_line_and_row_counts_are_capped() {
    let tree = ContentTree::parse(
      WorksheetType::Investigation,
      Level::Expected,
      json!({
        "title": "Plants",
        "investigation": { "question": "Do plants need light?" },
        "results_table": { "columns": ["Day"], "rows": 4294967295u32 }
      }),
    )
    .unwrap();
    let ContentTree::Investigation(i) = tree else { panic!("wrong variant") };
    assert_eq!(i.results_table.map(|t| t.rows), Some(MAX_RESULT_ROWS));

    let tree = ContentTree::parse(
      WorksheetType::ProblemSolving,
      Level::Expected,
      json!({
        "title": "Bake Sale",
        "scenario": { "text": "We baked 24 cakes." },
        "questions": [ { "question": "How many?", "lines": 300000 } ]
      }),
    )
    .unwrap();
    let ContentTree::ProblemSolving(p) = tree else { panic!("wrong variant") };
    assert_eq!(p.questions[0].lines, MAX_WRITING_LINES);

    let tree = ContentTree::parse(
      WorksheetType::Matching,
      Level::Expected,
      json!({
        "title": "Pairs",
        "activities": [],
        "bonus_activity": { "title": "More", "lines": 99999 }
      }),
    )
    .unwrap();
    let ContentTree::Matching(m) = tree else { panic!("wrong variant") };
    assert_eq!(m.bonus_activity.map(|b| b.lines), Some(MAX_WRITING_LINES));
  }
}
