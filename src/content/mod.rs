//! Content trees: the structured worksheet content produced once per level.
//!
//! `ContentTree::parse` is the single ingestion boundary. It deserialises the
//! collaborator's JSON into the typed variant for the worksheet type, then runs
//! the per-level normaliser so widgets never branch on missing data twice.

mod normalize;
mod preview;
pub mod schema;

use serde::Serialize;
use tracing::debug;

use crate::domain::{Level, WorksheetType};
use crate::error::ContentError;

pub use schema::*;

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum ContentTree {
  Cloze(ClozeContent),
  WordBank(WordBankContent),
  Matching(MatchingContent),
  SentenceBuilder(SentenceBuilderContent),
  ReadingComprehension(ReadingContent),
  ProblemSolving(ProblemSolvingContent),
  CalculationPractice(CalculationContent),
  Investigation(InvestigationContent),
}

fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T, ContentError> {
  serde_json::from_value(value).map_err(|e| ContentError::Malformed(e.to_string()))
}

impl ContentTree {
  /// Typed, normalised tree for `kind` at `level`.
  pub fn parse(kind: WorksheetType, level: Level, value: serde_json::Value) -> Result<Self, ContentError> {
    let usable = match &value {
      serde_json::Value::Object(map) => !map.is_empty(),
      _ => false,
    };
    if !usable {
      return Err(ContentError::Empty);
    }

    let mut tree = match kind {
      WorksheetType::Cloze => ContentTree::Cloze(decode(value)?),
      WorksheetType::WordBank => ContentTree::WordBank(decode(value)?),
      WorksheetType::Matching => ContentTree::Matching(decode(value)?),
      WorksheetType::SentenceBuilder => ContentTree::SentenceBuilder(decode(value)?),
      WorksheetType::ReadingComprehension => ContentTree::ReadingComprehension(decode(value)?),
      WorksheetType::ProblemSolving => ContentTree::ProblemSolving(decode(value)?),
      WorksheetType::CalculationPractice => ContentTree::CalculationPractice(decode(value)?),
      WorksheetType::Investigation => ContentTree::Investigation(decode(value)?),
    };
    tree.normalize(level);
    debug!(target: "worksheet", kind = kind.key(), %level, title = %tree.title(), "Content tree ingested");
    Ok(tree)
  }

  pub fn kind(&self) -> WorksheetType {
    match self {
      ContentTree::Cloze(_) => WorksheetType::Cloze,
      ContentTree::WordBank(_) => WorksheetType::WordBank,
      ContentTree::Matching(_) => WorksheetType::Matching,
      ContentTree::SentenceBuilder(_) => WorksheetType::SentenceBuilder,
      ContentTree::ReadingComprehension(_) => WorksheetType::ReadingComprehension,
      ContentTree::ProblemSolving(_) => WorksheetType::ProblemSolving,
      ContentTree::CalculationPractice(_) => WorksheetType::CalculationPractice,
      ContentTree::Investigation(_) => WorksheetType::Investigation,
    }
  }

  pub fn title(&self) -> &str {
    match self {
      ContentTree::Cloze(c) => &c.title,
      ContentTree::WordBank(c) => &c.title,
      ContentTree::Matching(c) => &c.title,
      ContentTree::SentenceBuilder(c) => &c.title,
      ContentTree::ReadingComprehension(c) => &c.title,
      ContentTree::ProblemSolving(c) => &c.title,
      ContentTree::CalculationPractice(c) => &c.title,
      ContentTree::Investigation(c) => &c.title,
    }
  }

  pub fn success_criteria(&self) -> &[String] {
    match self {
      ContentTree::Cloze(c) => &c.success_criteria,
      ContentTree::WordBank(c) => &c.success_criteria,
      ContentTree::Matching(c) => &c.success_criteria,
      ContentTree::SentenceBuilder(c) => &c.success_criteria,
      ContentTree::ReadingComprehension(c) => &c.success_criteria,
      ContentTree::ProblemSolving(c) => &c.success_criteria,
      ContentTree::CalculationPractice(c) => &c.success_criteria,
      ContentTree::Investigation(c) => &c.success_criteria,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn missing_title_is_malformed() {
    let err = ContentTree::parse(WorksheetType::Cloze, Level::Expected, json!({ "sections": [] })).unwrap_err();
    match err {
      ContentError::Malformed(msg) => assert!(msg.contains("title"), "{msg}"),
      other => panic!("unexpected {other:?}"),
    }
  }

  #[test]
  fn empty_object_and_non_objects_are_empty() {
    assert!(matches!(ContentTree::parse(WorksheetType::Matching, Level::Expected, json!({})), Err(ContentError::Empty)));
    assert!(matches!(ContentTree::parse(WorksheetType::Matching, Level::Expected, json!([1, 2])), Err(ContentError::Empty)));
  }

  #[test]
  fn polymorphic_words_and_sentences_are_accepted() {
    let tree = ContentTree::parse(
      WorksheetType::WordBank,
      Level::Developing,
      json!({
        "title": "Rock Words",
        "word_bank": [
          { "word_type": "noun", "words": ["lava", { "word": "magma" }, { "word": "crater", "definition": "the bowl at the top" }] }
        ],
        "activities": [
          { "title": "Fill the Gaps", "sentences": [
            [ { "type": "text", "text": "Hot " }, { "type": "blank", "word_type": "noun", "answer": "lava" } ],
            { "pieces": [ { "type": "text", "text": "A big hole." } ] }
          ] }
        ]
      }),
    )
    .unwrap();

    let ContentTree::WordBank(wb) = tree else { panic!("wrong variant") };
    let words = &wb.categories[0].words;
    assert_eq!(words[0], Word { word: "lava".into(), definition: None });
    assert_eq!(words[1].word, "magma");
    assert_eq!(words[2].definition.as_deref(), Some("the bowl at the top"));
    assert_eq!(wb.activities[0].sentences.len(), 2);
    assert_eq!(wb.activities[0].sentences[1].pieces.len(), 1);
  }

  #[test]
  fn numeric_answers_keep_their_text() {
    let tree = ContentTree::parse(
      WorksheetType::CalculationPractice,
      Level::Expected,
      json!({
        "title": "Times Tables",
        "sections": [ { "title": "Warm Up", "calculations": [ { "question": "6 x 7", "answer": 42 } ] } ]
      }),
    )
    .unwrap();
    let ContentTree::CalculationPractice(calc) = tree else { panic!("wrong variant") };
    assert_eq!(calc.sections[0].calculations[0].answer.as_deref(), Some("42"));
  }

  #[test]
  fn null_lists_read_as_empty() {
    let tree = ContentTree::parse(
      WorksheetType::Matching,
      Level::Expected,
      json!({ "title": "Pairs", "activities": [], "success_criteria": null, "bonus_activity": null }),
    )
    .unwrap();
    assert!(tree.success_criteria().is_empty());
    assert_eq!(tree.kind(), WorksheetType::Matching);
  }
}
