//! Serde types for the eight content-tree variants.
//!
//! Only `title` and each variant's primary collection are required. Every other
//! field is optional in practice: absent or `null` means "feature absent".

use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` the same as a missing field.
pub(crate) fn nullable<'de, D, T>(d: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Accepts a string, number or bool and keeps its text form. Models often
/// answer `42` where the schema says `"42"`.
pub(crate) fn text_like<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let v = Option::<serde_json::Value>::deserialize(d)?;
  Ok(match v {
    None | Some(serde_json::Value::Null) => None,
    Some(serde_json::Value::String(s)) => Some(s),
    Some(other) => Some(other.to_string()),
  })
}

// ── pieces ──

/// One segment of a cloze paragraph.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Piece {
  Text {
    #[serde(default, deserialize_with = "nullable")]
    text: String,
  },
  Blank(Blank),
  /// Any segment kind we do not know how to draw; dropped during normalisation.
  #[serde(other)]
  Unknown,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Blank {
  #[serde(default, deserialize_with = "nullable")]
  pub word_type: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub hint: Option<String>,
  #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
  pub choices: Vec<String>,
  #[serde(default, deserialize_with = "text_like", skip_serializing_if = "Option::is_none")]
  pub answer: Option<String>,
}

/// A sentence arrives either as a bare piece list or as `{"pieces": [...]}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawSentence")]
pub struct Sentence {
  pub pieces: Vec<Piece>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSentence {
  Bare(Vec<Piece>),
  Wrapped {
    #[serde(default, deserialize_with = "nullable")]
    pieces: Vec<Piece>,
  },
}

impl From<RawSentence> for Sentence {
  fn from(raw: RawSentence) -> Self {
    match raw {
      RawSentence::Bare(pieces) | RawSentence::Wrapped { pieces } => Sentence { pieces },
    }
  }
}

// ── words ──

/// A vocabulary item. Accepted as a bare string, `{word}` or `{word, definition}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawWord")]
pub struct Word {
  pub word: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub definition: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWord {
  Plain(String),
  Entry {
    word: String,
    #[serde(default)]
    definition: Option<String>,
  },
}

impl From<RawWord> for Word {
  fn from(raw: RawWord) -> Self {
    match raw {
      RawWord::Plain(word) => Word { word, definition: None },
      RawWord::Entry { word, definition } => Word {
        word,
        definition: definition.filter(|d| !d.trim().is_empty()),
      },
    }
  }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct WordCategory {
  #[serde(default, deserialize_with = "nullable")]
  pub word_type: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub words: Vec<Word>,
}

// ── shared blocks ──

/// Bonus / extension / challenge activity with free writing lines.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtensionBlock {
  #[serde(default, deserialize_with = "nullable")]
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub instructions: Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub lines: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Question {
  #[serde(default, deserialize_with = "nullable")]
  pub number: u32,
  #[serde(default, deserialize_with = "nullable")]
  pub question: String,
  #[serde(default, deserialize_with = "nullable")]
  pub question_type: String,
  #[serde(default, deserialize_with = "nullable")]
  pub marks: u32,
  #[serde(default, deserialize_with = "nullable")]
  pub lines: u32,
  #[serde(default, deserialize_with = "text_like", skip_serializing_if = "Option::is_none")]
  pub answer: Option<String>,
  #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
  pub word_bank: Vec<String>,
}

// ── cloze ──

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClozeContent {
  pub title: String,
  pub sections: Vec<ClozeSection>,
  #[serde(default, deserialize_with = "nullable")]
  pub word_bank: Vec<WordCategory>,
  #[serde(default, deserialize_with = "nullable")]
  pub success_criteria: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ClozeSection {
  #[serde(default, deserialize_with = "nullable")]
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub reminder: Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub paragraphs: Vec<Sentence>,
}

// ── word bank ──

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WordBankContent {
  pub title: String,
  #[serde(default, alias = "word_bank", deserialize_with = "nullable")]
  pub categories: Vec<WordCategory>,
  pub activities: Vec<WordBankActivity>,
  #[serde(default, deserialize_with = "nullable")]
  pub success_criteria: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct WordBankActivity {
  #[serde(default, deserialize_with = "nullable")]
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub instructions: Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub sentences: Vec<Sentence>,
}

// ── matching ──

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchingContent {
  pub title: String,
  pub activities: Vec<MatchingActivity>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bonus_activity: Option<ExtensionBlock>,
  #[serde(default, deserialize_with = "nullable")]
  pub success_criteria: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchingActivity {
  #[serde(default, deserialize_with = "nullable")]
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub instructions: Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub pairs: Vec<MatchPair>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchPair {
  #[serde(default, deserialize_with = "nullable")]
  pub left: String,
  #[serde(default, deserialize_with = "nullable")]
  pub right: String,
}

// ── sentence builder ──

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SentenceBuilderContent {
  pub title: String,
  pub exercises: Vec<SentenceExercise>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub extension: Option<ExtensionBlock>,
  #[serde(default, deserialize_with = "nullable")]
  pub success_criteria: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SentenceExercise {
  #[serde(default, deserialize_with = "nullable")]
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub instructions: Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub sentence_parts: Vec<SentencePart>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub correct_sentence: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SentencePart {
  #[serde(default, deserialize_with = "nullable")]
  pub part: String,
  #[serde(default, deserialize_with = "nullable")]
  pub word_type: String,
}

// ── reading comprehension ──

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReadingContent {
  pub title: String,
  pub passage: Passage,
  #[serde(default, deserialize_with = "nullable")]
  pub vocabulary: Vec<VocabEntry>,
  pub questions: Vec<Question>,
  #[serde(default, deserialize_with = "nullable")]
  pub success_criteria: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Passage {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub text: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source_note: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct VocabEntry {
  #[serde(default, deserialize_with = "nullable")]
  pub word: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub definition: Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub word_type: String,
}

// ── problem solving ──

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProblemSolvingContent {
  pub title: String,
  pub scenario: Scenario,
  pub questions: Vec<Question>,
  #[serde(default, deserialize_with = "nullable")]
  pub success_criteria: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub text: String,
  #[serde(default, deserialize_with = "nullable")]
  pub data: Vec<DataItem>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DataItem {
  #[serde(default, deserialize_with = "nullable")]
  pub label: String,
  #[serde(default, deserialize_with = "text_like")]
  pub value: Option<String>,
}

// ── calculation practice ──

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CalculationContent {
  pub title: String,
  pub sections: Vec<CalculationSection>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub challenge: Option<ExtensionBlock>,
  #[serde(default, deserialize_with = "nullable")]
  pub success_criteria: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CalculationSection {
  #[serde(default, deserialize_with = "nullable")]
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub instructions: Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub calculations: Vec<Calculation>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Calculation {
  #[serde(default, deserialize_with = "nullable")]
  pub question: String,
  #[serde(default, deserialize_with = "text_like", skip_serializing_if = "Option::is_none")]
  pub answer: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub working_hint: Option<String>,
}

// ── investigation ──

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InvestigationContent {
  pub title: String,
  pub investigation: InvestigationPlan,
  #[serde(default, deserialize_with = "nullable")]
  pub equipment: Vec<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub method: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub results_table: Option<ResultsTable>,
  #[serde(default, deserialize_with = "nullable")]
  pub conclusion_prompts: Vec<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub success_criteria: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct InvestigationPlan {
  #[serde(default, deserialize_with = "nullable")]
  pub question: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub prediction: Option<String>,
  #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
  pub prediction_choices: Vec<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub variables: Variables,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Variables {
  #[serde(default, deserialize_with = "nullable")]
  pub change: String,
  #[serde(default, deserialize_with = "nullable")]
  pub measure: String,
  #[serde(default, deserialize_with = "nullable")]
  pub keep_same: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ResultsTable {
  #[serde(default, deserialize_with = "nullable")]
  pub columns: Vec<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub units: Vec<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub rows: u32,
}
