//! Domain models used by the backend: worksheet kinds, differentiation levels,
//! visual themes, and the generation parameters captured for a session.

use serde::{de, Deserialize, Deserializer, Serialize};

/// Which worksheet layout the content tree is built for. Deserializes from the
/// canonical key or any alias `from_alias` knows.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorksheetType {
  Cloze,
  WordBank,
  Matching,
  SentenceBuilder,
  ReadingComprehension,
  ProblemSolving,
  CalculationPractice,
  Investigation,
}

impl WorksheetType {
  pub const ALL: [WorksheetType; 8] = [
    WorksheetType::Cloze,
    WorksheetType::WordBank,
    WorksheetType::Matching,
    WorksheetType::SentenceBuilder,
    WorksheetType::ReadingComprehension,
    WorksheetType::ProblemSolving,
    WorksheetType::CalculationPractice,
    WorksheetType::Investigation,
  ];

  pub fn key(self) -> &'static str {
    match self {
      WorksheetType::Cloze => "cloze",
      WorksheetType::WordBank => "word_bank",
      WorksheetType::Matching => "matching",
      WorksheetType::SentenceBuilder => "sentence_builder",
      WorksheetType::ReadingComprehension => "reading_comprehension",
      WorksheetType::ProblemSolving => "problem_solving",
      WorksheetType::CalculationPractice => "calculation_practice",
      WorksheetType::Investigation => "investigation",
    }
  }

  /// Human label, used in the footer and in download filenames.
  pub fn display_name(self) -> &'static str {
    match self {
      WorksheetType::Cloze => "Cloze Passage",
      WorksheetType::WordBank => "Word Bank Activity",
      WorksheetType::Matching => "Matching Activity",
      WorksheetType::SentenceBuilder => "Sentence Builder",
      WorksheetType::ReadingComprehension => "Reading Comprehension",
      WorksheetType::ProblemSolving => "Problem Solving",
      WorksheetType::CalculationPractice => "Calculation Practice",
      WorksheetType::Investigation => "Investigation Planner",
    }
  }

  /// Accepts canonical keys plus the loose names teachers type in
  /// ("fill in the blanks", "vocab", "reading" ...).
  pub fn from_alias(raw: &str) -> Option<Self> {
    let norm = raw.trim().to_lowercase().replace(['-', ' '], "_");
    let kind = match norm.as_str() {
      "cloze" | "cloze_passage" | "fill_in_the_blank" | "fill_in_the_blanks" => WorksheetType::Cloze,
      "word_bank" | "wordbank" | "vocabulary" | "vocab" | "word_bank_activity" => WorksheetType::WordBank,
      "matching" | "match" | "connecting" | "matching_activity" => WorksheetType::Matching,
      "sentence_builder" | "sentence_building" | "sentences" => WorksheetType::SentenceBuilder,
      "reading_comprehension" | "reading_comp" | "comprehension" | "reading" => WorksheetType::ReadingComprehension,
      "problem_solving" | "word_problems" | "reasoning" => WorksheetType::ProblemSolving,
      "calculation_practice" | "calculations" | "arithmetic" => WorksheetType::CalculationPractice,
      "investigation" | "investigation_planner" | "science_investigation" | "fair_test" => WorksheetType::Investigation,
      _ => return None,
    };
    Some(kind)
  }

  /// Reading comprehension carries a long passage and needs a bigger completion budget.
  pub fn needs_long_completion(self) -> bool {
    matches!(self, WorksheetType::ReadingComprehension)
  }
}

impl<'de> Deserialize<'de> for WorksheetType {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    WorksheetType::from_alias(&raw).ok_or_else(|| de::Error::custom(format!("unknown worksheet type `{raw}`")))
  }
}

/// Differentiation level, ordered from most to least support.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Level {
  Developing,
  Expected,
  GreaterDepth,
}

impl Level {
  pub const ALL: [Level; 3] = [Level::Developing, Level::Expected, Level::GreaterDepth];

  pub fn key(self) -> &'static str {
    match self {
      Level::Developing => "developing",
      Level::Expected => "expected",
      Level::GreaterDepth => "greater_depth",
    }
  }

  pub fn is_developing(self) -> bool { self == Level::Developing }
}

impl std::fmt::Display for Level {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.key()) }
}

/// Cosmetic skin applied uniformly across a worksheet.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ThemeKey {
  Space,
  Ocean,
  Jungle,
  TimeTravel,
  Detective,
  Superhero,
  #[default]
  Classic,
}

impl ThemeKey {
  pub const ALL: [ThemeKey; 7] = [
    ThemeKey::Space,
    ThemeKey::Ocean,
    ThemeKey::Jungle,
    ThemeKey::TimeTravel,
    ThemeKey::Detective,
    ThemeKey::Superhero,
    ThemeKey::Classic,
  ];

  pub fn key(self) -> &'static str {
    match self {
      ThemeKey::Space => "space",
      ThemeKey::Ocean => "ocean",
      ThemeKey::Jungle => "jungle",
      ThemeKey::TimeTravel => "time_travel",
      ThemeKey::Detective => "detective",
      ThemeKey::Superhero => "superhero",
      ThemeKey::Classic => "classic",
    }
  }
}

fn default_levels() -> Vec<Level> { Level::ALL.to_vec() }
fn default_true() -> bool { true }

/// Everything captured when a teacher presses "generate". Held unchanged for the
/// whole preview / regenerate / build cycle of one session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationParams {
  pub worksheet_type: WorksheetType,
  pub year_group: String,
  pub topic: String,
  #[serde(default)] pub objective: String,
  #[serde(default)] pub theme: ThemeKey,
  #[serde(default = "default_levels")] pub levels: Vec<Level>,
  #[serde(default)] pub extra_spacing: bool,
  #[serde(default)] pub eal_glossary: bool,
  #[serde(default = "default_true")] pub include_answer_key: bool,
}

impl GenerationParams {
  /// Requested levels in canonical order with duplicates removed.
  pub fn ordered_levels(&self) -> Vec<Level> {
    let mut levels = self.levels.clone();
    levels.sort();
    levels.dedup();
    levels
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn aliases_resolve_to_canonical_types() {
    assert_eq!(WorksheetType::from_alias("Fill in the blanks"), Some(WorksheetType::Cloze));
    assert_eq!(WorksheetType::from_alias("vocab"), Some(WorksheetType::WordBank));
    assert_eq!(WorksheetType::from_alias("reading-comp"), Some(WorksheetType::ReadingComprehension));
    assert_eq!(WorksheetType::from_alias("fair test"), Some(WorksheetType::Investigation));
    assert_eq!(WorksheetType::from_alias("crossword"), None);
  }

  #[test]
  fn params_accept_worksheet_type_aliases() {
    let p: GenerationParams = serde_json::from_value(serde_json::json!({
      "worksheet_type": "Fill in the blanks",
      "year_group": "Year 3",
      "topic": "Volcanoes"
    }))
    .unwrap();
    assert_eq!(p.worksheet_type, WorksheetType::Cloze);

    let bad = serde_json::from_value::<GenerationParams>(serde_json::json!({
      "worksheet_type": "crossword",
      "year_group": "Year 3",
      "topic": "Volcanoes"
    }));
    assert!(bad.unwrap_err().to_string().contains("unknown worksheet type `crossword`"));
  }

  #[test]
  fn params_default_to_all_levels_with_answer_keys() {
    let p: GenerationParams = serde_json::from_value(serde_json::json!({
      "worksheet_type": "matching",
      "year_group": "Year 4",
      "topic": "Space"
    }))
    .unwrap();
    assert_eq!(p.levels, Level::ALL.to_vec());
    assert!(p.include_answer_key);
    assert_eq!(p.theme, ThemeKey::Classic);
  }

  #[test]
  fn ordered_levels_sorts_and_dedups() {
    let p = GenerationParams {
      worksheet_type: WorksheetType::Cloze,
      year_group: "Year 3".into(),
      topic: "Volcanoes".into(),
      objective: String::new(),
      theme: ThemeKey::Space,
      levels: vec![Level::GreaterDepth, Level::Developing, Level::GreaterDepth],
      extra_spacing: false,
      eal_glossary: false,
      include_answer_key: false,
    };
    assert_eq!(p.ordered_levels(), vec![Level::Developing, Level::GreaterDepth]);
  }
}
