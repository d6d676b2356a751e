//! Loading service configuration (model settings + prompts) from TOML.
//!
//! See `AppConfig`, `LlmSettings` and `Prompts` for the expected schema. Every
//! field has a default, so an empty or missing file is valid.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::WorksheetType;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub llm: LlmSettings,
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub sessions: SessionSettings,
}

/// In-memory session retention. Oldest sessions are dropped past the cap.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
  pub max_sessions: usize,
}

impl Default for SessionSettings {
  fn default() -> Self {
    Self { max_sessions: 200 }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
  pub temperature: f32,
  pub max_tokens: u32,
  /// Budget for worksheet types with long passages.
  pub long_max_tokens: u32,
  pub timeout_secs: u64,
}

impl Default for LlmSettings {
  fn default() -> Self {
    Self { temperature: 0.7, max_tokens: 4096, long_max_tokens: 6144, timeout_secs: 60 }
  }
}

impl LlmSettings {
  pub fn max_tokens_for(&self, kind: WorksheetType) -> u32 {
    if kind.needs_long_completion() { self.long_max_tokens } else { self.max_tokens }
  }
}

/// Prompts sent to the content model. One user template per worksheet type.
/// Placeholders: {year_group} {age_range} {topic} {objective} {theme_name}
/// {theme_icon} {level}.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub system: String,
  pub cloze: String,
  pub word_bank: String,
  pub matching: String,
  pub sentence_builder: String,
  pub reading_comprehension: String,
  pub problem_solving: String,
  pub calculation_practice: String,
  pub investigation: String,
}

const SHARED_RULES: &str = "\
Level rules for {level}:
- developing: short sentences, 4-6 blanks or items, every blank has exactly 3 \"choices\", word bank words carry a \"definition\", questions carry a \"word_bank\" of hint words, no bonus/extension/challenge (use null).
- expected: 6-10 blanks or items, blanks carry a \"hint\" and no choices, definitions omitted.
- greater_depth: 8-12 blanks or items, some blanks are word_type \"open\" with no hint, include a bonus/extension/challenge.
Word types: time, adjective, verb, noun, name, open, adverb, connective, preposition, punctuation, operation, shape, measure, number, vocabulary, process, equipment, organism, material, event, person, place, date, feature, climate, algorithm, data, hardware, software, phrase.
Every object has \"title\" and \"success_criteria\" (3-5 short \"I can...\" statements).";

fn template(body: &str) -> String {
  format!(
    "Create a {{theme_name}} {{theme_icon}} themed worksheet for {{year_group}} pupils (age {{age_range}}) on \"{{topic}}\".\n\
     Learning objective: {{objective}}\n\
     Differentiation level: {{level}}\n\n{body}\n\n{SHARED_RULES}\n\nReturn ONLY the JSON object."
  )
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      system: "You are an expert UK primary school teacher who writes engaging, age-appropriate worksheets. \
               Respond ONLY with a single strict JSON object matching the requested schema."
        .into(),
      cloze: template(
        "Write a cloze passage. JSON: {\"title\", \"word_bank\": [{\"word_type\", \"words\": [\"w\" | {\"word\", \"definition\"}]}], \
         \"sections\": [{\"title\", \"reminder\", \"paragraphs\": [[{\"type\": \"text\", \"text\"} | {\"type\": \"blank\", \"word_type\", \"hint\", \"choices\", \"answer\"}]]}], \"success_criteria\"}",
      ),
      word_bank: template(
        "Write a word bank activity. JSON: {\"title\", \"categories\": [{\"word_type\", \"label\", \"words\"}], \
         \"activities\": [{\"title\", \"instructions\", \"sentences\": [[pieces as in a cloze]]}], \"success_criteria\"}",
      ),
      matching: template(
        "Write a matching activity. JSON: {\"title\", \"activities\": [{\"title\", \"instructions\", \"pairs\": [{\"left\", \"right\"}]}], \
         \"bonus_activity\": {\"title\", \"instructions\", \"lines\"} | null, \"success_criteria\"}",
      ),
      sentence_builder: template(
        "Write a sentence builder. JSON: {\"title\", \"exercises\": [{\"title\", \"instructions\", \"sentence_parts\": [{\"part\", \"word_type\"}], \
         \"correct_sentence\"}], \"extension\": {\"title\", \"instructions\", \"lines\"} | null, \"success_criteria\"}",
      ),
      reading_comprehension: template(
        "Write a reading comprehension. JSON: {\"title\", \"passage\": {\"title\", \"text\" (paragraphs separated by blank lines), \"source_note\"}, \
         \"vocabulary\": [{\"word\", \"definition\", \"word_type\"}], \"questions\": [{\"number\", \"question\", \
         \"question_type\": retrieval|inference|vocabulary|author_intent|evaluation, \"marks\", \"lines\", \"answer\", \"word_bank\"}], \"success_criteria\"}",
      ),
      problem_solving: template(
        "Write a maths problem-solving sheet. JSON: {\"title\", \"scenario\": {\"title\", \"text\", \"data\": [{\"label\", \"value\"}]}, \
         \"questions\": [{\"number\", \"question\", \"question_type\": calculate|explain|estimate|prove, \"marks\", \"lines\", \"answer\", \"word_bank\"}], \"success_criteria\"}",
      ),
      calculation_practice: template(
        "Write calculation practice. JSON: {\"title\", \"sections\": [{\"title\", \"instructions\", \"calculations\": [{\"question\", \"answer\", \"working_hint\"}]}], \
         \"challenge\": {\"title\", \"instructions\", \"lines\"} | null, \"success_criteria\"}",
      ),
      investigation: template(
        "Write a science investigation planner. JSON: {\"title\", \"investigation\": {\"question\", \"prediction\", \"prediction_choices\", \
         \"variables\": {\"change\", \"measure\", \"keep_same\": []}}, \"equipment\": [], \"method\": [], \
         \"results_table\": {\"columns\": [], \"units\": [], \"rows\"}, \"conclusion_prompts\": [], \"success_criteria\"}",
      ),
    }
  }
}

impl Prompts {
  pub fn template_for(&self, kind: WorksheetType) -> &str {
    match kind {
      WorksheetType::Cloze => &self.cloze,
      WorksheetType::WordBank => &self.word_bank,
      WorksheetType::Matching => &self.matching,
      WorksheetType::SentenceBuilder => &self.sentence_builder,
      WorksheetType::ReadingComprehension => &self.reading_comprehension,
      WorksheetType::ProblemSolving => &self.problem_solving,
      WorksheetType::CalculationPractice => &self.calculation_practice,
      WorksheetType::Investigation => &self.investigation,
    }
  }
}

/// Parses a TOML document; missing sections fall back to defaults.
pub fn parse_config(s: &str) -> Result<AppConfig, toml::de::Error> {
  toml::from_str::<AppConfig>(s)
}

/// Attempt to load `AppConfig` from WORKSHEET_CONFIG_PATH. On any parsing/IO error, returns defaults.
pub fn load_config_from_env() -> AppConfig {
  let Ok(path) = std::env::var("WORKSHEET_CONFIG_PATH") else {
    return AppConfig::default();
  };
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "worksheet_backend", %path, "Loaded worksheet config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "worksheet_backend", %path, error = %e, "Failed to parse TOML config; using defaults");
        AppConfig::default()
      }
    },
    Err(e) => {
      error!(target: "worksheet_backend", %path, error = %e, "Failed to read TOML config file; using defaults");
      AppConfig::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_keeps_other_defaults() {
    let cfg = parse_config(
      r#"
        [llm]
        temperature = 0.2

        [prompts]
        cloze = "Custom {topic}"
      "#,
    )
    .unwrap();
    assert_eq!(cfg.llm.temperature, 0.2);
    assert_eq!(cfg.llm.max_tokens, 4096);
    assert_eq!(cfg.prompts.cloze, "Custom {topic}");
    assert!(cfg.prompts.matching.contains("\"pairs\""));
    assert_eq!(cfg.sessions.max_sessions, 200);

    let cfg = parse_config("[sessions]\nmax_sessions = 5").unwrap();
    assert_eq!(cfg.sessions.max_sessions, 5);
  }

  #[test]
  fn reading_gets_the_long_budget() {
    let llm = LlmSettings::default();
    assert_eq!(llm.max_tokens_for(WorksheetType::ReadingComprehension), 6144);
    assert_eq!(llm.max_tokens_for(WorksheetType::Cloze), 4096);
  }

  #[test]
  fn default_templates_carry_every_placeholder() {
    let prompts = Prompts::default();
    for kind in WorksheetType::ALL {
      let t = prompts.template_for(kind);
      for key in ["{year_group}", "{age_range}", "{topic}", "{objective}", "{theme_name}", "{level}"] {
        assert!(t.contains(key), "{kind:?} missing {key}");
      }
    }
  }
}
