//! Style registry: theme skins, differentiation levels, the dual-coding
//! word-type table, and the fixed palette. Pure lookup data.

use crate::domain::{Level, ThemeKey};

/// Default body font for every worksheet.
pub const FONT_NAME: &str = "Comic Sans MS";

/// Fixed palette shared by all themes (hex, no leading '#').
pub mod colours {
  pub const TITLE_TEXT: &str = "1B3A5C";
  pub const REMINDER_BG: &str = "E0F2F1";
  pub const REMINDER_BORDER: &str = "0D7377";
  pub const REMINDER_TEXT: &str = "0D7377";
  pub const CRITERIA_BG: &str = "E8F5E9";
  pub const CRITERIA_BORDER: &str = "2E7D32";
  pub const CRITERIA_TEXT: &str = "2E7D32";
  pub const GREY_TEXT: &str = "333333";
  pub const HINT_TEXT: &str = "666666";
  pub const BLACK: &str = "000000";
  pub const WHITE: &str = "FFFFFF";
  pub const OBJECTIVE_BG: &str = "F5F5F5";
  pub const TABLE_HEADER_BG: &str = "E0E0E0";
  pub const ANSWER_HEADER_BG: &str = "C8E6C9";
  pub const GLOSSARY_BORDER: &str = "BDBDBD";
}

#[derive(Debug, PartialEq, Eq)]
pub struct ThemeEntry {
  pub name: &'static str,
  pub icon: &'static str,
  /// Noun used for numbered sections ("Mission 1", "Dive 2").
  pub section: &'static str,
  pub reminder: &'static str,
  pub criteria: &'static str,
  pub header: &'static str,
  pub body: &'static str,
  pub accent: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct LevelEntry {
  pub label: &'static str,
  /// Base body size in points.
  pub font_size: u32,
  /// Exact line spacing in points for passage text.
  pub line_spacing: u32,
  /// Container padding in twips.
  pub padding: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub struct WordTypeEntry {
  pub key: &'static str,
  pub bg: &'static str,
  pub border: &'static str,
  pub text: &'static str,
  pub symbol: &'static str,
  pub label: &'static str,
}

/// Word type every unknown or missing key resolves to.
pub const FALLBACK_WORD_TYPE: &str = "open";

/// Colour key shown under instructions when the caller does not choose one.
pub const DEFAULT_KEY_TYPES: [&str; 4] = ["time", "adjective", "verb", "noun"];
pub const EXTENDED_KEY_TYPES: [&str; 2] = ["name", "open"];

static SPACE: ThemeEntry = ThemeEntry { name: "Space Explorer", icon: "🚀", section: "Mission", reminder: "Captain's Log", criteria: "Mission Checklist", header: "1A237E", body: "E8EAF6", accent: "7C4DFF" };
static OCEAN: ThemeEntry = ThemeEntry { name: "Ocean Adventure", icon: "🌊", section: "Dive", reminder: "Explorer's Note", criteria: "Dive Log", header: "006064", body: "E0F7FA", accent: "00BCD4" };
static JUNGLE: ThemeEntry = ThemeEntry { name: "Jungle Quest", icon: "🌴", section: "Trail", reminder: "Ranger's Tip", criteria: "Quest Tracker", header: "1B5E20", body: "E8F5E9", accent: "66BB6A" };
static TIME_TRAVEL: ThemeEntry = ThemeEntry { name: "Time Traveller", icon: "⌛", section: "Era", reminder: "Traveller's Tip", criteria: "Journey Log", header: "4A148C", body: "F3E5F5", accent: "AB47BC" };
static DETECTIVE: ThemeEntry = ThemeEntry { name: "Mystery Detective", icon: "🔍", section: "Clue", reminder: "Detective's Note", criteria: "Case File", header: "B71C1C", body: "FFEBEE", accent: "EF5350" };
static SUPERHERO: ThemeEntry = ThemeEntry { name: "Superhero Academy", icon: "🦸", section: "Power", reminder: "Hero's Hint", criteria: "Hero Checklist", header: "E65100", body: "FFF3E0", accent: "FF9800" };
static CLASSIC: ThemeEntry = ThemeEntry { name: "Classic", icon: "📚", section: "Section", reminder: "Remember", criteria: "Success Criteria", header: "1565C0", body: "E3F2FD", accent: "42A5F5" };

static DEVELOPING: LevelEntry = LevelEntry { label: "Developing (Maximum Support)", font_size: 16, line_spacing: 32, padding: 150 };
static EXPECTED: LevelEntry = LevelEntry { label: "Expected (Moderate Support)", font_size: 14, line_spacing: 26, padding: 120 };
static GREATER_DEPTH: LevelEntry = LevelEntry { label: "Greater Depth (Minimal Support)", font_size: 12, line_spacing: 22, padding: 100 };

macro_rules! wt {
  ($key:literal, $bg:literal, $border:literal, $text:literal, $sym:literal, $label:literal) => {
    WordTypeEntry { key: $key, bg: $bg, border: $border, text: $text, symbol: $sym, label: $label }
  };
}

static WORD_TYPES: [WordTypeEntry; 30] = [
  // literacy
  wt!("time", "FFF9C4", "F57F17", "E65C00", "⏰", "When? (Time words)"),
  wt!("adjective", "E8F5E9", "388E3C", "2E7D32", "⭐", "Describing Words (Adjectives)"),
  wt!("verb", "E3F2FD", "1565C0", "1565C0", "⚡", "Doing Words (Verbs)"),
  wt!("noun", "FFF3E0", "E65100", "BF360C", "●", "Things & Places (Nouns)"),
  wt!("name", "FCE4EC", "C62828", "C62828", "★", "Names (Proper Nouns)"),
  wt!("open", "F3E5F5", "7B1FA2", "6A1B9A", "✍", "Your Own Words"),
  wt!("adverb", "E0F7FA", "00838F", "006978", "➡", "How Words (Adverbs)"),
  wt!("connective", "FFF8E1", "FF8F00", "E66A00", "⛓", "Joining Words (Connectives)"),
  wt!("preposition", "F1F8E9", "558B2F", "33691E", "↔", "Position Words (Prepositions)"),
  wt!("punctuation", "ECEFF1", "546E7A", "455A64", "✂", "Punctuation"),
  // maths
  wt!("operation", "E3F2FD", "1565C0", "1565C0", "➕", "Operation"),
  wt!("shape", "F3E5F5", "7B1FA2", "6A1B9A", "△", "Shape"),
  wt!("measure", "FFF9C4", "F57F17", "E65C00", "📏", "Measurement"),
  wt!("number", "E8F5E9", "388E3C", "2E7D32", "#", "Number"),
  // science
  wt!("vocabulary", "FCE4EC", "C62828", "C62828", "⭐", "Key Word"),
  wt!("process", "E0F7FA", "00838F", "006978", "⚙", "Process"),
  wt!("equipment", "FFF3E0", "E65100", "BF360C", "🔬", "Equipment"),
  wt!("organism", "E8F5E9", "2E7D32", "1B5E20", "🌱", "Living Thing"),
  wt!("material", "ECEFF1", "546E7A", "455A64", "🧱", "Material"),
  // history
  wt!("event", "FFF8E1", "FF8F00", "E66A00", "📅", "Event"),
  wt!("person", "E3F2FD", "1565C0", "1565C0", "👤", "Person"),
  wt!("place", "F1F8E9", "558B2F", "33691E", "📍", "Place"),
  wt!("date", "FFF9C4", "F57F17", "E65C00", "⏳", "Date/Period"),
  // geography
  wt!("feature", "E0F2F1", "00695C", "004D40", "⛰", "Feature"),
  wt!("climate", "E3F2FD", "0277BD", "01579B", "🌡", "Climate/Weather"),
  // computing
  wt!("algorithm", "E8EAF6", "283593", "1A237E", "⚙", "Algorithm"),
  wt!("data", "E0F7FA", "00838F", "006978", "📊", "Data"),
  wt!("hardware", "ECEFF1", "546E7A", "455A64", "🖥", "Hardware"),
  wt!("software", "F3E5F5", "7B1FA2", "6A1B9A", "💻", "Software"),
  // languages
  wt!("phrase", "FFF8E1", "FF8F00", "E66A00", "💬", "Phrase"),
];

pub fn theme(key: ThemeKey) -> &'static ThemeEntry {
  match key {
    ThemeKey::Space => &SPACE,
    ThemeKey::Ocean => &OCEAN,
    ThemeKey::Jungle => &JUNGLE,
    ThemeKey::TimeTravel => &TIME_TRAVEL,
    ThemeKey::Detective => &DETECTIVE,
    ThemeKey::Superhero => &SUPERHERO,
    ThemeKey::Classic => &CLASSIC,
  }
}

pub fn level(key: Level) -> &'static LevelEntry {
  match key {
    Level::Developing => &DEVELOPING,
    Level::Expected => &EXPECTED,
    Level::GreaterDepth => &GREATER_DEPTH,
  }
}

/// Exact lookup; `None` for keys outside the registry.
pub fn find_word_type(key: &str) -> Option<&'static WordTypeEntry> {
  WORD_TYPES.iter().find(|w| w.key == key)
}

/// Lookup with the single registry-wide fallback (`open`).
pub fn word_type(key: &str) -> &'static WordTypeEntry {
  find_word_type(key).unwrap_or_else(fallback_word_type)
}

fn fallback_word_type() -> &'static WordTypeEntry {
  // Index of "open" in WORD_TYPES.
  &WORD_TYPES[5]
}

pub fn all_word_types() -> &'static [WordTypeEntry] { &WORD_TYPES }

/// Age range for a "Year N" label; used to fill prompt templates.
pub fn age_range(year_group: &str) -> &'static str {
  match year_group.trim() {
    "Year 1" => "5-6",
    "Year 2" => "6-7",
    "Year 3" => "7-8",
    "Year 4" => "8-9",
    "Year 5" => "9-10",
    "Year 6" => "10-11",
    _ => "5-11",
  }
}
