//! Plain-text preview of a content tree, shown to the teacher before building.

use super::schema::*;
use super::ContentTree;

const PASSAGE_PREVIEW_CHARS: usize = 400;

/// One line of text for a piece list, blanks shown inline.
fn pieces_text(pieces: &[Piece]) -> String {
  let mut out = String::new();
  for piece in pieces {
    match piece {
      Piece::Text { text } => out.push_str(text),
      Piece::Blank(b) => {
        if let Some(answer) = &b.answer {
          out.push_str(&format!("[{answer}]"));
        } else if !b.choices.is_empty() {
          out.push_str(&format!("[{}]", b.choices.join("/")));
        } else if let Some(hint) = &b.hint {
          out.push_str(&format!("[__{hint}__]"));
        } else {
          out.push_str("[________]");
        }
      }
      Piece::Unknown => {}
    }
  }
  out
}

fn excerpt(text: &str, max: usize) -> String {
  if text.chars().count() <= max {
    text.to_string()
  } else {
    let cut: String = text.chars().take(max).collect();
    format!("{cut}...")
  }
}

fn push_categories(lines: &mut Vec<String>, categories: &[WordCategory]) {
  if categories.is_empty() {
    return;
  }
  lines.push("Word bank:".into());
  for cat in categories {
    let words: Vec<&str> = cat.words.iter().map(|w| w.word.as_str()).collect();
    let label = cat.label.as_deref().unwrap_or(&cat.word_type);
    lines.push(format!("  {label}: {}", words.join(", ")));
  }
}

fn push_questions(lines: &mut Vec<String>, questions: &[Question]) {
  for q in questions {
    let plural = if q.marks == 1 { "" } else { "s" };
    lines.push(format!("Q{}. {} ({}, {} mark{plural})", q.number, q.question, q.question_type, q.marks));
    if let Some(answer) = &q.answer {
      lines.push(format!("    Answer: {answer}"));
    }
  }
}

fn push_extension(lines: &mut Vec<String>, label: &str, block: &Option<ExtensionBlock>) {
  if let Some(b) = block {
    lines.push(format!("{label}: {}", b.title));
    if let Some(instr) = &b.instructions {
      lines.push(format!("  {instr}"));
    }
  }
}

impl ContentTree {
  /// Human-readable outline for review.
  pub fn preview(&self) -> Vec<String> {
    let mut lines = vec![format!("# {}", self.title())];
    match self {
      ContentTree::Cloze(c) => {
        push_categories(&mut lines, &c.word_bank);
        for (i, section) in c.sections.iter().enumerate() {
          lines.push(format!("## {}. {}", i + 1, section.title));
          if let Some(r) = &section.reminder {
            lines.push(format!("  Tip: {r}"));
          }
          for para in &section.paragraphs {
            lines.push(pieces_text(&para.pieces));
          }
        }
      }
      ContentTree::WordBank(c) => {
        push_categories(&mut lines, &c.categories);
        for (i, activity) in c.activities.iter().enumerate() {
          lines.push(format!("## {}. {}", i + 1, activity.title));
          for s in &activity.sentences {
            lines.push(format!("  - {}", pieces_text(&s.pieces)));
          }
        }
      }
      ContentTree::Matching(c) => {
        for (i, activity) in c.activities.iter().enumerate() {
          lines.push(format!("## {}. {}", i + 1, activity.title));
          for pair in &activity.pairs {
            lines.push(format!("  {} → {}", pair.left, pair.right));
          }
        }
        push_extension(&mut lines, "Bonus", &c.bonus_activity);
      }
      ContentTree::SentenceBuilder(c) => {
        for (i, ex) in c.exercises.iter().enumerate() {
          lines.push(format!("## {}. {}", i + 1, ex.title));
          let parts: Vec<&str> = ex.sentence_parts.iter().map(|p| p.part.as_str()).collect();
          lines.push(format!("  Cards: {}", parts.join(" | ")));
          if let Some(s) = &ex.correct_sentence {
            lines.push(format!("  Answer: {s}"));
          }
        }
        push_extension(&mut lines, "Extension", &c.extension);
      }
      ContentTree::ReadingComprehension(c) => {
        if let Some(t) = &c.passage.title {
          lines.push(format!("## {t}"));
        }
        lines.push(excerpt(&c.passage.text, PASSAGE_PREVIEW_CHARS));
        if !c.vocabulary.is_empty() {
          let words: Vec<&str> = c.vocabulary.iter().map(|v| v.word.as_str()).collect();
          lines.push(format!("Vocabulary: {}", words.join(", ")));
        }
        push_questions(&mut lines, &c.questions);
      }
      ContentTree::ProblemSolving(c) => {
        if let Some(t) = &c.scenario.title {
          lines.push(format!("## {t}"));
        }
        lines.push(excerpt(&c.scenario.text, PASSAGE_PREVIEW_CHARS));
        for item in &c.scenario.data {
          lines.push(format!("  {}: {}", item.label, item.value.as_deref().unwrap_or("")));
        }
        push_questions(&mut lines, &c.questions);
      }
      ContentTree::CalculationPractice(c) => {
        for (i, section) in c.sections.iter().enumerate() {
          lines.push(format!("## {}. {}", i + 1, section.title));
          for calc in &section.calculations {
            match &calc.answer {
              Some(a) => lines.push(format!("  {} = {a}", calc.question)),
              None => lines.push(format!("  {}", calc.question)),
            }
          }
        }
        push_extension(&mut lines, "Challenge", &c.challenge);
      }
      ContentTree::Investigation(c) => {
        let plan = &c.investigation;
        lines.push(format!("Question: {}", plan.question));
        lines.push(format!("Change: {} / Measure: {}", plan.variables.change, plan.variables.measure));
        if !plan.variables.keep_same.is_empty() {
          lines.push(format!("Keep the same: {}", plan.variables.keep_same.join(", ")));
        }
        if !c.equipment.is_empty() {
          lines.push(format!("Equipment: {}", c.equipment.join(", ")));
        }
        for (i, step) in c.method.iter().enumerate() {
          lines.push(format!("  {}. {step}", i + 1));
        }
        if let Some(table) = &c.results_table {
          lines.push(format!("Results columns: {}", table.columns.join(", ")));
        }
      }
    }
    if !self.success_criteria().is_empty() {
      lines.push("Success criteria:".into());
      for item in self.success_criteria() {
        lines.push(format!("  [ ] {item}"));
      }
    }
    lines
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blanks_preview_by_priority() {
    let pieces = vec![
      Piece::Text { text: "It was ".into() },
      Piece::Blank(Blank { word_type: "adjective".into(), answer: Some("hot".into()), ..Default::default() }),
      Piece::Text { text: " and ".into() },
      Piece::Blank(Blank { word_type: "adjective".into(), choices: vec!["red".into(), "dry".into()], ..Default::default() }),
      Piece::Text { text: " and ".into() },
      Piece::Blank(Blank { word_type: "adjective".into(), hint: Some("a smell".into()), ..Default::default() }),
      Piece::Blank(Blank::default()),
    ];
    assert_eq!(pieces_text(&pieces), "It was [hot] and [red/dry] and [__a smell__][________]");
  }

  #[test]
  fn passage_excerpt_is_trimmed() {
    let long = "a".repeat(450);
    let e = excerpt(&long, PASSAGE_PREVIEW_CHARS);
    assert!(e.ends_with("..."));
    assert_eq!(e.chars().count(), PASSAGE_PREVIEW_CHARS + 3);
  }

  #[test]
  fn matching_preview_lists_pairs_and_criteria() {
    let tree = ContentTree::Matching(MatchingContent {
      title: "Sky".into(),
      activities: vec![MatchingActivity {
        title: "Match".into(),
        instructions: None,
        pairs: vec![MatchPair { left: "Sun".into(), right: "A star".into() }],
      }],
      bonus_activity: None,
      success_criteria: vec!["I can match words".into()],
    });
    let lines = tree.preview();
    assert_eq!(lines[0], "# Sky");
    assert!(lines.contains(&"  Sun → A star".to_string()));
    assert!(lines.contains(&"  [ ] I can match words".to_string()));
  }
}
