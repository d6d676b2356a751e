//! Reading comprehension, problem solving, calculation practice and investigation bodies.

use crate::content::{CalculationContent, ExtensionBlock, InvestigationContent, ProblemSolvingContent, ReadingContent};
use crate::domain::Level;
use crate::render::model::Document;
use crate::render::widgets::questions::{self, QuestionSet};
use crate::render::widgets::{frame, investigation, word_bank};
use crate::render::Ctx;

use super::Assembler;

impl Assembler for ReadingContent {
  fn subtitle(&self, level: Level) -> &'static str {
    match level {
      Level::Developing => "Read the passage carefully, then answer the questions!",
      Level::Expected => "Read the passage and answer the questions in full sentences!",
      Level::GreaterDepth => "Read the passage closely and explain your thinking!",
    }
  }

  fn body(&self, doc: &mut Document, ctx: &mut Ctx) {
    let passage = &self.passage;
    questions::reading_passage(doc, ctx, passage.title.as_deref(), &passage.text, passage.source_note.as_deref());
    word_bank::vocabulary_box(doc, ctx, &self.vocabulary);
    questions::question_blocks(doc, ctx, &self.questions, QuestionSet::Comprehension);
  }
}

impl Assembler for ProblemSolvingContent {
  fn subtitle(&self, level: Level) -> &'static str {
    match level {
      Level::Developing => "Read the problem carefully, then answer the questions!",
      Level::Expected => "Read the problem and show your working in full!",
      Level::GreaterDepth => "Read the problem closely and explain your reasoning!",
    }
  }

  fn body(&self, doc: &mut Document, ctx: &mut Ctx) {
    let scenario = &self.scenario;
    questions::reading_passage(doc, ctx, scenario.title.as_deref(), &scenario.text, None);
    questions::data_table(doc, ctx, &scenario.data);
    questions::question_blocks(doc, ctx, &self.questions, QuestionSet::Maths);
  }
}

impl Assembler for CalculationContent {
  fn subtitle(&self, _level: Level) -> &'static str {
    "Show your working and write your answers!"
  }

  fn body(&self, doc: &mut Document, ctx: &mut Ctx) {
    for (i, section) in self.sections.iter().enumerate() {
      frame::section_header(doc, ctx, Some(i + 1), &section.title);
      if let Some(note) = &section.instructions {
        frame::activity_note(doc, ctx, note);
      }
      questions::calculation_grid(doc, ctx, &section.calculations);
    }
  }

  fn extension(&self) -> Option<(usize, &ExtensionBlock)> {
    self.challenge.as_ref().map(|b| (self.sections.len() + 1, b))
  }
}

impl Assembler for InvestigationContent {
  fn subtitle(&self, level: Level) -> &'static str {
    match level {
      Level::Developing => "Follow the steps to plan your investigation!",
      Level::Expected => "Plan your investigation carefully and record your results!",
      Level::GreaterDepth => "Design a fair test and explain your findings!",
    }
  }

  fn body(&self, doc: &mut Document, ctx: &mut Ctx) {
    let plan = &self.investigation;
    frame::section_header(doc, ctx, None, "Our Investigation Question");
    investigation::question_box(doc, ctx, &plan.question);

    frame::section_header(doc, ctx, None, "My Prediction");
    investigation::prediction(doc, ctx, plan);

    frame::section_header(doc, ctx, None, "Fair Test Variables");
    investigation::variables_table(doc, ctx, &plan.variables);

    if !self.equipment.is_empty() {
      frame::section_header(doc, ctx, None, "Equipment");
      investigation::equipment_list(doc, ctx, &self.equipment);
    }
    if !self.method.is_empty() {
      frame::section_header(doc, ctx, None, "Method");
      investigation::method_steps(doc, ctx, &self.method);
    }
    if let Some(table) = &self.results_table {
      frame::section_header(doc, ctx, None, "Results");
      investigation::results_table(doc, ctx, table);
    }
    if !self.conclusion_prompts.is_empty() {
      frame::section_header(doc, ctx, None, "Conclusion");
      investigation::conclusion_prompts(doc, ctx, &self.conclusion_prompts);
    }
  }
}
