//! One teacher's generate / preview / build cycle as an explicit state machine.
//!
//! ```text
//!   generate ──> Generating ──(some level ok)──> Preview ──build──> Built
//!                     │                              ^                │
//!                     └──(every level failed)──> Failed               │
//!   regenerate: Preview | Built | Failed ──> Generating <─────────────┘
//! ```

use serde::Serialize;
use uuid::Uuid;

use crate::content::ContentTree;
use crate::domain::{GenerationParams, Level};
use crate::error::{SessionError, SessionResult};
use crate::package::Artifact;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
  Generating,
  Preview,
  Built,
  Failed,
}

impl SessionState {
  pub fn key(self) -> &'static str {
    match self {
      SessionState::Generating => "generating",
      SessionState::Preview => "preview",
      SessionState::Built => "built",
      SessionState::Failed => "failed",
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
  Regenerate,
  Build,
}

impl SessionEvent {
  fn key(self) -> &'static str {
    match self {
      SessionEvent::Regenerate => "regenerate",
      SessionEvent::Build => "build",
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelStatus {
  Ready,
  Failed,
}

/// What happened to one requested level in the last content phase.
#[derive(Clone, Debug, Serialize)]
pub struct LevelOutcome {
  pub level: Level,
  pub status: LevelStatus,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

pub struct Session {
  pub id: String,
  pub params: GenerationParams,
  state: SessionState,
  outcomes: Vec<LevelOutcome>,
  trees: Vec<(Level, ContentTree)>,
  artifacts: Vec<Artifact>,
}

impl Session {
  /// A fresh session about to run its first content phase.
  pub fn new(params: GenerationParams) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      params,
      state: SessionState::Generating,
      outcomes: Vec::new(),
      trees: Vec::new(),
      artifacts: Vec::new(),
    }
  }

  pub fn state(&self) -> SessionState {
    self.state
  }

  pub fn outcomes(&self) -> &[LevelOutcome] {
    &self.outcomes
  }

  /// Held content in level order.
  pub fn trees(&self) -> &[(Level, ContentTree)] {
    &self.trees
  }

  pub fn artifacts(&self) -> &[Artifact] {
    &self.artifacts
  }

  pub fn artifact(&self, filename: &str) -> Option<&Artifact> {
    self.artifacts.iter().find(|a| a.filename == filename)
  }

  fn allows(&self, event: SessionEvent) -> bool {
    use SessionState::*;
    match event {
      SessionEvent::Regenerate => matches!(self.state, Preview | Built | Failed),
      SessionEvent::Build => matches!(self.state, Preview | Built),
    }
  }

  /// Fails unless `event` may fire now. Building a session with no usable
  /// content is `NoContent`; every other refusal is `InvalidTransition`.
  pub fn check(&self, event: SessionEvent) -> SessionResult<()> {
    if self.allows(event) {
      Ok(())
    } else if event == SessionEvent::Build && self.state == SessionState::Failed {
      Err(SessionError::NoContent)
    } else {
      Err(SessionError::InvalidTransition { from: self.state.key(), event: event.key() })
    }
  }

  /// Drops every held tree and artifact and returns to `Generating`.
  pub fn begin_regenerate(&mut self) -> SessionResult<()> {
    self.check(SessionEvent::Regenerate)?;
    self.state = SessionState::Generating;
    self.outcomes.clear();
    self.trees.clear();
    self.artifacts.clear();
    Ok(())
  }

  pub fn record_ready(&mut self, level: Level, tree: ContentTree) {
    self.outcomes.push(LevelOutcome { level, status: LevelStatus::Ready, error: None });
    self.trees.push((level, tree));
  }

  pub fn record_failure(&mut self, level: Level, error: String) {
    self.outcomes.push(LevelOutcome { level, status: LevelStatus::Failed, error: Some(error) });
  }

  /// Closes the content phase: `Preview` if anything arrived, else `Failed`.
  pub fn finish_content(&mut self) -> SessionState {
    self.state = if self.trees.is_empty() { SessionState::Failed } else { SessionState::Preview };
    self.state
  }

  /// Replaces the downloads after a successful build.
  pub fn finish_build(&mut self, artifacts: Vec<Artifact>) -> SessionResult<()> {
    self.check(SessionEvent::Build)?;
    self.artifacts = artifacts;
    self.state = SessionState::Built;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{ThemeKey, WorksheetType};
  use crate::seeds::sample_content;

  fn params() -> GenerationParams {
    GenerationParams {
      worksheet_type: WorksheetType::Matching,
      year_group: "Year 4".into(),
      topic: "Space".into(),
      objective: String::new(),
      theme: ThemeKey::Space,
      levels: Level::ALL.to_vec(),
      extra_spacing: false,
      eal_glossary: false,
      include_answer_key: false,
    }
  }

  fn tree(level: Level) -> ContentTree {
    ContentTree::parse(WorksheetType::Matching, level, sample_content(WorksheetType::Matching, level)).unwrap()
  }

  #[test]
  fn new_session_cannot_build_or_regenerate() {
    let s = Session::new(params());
    assert_eq!(s.state(), SessionState::Generating);
    assert!(matches!(
      s.check(SessionEvent::Build),
      Err(SessionError::InvalidTransition { from: "generating", event: "build" })
    ));
    assert!(s.check(SessionEvent::Regenerate).is_err());
  }

  #[test]
  fn partial_content_moves_to_preview() {
    let mut s = Session::new(params());
    s.record_ready(Level::Developing, tree(Level::Developing));
    s.record_failure(Level::Expected, "Generation failed".into());
    assert_eq!(s.finish_content(), SessionState::Preview);
    assert_eq!(s.outcomes().len(), 2);
    assert_eq!(s.outcomes()[1].status, LevelStatus::Failed);
    assert!(s.check(SessionEvent::Build).is_ok());
  }

  #[test]
  fn no_content_fails_and_only_regenerate_is_allowed() {
    let mut s = Session::new(params());
    s.record_failure(Level::Developing, "x".into());
    assert_eq!(s.finish_content(), SessionState::Failed);
    assert!(matches!(s.check(SessionEvent::Build), Err(SessionError::NoContent)));
    s.begin_regenerate().unwrap();
    assert_eq!(s.state(), SessionState::Generating);
    assert!(s.outcomes().is_empty());
  }

  #[test]
  fn regenerate_after_build_discards_everything() {
    let mut s = Session::new(params());
    s.record_ready(Level::Expected, tree(Level::Expected));
    s.finish_content();
    s.finish_build(vec![Artifact { filename: "a.docx".into(), label: "a".into(), mime: "x", bytes: vec![1] }]).unwrap();
    assert_eq!(s.state(), SessionState::Built);
    assert!(s.artifact("a.docx").is_some());
    assert!(s.check(SessionEvent::Build).is_ok());

    s.begin_regenerate().unwrap();
    assert!(s.trees().is_empty());
    assert!(s.artifacts().is_empty());
    assert!(s.artifact("a.docx").is_none());
  }
}
