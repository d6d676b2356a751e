//! Core behaviours shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - the content phase (one collaborator call per level, failures recorded)
//!   - the build phase (student copy + answer key per level, then packaging)
//!   - the direct rendering call

use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info, instrument, warn};

use crate::content::ContentTree;
use crate::domain::{GenerationParams, Level};
use crate::error::{AppError, SessionError, SessionResult};
use crate::llm::ContentSource;
use crate::package::{self, RenderedDoc};
use crate::protocol::{artifact_out, session_out, ArtifactOut, RenderIn, ServerWsMessage, SessionOut};
use crate::render::{self, RenderOptions};
use crate::session::{Session, SessionEvent};
use crate::state::AppState;
use crate::styles;

/// Optional per-level progress sink (the WebSocket loop listens on the other end).
pub type Progress<'a> = Option<&'a UnboundedSender<ServerWsMessage>>;

fn notify(progress: Progress<'_>, msg: ServerWsMessage) {
  if let Some(tx) = progress {
    // Receiver gone means the socket closed; generation still completes.
    let _ = tx.send(msg);
  }
}

/// Plain-language failure shown next to a level.
fn level_failure_message(level: Level) -> String {
  format!("Generation failed for {}. Please try again.", styles::level(level).label)
}

/// Phase 1: one tree per requested level, in level order. A failed level is
/// recorded and the loop moves on.
#[instrument(level = "info", skip(source, session, progress), fields(id = %session.id, kind = session.params.worksheet_type.key(), source = source.name()))]
pub async fn run_content_phase(source: &dyn ContentSource, session: &mut Session, progress: Progress<'_>) {
  let params = session.params.clone();
  for level in params.ordered_levels() {
    notify(progress, ServerWsMessage::LevelStarted { level });

    let fetched = match source.generate(&params, level).await {
      Ok(value) => ContentTree::parse(params.worksheet_type, level, value).map_err(|e| e.to_string()),
      Err(e) => Err(e.to_string()),
    };

    match fetched {
      Ok(tree) => {
        info!(target: "worksheet", %level, title = %tree.title(), "Level content ready");
        session.record_ready(level, tree);
        notify(progress, ServerWsMessage::LevelReady { level });
      }
      Err(detail) => {
        warn!(target: "worksheet", %level, error = %detail, "Level content failed; continuing with remaining levels");
        let message = level_failure_message(level);
        session.record_failure(level, message.clone());
        notify(progress, ServerWsMessage::LevelFailed { level, error: message });
      }
    }
  }

  let state = session.finish_content();
  info!(target: "worksheet", id = %session.id, state = state.key(), "Content phase finished");
}

/// Render options for one held tree in one mode.
fn render_options(params: &GenerationParams, level: Level, show_answers: bool) -> RenderOptions {
  RenderOptions {
    theme: params.theme,
    level,
    objective: params.objective.clone(),
    extra_spacing: params.extra_spacing,
    eal_glossary: params.eal_glossary,
    show_answers,
    seed: None,
  }
}

/// Phase 3: render every held tree (and its answer key when asked for), then
/// package. Nothing on the session changes unless the whole build succeeds.
#[instrument(level = "info", skip(session), fields(id = %session.id, levels = session.trees().len()))]
pub fn build_session(session: &mut Session) -> SessionResult<()> {
  session.check(SessionEvent::Build)?;
  let params = &session.params;
  let modes: &[bool] = if params.include_answer_key { &[false, true] } else { &[false] };

  let mut docs = Vec::with_capacity(session.trees().len() * modes.len());
  for (level, tree) in session.trees() {
    for &answer_key in modes {
      let bytes = render::render(tree, &render_options(params, *level, answer_key)).map_err(|source| {
        error!(target: "worksheet", %level, answer_key, error = %source, "Worksheet build failed");
        SessionError::Build { level: *level, source }
      })?;
      docs.push(RenderedDoc {
        filename: package::document_filename(params, *level, answer_key),
        label: package::document_label(*level, answer_key),
        bytes,
      });
    }
  }

  let artifacts = package::bundle(params, docs)?;
  info!(target: "worksheet", artifacts = artifacts.len(), "Worksheets built");
  session.finish_build(artifacts)
}

/// `generate`: fresh session, content phase, preview.
#[instrument(level = "info", skip(state, params, progress), fields(kind = params.worksheet_type.key(), topic = %params.topic))]
pub async fn generate(state: &AppState, params: GenerationParams, progress: Progress<'_>) -> SessionOut {
  let shared = state.insert_session(Session::new(params)).await;
  let mut session = shared.lock().await;
  run_content_phase(state.source.as_ref(), &mut session, progress).await;
  session_out(&session)
}

/// `regenerate`: discard held content and rerun the content phase with the same params.
#[instrument(level = "info", skip(state, progress), fields(%id))]
pub async fn regenerate(state: &AppState, id: &str, progress: Progress<'_>) -> SessionResult<SessionOut> {
  let shared = state.session(id).await?;
  let mut session = shared.lock().await;
  session.begin_regenerate()?;
  run_content_phase(state.source.as_ref(), &mut session, progress).await;
  Ok(session_out(&session))
}

/// `build`: render and package; returns the downloads with their bytes inline.
#[instrument(level = "info", skip(state), fields(%id))]
pub async fn build(state: &AppState, id: &str) -> SessionResult<Vec<ArtifactOut>> {
  let shared = state.session(id).await?;
  let mut session = shared.lock().await;
  build_session(&mut session)?;
  Ok(session.artifacts().iter().map(|a| artifact_out(a, true)).collect())
}

#[instrument(level = "debug", skip(state), fields(%id))]
pub async fn session_view(state: &AppState, id: &str) -> SessionResult<SessionOut> {
  let shared = state.session(id).await?;
  let session = shared.lock().await;
  Ok(session_out(&session))
}

/// Raw bytes of one download.
#[instrument(level = "info", skip(state), fields(%id, %filename))]
pub async fn artifact_bytes(state: &AppState, id: &str, filename: &str) -> SessionResult<(&'static str, Vec<u8>)> {
  let shared = state.session(id).await?;
  let session = shared.lock().await;
  session
    .artifact(filename)
    .map(|a| (a.mime, a.bytes.clone()))
    .ok_or_else(|| SessionError::ArtifactNotFound(filename.to_string()))
}

/// The direct rendering contract: one tree and its options to `.docx` bytes.
#[instrument(level = "info", skip(body), fields(kind = body.worksheet_type.key(), level = %body.options.level))]
pub fn render_direct(body: RenderIn) -> Result<Vec<u8>, AppError> {
  let tree = ContentTree::parse(body.worksheet_type, body.options.level, body.content)?;
  Ok(render::render(&tree, &body.options)?)
}
