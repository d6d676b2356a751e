//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs key parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{Path, State},
  http::header,
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::domain::GenerationParams;
use crate::error::AppError;
use crate::logic;
use crate::package::DOCX_MIME;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, content_source: state.source.name() })
}

#[instrument(level = "info")]
pub async fn http_catalog() -> impl IntoResponse {
  Json(catalog())
}

#[instrument(level = "info", skip(state, params), fields(kind = params.worksheet_type.key(), topic = %params.topic, levels = params.levels.len()))]
pub async fn http_create_session(
  State(state): State<Arc<AppState>>,
  Json(params): Json<GenerationParams>,
) -> Result<Json<SessionOut>, AppError> {
  if params.topic.trim().is_empty() || params.year_group.trim().is_empty() {
    return Err(AppError::BadRequest("Please enter a year group and a topic.".into()));
  }
  if params.levels.is_empty() {
    return Err(AppError::BadRequest("Please choose at least one level.".into()));
  }
  let out = logic::generate(&state, params, None).await;
  info!(target: "worksheet_backend", id = %out.id, state = out.state, "HTTP session generated");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionOut>, AppError> {
  Ok(Json(logic::session_view(&state, &id).await?))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_regenerate(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionOut>, AppError> {
  let out = logic::regenerate(&state, &id, None).await?;
  info!(target: "worksheet_backend", %id, state = out.state, "HTTP session regenerated");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_build(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<BuildOut>, AppError> {
  let artifacts = logic::build(&state, &id).await?;
  info!(target: "worksheet_backend", %id, artifacts = artifacts.len(), "HTTP build served");
  Ok(Json(BuildOut { session_id: id, artifacts }))
}

#[instrument(level = "info", skip(state), fields(%id, %filename))]
pub async fn http_download(
  State(state): State<Arc<AppState>>,
  Path((id, filename)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
  let (mime, bytes) = logic::artifact_bytes(&state, &id, &filename).await?;
  let disposition = format!("attachment; filename=\"{}\"", filename);
  Ok(([(header::CONTENT_TYPE, mime.to_string()), (header::CONTENT_DISPOSITION, disposition)], bytes))
}

#[instrument(level = "info", skip(body), fields(kind = body.worksheet_type.key()))]
pub async fn http_render(Json(body): Json<RenderIn>) -> Result<impl IntoResponse, AppError> {
  let bytes = logic::render_direct(body)?;
  Ok(([(header::CONTENT_TYPE, DOCX_MIME)], bytes))
}
