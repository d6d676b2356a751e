//! Error taxonomy for content ingestion, rendering, packaging and sessions.
//!
//! Content-phase errors are recovered per level by the orchestrator; render and
//! package errors abort a build. `AppError` maps everything to a plain-language
//! JSON body for HTTP clients.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;

use crate::domain::Level;

#[derive(Error, Debug)]
pub enum ContentError {
  #[error("content does not match the worksheet schema: {0}")]
  Malformed(String),

  #[error("content generator returned nothing usable")]
  Empty,
}

#[derive(Error, Debug)]
pub enum LlmError {
  #[error("request to the language model failed: {0}")]
  Http(String),

  #[error("language model returned HTTP {status}: {message}")]
  Status { status: u16, message: String },

  #[error("could not read JSON from the model reply: {0}")]
  Parse(String),
}

#[derive(Error, Debug)]
pub enum RenderError {
  #[error("required field `{0}` is missing")]
  MissingField(&'static str),

  #[error("failed to write document: {0}")]
  Pack(String),
}

#[derive(Error, Debug)]
pub enum PackageError {
  #[error("No worksheets were generated")]
  NothingGenerated,

  #[error("failed to build archive: {0}")]
  Archive(String),
}

#[derive(Error, Debug)]
pub enum SessionError {
  #[error("session not found")]
  NotFound,

  #[error("no download named {0}")]
  ArtifactNotFound(String),

  #[error("cannot {event} while the session is {from}")]
  InvalidTransition { from: &'static str, event: &'static str },

  #[error("no level produced usable content")]
  NoContent,

  #[error("building the {level} worksheet failed: {source}")]
  Build { level: Level, source: RenderError },

  #[error(transparent)]
  Package(#[from] PackageError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Error returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum AppError {
  #[error(transparent)]
  Session(#[from] SessionError),

  #[error(transparent)]
  Content(#[from] ContentError),

  #[error(transparent)]
  Render(#[from] RenderError),

  #[error("{0}")]
  BadRequest(String),
}

impl AppError {
  fn status(&self) -> StatusCode {
    match self {
      AppError::Session(SessionError::NotFound | SessionError::ArtifactNotFound(_)) => StatusCode::NOT_FOUND,
      AppError::Session(SessionError::InvalidTransition { .. }) => StatusCode::CONFLICT,
      AppError::Session(SessionError::NoContent) => StatusCode::CONFLICT,
      AppError::Session(SessionError::Package(PackageError::NothingGenerated)) => StatusCode::UNPROCESSABLE_ENTITY,
      AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
      AppError::Content(_) => StatusCode::UNPROCESSABLE_ENTITY,
      AppError::Render(RenderError::MissingField(_)) => StatusCode::UNPROCESSABLE_ENTITY,
      AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
      AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
    }
  }

  /// Text sent to the client. Schema mismatches carry parser detail that stays in the logs.
  fn client_message(&self) -> String {
    match self {
      AppError::Content(ContentError::Malformed(_)) => MALFORMED_CONTENT.to_string(),
      other => other.to_string(),
    }
  }
}

pub const MALFORMED_CONTENT: &str = "The worksheet content is missing required parts or has the wrong shape.";

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(target: "worksheet_backend", error = %self, "Request failed");
    } else if matches!(self, AppError::Content(_)) {
      tracing::warn!(target: "worksheet_backend", error = %self, "Rejected worksheet content");
    }
    (status, Json(serde_json::json!({ "error": self.client_message() }))).into_response()
  }
}
