//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::domain::{GenerationParams, Level, ThemeKey, WorksheetType};
use crate::package::Artifact;
use crate::render::RenderOptions;
use crate::session::{LevelOutcome, Session};
use crate::styles;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Generate {
        params: GenerationParams,
    },
    Regenerate {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Build {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    LevelStarted {
        level: Level,
    },
    LevelReady {
        level: Level,
    },
    LevelFailed {
        level: Level,
        error: String,
    },
    Preview {
        session: SessionOut,
    },
    Built {
        #[serde(rename = "sessionId")]
        session_id: String,
        artifacts: Vec<ArtifactOut>,
    },
    Error {
        message: String,
    },
}

/// Plain-text rendering of one held tree.
#[derive(Debug, Serialize)]
pub struct LevelPreview {
    pub level: Level,
    pub lines: Vec<String>,
}

/// DTO used by both WS and HTTP for session delivery.
#[derive(Debug, Serialize)]
pub struct SessionOut {
    pub id: String,
    pub state: &'static str,
    pub params: GenerationParams,
    pub levels: Vec<LevelOutcome>,
    pub previews: Vec<LevelPreview>,
    pub artifacts: Vec<ArtifactOut>,
}

/// One download; `data` (base64) is only filled in straight after a build.
#[derive(Debug, Serialize)]
pub struct ArtifactOut {
    pub filename: String,
    pub label: String,
    pub mime: &'static str,
    pub size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

pub fn artifact_out(a: &Artifact, with_data: bool) -> ArtifactOut {
    ArtifactOut {
        filename: a.filename.clone(),
        label: a.label.clone(),
        mime: a.mime,
        size: a.bytes.len(),
        data: with_data.then(|| base64::engine::general_purpose::STANDARD.encode(&a.bytes)),
    }
}

/// Convert a `Session` (internal) to the public DTO.
pub fn session_out(s: &Session) -> SessionOut {
    SessionOut {
        id: s.id.clone(),
        state: s.state().key(),
        params: s.params.clone(),
        levels: s.outcomes().to_vec(),
        previews: s
            .trees()
            .iter()
            .map(|(level, tree)| LevelPreview { level: *level, lines: tree.preview() })
            .collect(),
        artifacts: s.artifacts().iter().map(|a| artifact_out(a, false)).collect(),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Serialize)]
pub struct BuildOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub artifacts: Vec<ArtifactOut>,
}

/// Direct rendering call: one content tree plus its options.
#[derive(Deserialize)]
pub struct RenderIn {
    pub worksheet_type: WorksheetType,
    pub content: serde_json::Value,
    pub options: RenderOptions,
}

#[derive(Serialize)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
}

/// Closed lists a front end offers as choices.
#[derive(Serialize)]
pub struct CatalogOut {
    pub worksheet_types: Vec<CatalogEntry>,
    pub themes: Vec<CatalogEntry>,
    pub levels: Vec<CatalogEntry>,
    pub word_types: Vec<CatalogEntry>,
}

pub fn catalog() -> CatalogOut {
    CatalogOut {
        worksheet_types: WorksheetType::ALL
            .iter()
            .map(|k| CatalogEntry { key: k.key(), label: k.display_name(), icon: None })
            .collect(),
        themes: ThemeKey::ALL
            .iter()
            .map(|k| {
                let t = styles::theme(*k);
                CatalogEntry { key: k.key(), label: t.name, icon: Some(t.icon) }
            })
            .collect(),
        levels: Level::ALL
            .iter()
            .map(|l| CatalogEntry { key: l.key(), label: styles::level(*l).label, icon: None })
            .collect(),
        word_types: styles::all_word_types()
            .iter()
            .map(|w| CatalogEntry { key: w.key, label: w.label, icon: Some(w.symbol) })
            .collect(),
    }
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub content_source: &'static str,
}
