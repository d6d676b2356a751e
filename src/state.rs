//! Application state: in-memory sessions, configuration and the content source.
//!
//! Each session sits behind its own mutex so a long content phase only blocks
//! requests for that session. The map lock is never held across a model call.
//! The store keeps at most `sessions.max_sessions`; the oldest go first.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument};

use crate::config::{load_config_from_env, AppConfig};
use crate::error::{SessionError, SessionResult};
use crate::llm::{ContentSource, OpenAI};
use crate::seeds::SeedContent;
use crate::session::Session;

pub type SharedSession = Arc<Mutex<Session>>;

#[derive(Default)]
struct SessionStore {
    by_id: HashMap<String, SharedSession>,
    /// Ids in insertion order, oldest first.
    order: VecDeque<String>,
}

impl SessionStore {
    /// Inserts and returns the ids evicted to stay within `cap`.
    fn insert(&mut self, id: String, session: SharedSession, cap: usize) -> Vec<String> {
        if self.by_id.insert(id.clone(), session).is_none() {
            self.order.push_back(id);
        }
        let mut evicted = Vec::new();
        while self.order.len() > cap.max(1) {
            if let Some(oldest) = self.order.pop_front() {
                self.by_id.remove(&oldest);
                evicted.push(oldest);
            }
        }
        evicted
    }
}

pub struct AppState {
    sessions: RwLock<SessionStore>,
    pub source: Arc<dyn ContentSource>,
    pub config: AppConfig,
}

impl AppState {
    /// Build state from env: load config, then pick OpenAI or the built-in samples.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let config = load_config_from_env();

        let source: Arc<dyn ContentSource> =
            match OpenAI::from_env(config.llm.clone(), config.prompts.clone()) {
                Some(oa) => {
                    info!(target: "worksheet_backend", base_url = %oa.base_url, model = %oa.model, "OpenAI enabled.");
                    Arc::new(oa)
                }
                None => {
                    info!(target: "worksheet_backend", "OpenAI disabled (no OPENAI_API_KEY). Serving built-in sample worksheets.");
                    Arc::new(SeedContent)
                }
            };

        Self::with_source(source, config)
    }

    pub fn with_source(source: Arc<dyn ContentSource>, config: AppConfig) -> Self {
        Self { sessions: RwLock::new(SessionStore::default()), source, config }
    }

    /// Store a session and hand back its shared handle.
    #[instrument(level = "debug", skip(self, session), fields(id = %session.id))]
    pub async fn insert_session(&self, session: Session) -> SharedSession {
        let id = session.id.clone();
        let shared = Arc::new(Mutex::new(session));
        let evicted = self.sessions.write().await.insert(id, shared.clone(), self.config.sessions.max_sessions);
        if !evicted.is_empty() {
            debug!(target: "worksheet_backend", evicted = evicted.len(), "Dropped oldest sessions");
        }
        shared
    }

    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn session(&self, id: &str) -> SessionResult<SharedSession> {
        self.sessions.read().await.by_id.get(id).cloned().ok_or(SessionError::NotFound)
    }
}
