//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. Generation streams per-level progress messages
//! before the final `preview`; everything else gets a single reply.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tokio::sync::mpsc;
use tracing::{info, error, instrument, debug};

use crate::domain::GenerationParams;
use crate::error::SessionError;
use crate::logic;
use crate::protocol::{ClientWsMessage, ServerWsMessage, SessionOut};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "worksheet_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn send(socket: &mut WebSocket, msg: &ServerWsMessage) -> bool {
  let out = serde_json::to_string(msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  });
  match socket.send(Message::Text(out)).await {
    Ok(()) => true,
    Err(e) => {
      error!(target: "worksheet_backend", error = %e, "WS send error");
      false
    }
  }
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "worksheet_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let open = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "worksheet_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &mut socket, &state).await
          }
          Err(e) => send(&mut socket, &ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) }).await,
        };
        if !open {
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "worksheet_backend", "WebSocket disconnected");
}

/// Final message after a content phase. A session where every level failed is
/// still a preview (state `failed`), so the client keeps its id for `regenerate`.
fn content_reply(result: Result<SessionOut, SessionError>) -> ServerWsMessage {
  match result {
    Ok(session) => ServerWsMessage::Preview { session },
    Err(e) => ServerWsMessage::Error { message: e.to_string() },
  }
}

enum ContentRun {
  Generate(GenerationParams),
  Regenerate(String),
}

/// Runs a content phase on a task, forwarding its progress to the socket as it happens.
async fn stream_content_phase(
  socket: &mut WebSocket,
  state: &Arc<AppState>,
  run: ContentRun,
) -> (bool, ServerWsMessage) {
  let (tx, mut rx) = mpsc::unbounded_channel();
  let task_state = state.clone();
  let task = tokio::spawn(async move {
    match run {
      ContentRun::Generate(params) => Ok(logic::generate(&task_state, params, Some(&tx)).await),
      ContentRun::Regenerate(id) => logic::regenerate(&task_state, &id, Some(&tx)).await,
    }
  });

  let mut open = true;
  while let Some(progress) = rx.recv().await {
    if open {
      open = send(socket, &progress).await;
    }
  }

  let reply = match task.await {
    Ok(result) => content_reply(result),
    Err(e) => {
      error!(target: "worksheet_backend", error = %e, "Content phase task failed");
      ServerWsMessage::Error { message: "Generation failed. Please try again.".into() }
    }
  };
  (open, reply)
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_client_ws(msg: ClientWsMessage, socket: &mut WebSocket, state: &Arc<AppState>) -> bool {
  let reply = match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Generate { params } => {
      let (open, reply) = stream_content_phase(socket, state, ContentRun::Generate(params)).await;
      if !open {
        return false;
      }
      reply
    }

    ClientWsMessage::Regenerate { session_id } => {
      let (open, reply) = stream_content_phase(socket, state, ContentRun::Regenerate(session_id)).await;
      if !open {
        return false;
      }
      reply
    }

    ClientWsMessage::Build { session_id } => match logic::build(state, &session_id).await {
      Ok(artifacts) => {
        info!(target: "worksheet_backend", id = %session_id, artifacts = artifacts.len(), "WS build served");
        ServerWsMessage::Built { session_id, artifacts }
      }
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },
  };
  send(socket, &reply).await
}
