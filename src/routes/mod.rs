//! Router assembly: HTTP endpoints, WebSocket upgrade, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - CORS (allow any origin/method/headers); tighten for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/catalog", get(http::http_catalog))
        .route("/api/v1/sessions", post(http::http_create_session))
        .route("/api/v1/sessions/:id", get(http::http_get_session))
        .route("/api/v1/sessions/:id/regenerate", post(http::http_regenerate))
        .route("/api/v1/sessions/:id/build", post(http::http_build))
        .route("/api/v1/sessions/:id/artifacts/:filename", get(http::http_download))
        .route("/api/v1/render", post(http::http_render))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;
    use crate::seeds::{sample_content, SeedContent};
    use crate::domain::{Level, WorksheetType};

    fn app() -> Router {
        build_router(Arc::new(AppState::with_source(Arc::new(SeedContent), AppConfig::default())))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(res: axum::response::Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_the_content_source() {
        let res = app()
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await, json!({ "ok": true, "content_source": "seed" }));
    }

    #[tokio::test]
    async fn catalog_lists_every_type_and_theme() {
        let res = app()
            .oneshot(Request::get("/api/v1/catalog").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(res).await;
        assert_eq!(body["worksheet_types"].as_array().unwrap().len(), 8);
        assert_eq!(body["themes"].as_array().unwrap().len(), 7);
        assert_eq!(body["levels"][2]["key"], "greater_depth");
    }

    #[tokio::test]
    async fn generate_build_and_download() {
        let app = app();
        let res = app
            .clone()
            .oneshot(post_json(
                "/api/v1/sessions",
                json!({ "worksheet_type": "cloze", "year_group": "Year 3", "topic": "Volcanoes" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let session = json_body(res).await;
        assert_eq!(session["state"], "preview");
        assert_eq!(session["levels"].as_array().unwrap().len(), 3);
        assert_eq!(session["previews"][1]["lines"][0], "# Lava Lab");
        let id = session["id"].as_str().unwrap().to_string();

        let res = app
            .clone()
            .oneshot(post_json(&format!("/api/v1/sessions/{id}/build"), json!({})))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let built = json_body(res).await;
        let artifacts = built["artifacts"].as_array().unwrap();
        assert_eq!(artifacts.len(), 7);
        assert_eq!(artifacts[0]["filename"], "Year_3_Volcanoes_Cloze_Passage_All.zip");
        assert!(artifacts[1]["data"].as_str().is_some());

        let res = app
            .oneshot(
                Request::get(format!(
                    "/api/v1/sessions/{id}/artifacts/Year_3_Volcanoes_Cloze_Passage_expected_ANSWER_KEY.docx"
                ))
                .body(Body::empty())
                .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let disposition = res.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
        assert!(disposition.starts_with("attachment"));
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn unknown_session_is_404_with_plain_message() {
        let res = app()
            .oneshot(post_json("/api/v1/sessions/missing/build", json!({})))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(res).await, json!({ "error": "session not found" }));
    }

    #[tokio::test]
    async fn empty_topic_is_a_bad_request() {
        let res = app()
            .oneshot(post_json(
                "/api/v1/sessions",
                json!({ "worksheet_type": "matching", "year_group": "Year 4", "topic": "  " }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn direct_render_returns_a_docx() {
        let res = app()
            .oneshot(post_json(
                "/api/v1/render",
                json!({
                    "worksheet_type": "matching",
                    "content": sample_content(WorksheetType::Matching, Level::Expected),
                    "options": { "theme": "ocean", "level": "expected", "show_answers": true, "seed": 7 }
                }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::CONTENT_TYPE], crate::package::DOCX_MIME);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn direct_render_without_title_is_unprocessable() {
        let res = app()
            .oneshot(post_json(
                "/api/v1/render",
                json!({
                    "worksheet_type": "cloze",
                    "content": { "sections": [] },
                    "options": { "level": "developing" }
                }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
