//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과, 그들이 공유하는 `AppState`를 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `chat`: 대화 한 턴 처리
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `insights`: 학습 통계 리포트와 진행 상황 HTML
//! - `mistakes`: 최근 실수 조회와 복습 기록
//! - `session`: 장면 목록, 세션 설정, 세션 요약

pub mod chat;
pub mod health;
pub mod insights;
pub mod mistakes;
pub mod session;

use crate::models::SessionConfig;
use crate::services::completion::CompletionClient;
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 모든 핸들러가 공유하는 애플리케이션 상태
///
/// `#[derive(Clone)]`: Axum은 요청마다 State를 복제합니다.
/// 필드가 모두 `Arc` 기반이라 복제해도 같은 풀, 같은 클라이언트, 같은 세션을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub client: Arc<CompletionClient>,
    /// 활성 연습 세션. 설정 전에는 `None`
    pub session: Arc<RwLock<Option<SessionConfig>>>,
    /// 복습 몇 번 만에 숙달로 볼지
    pub mastery_threshold: i64,
}

impl AppState {
    pub fn new(pool: SqlitePool, client: CompletionClient, mastery_threshold: i64) -> Self {
        Self {
            pool,
            client: Arc::new(client),
            session: Arc::new(RwLock::new(None)),
            mastery_threshold,
        }
    }
}

/// `/api/v1` 아래에 붙는 API 라우터
pub fn api_router(state: AppState) -> Router {
    Router::new()
        // 세션
        .route("/scenes", get(session::list_scenes))
        .route(
            "/session",
            get(session::get_session).post(session::setup_session),
        )
        .route("/session/summary", post(session::summarize_session))
        .route("/session/summaries", get(session::list_session_summaries))
        // 대화
        .route("/chat", post(chat::send_message))
        // 학습 통계
        .route("/insights", get(insights::get_insights))
        .route("/progress", get(insights::get_progress))
        .route("/mistakes/recent", get(mistakes::list_recent_mistakes))
        .route("/mistakes/{id}/review", post(mistakes::review_mistake))
        // 헬스체크
        .route("/health", get(health::health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::services::completion::tests::ScriptedTransport;
    use crate::services::completion::TransportError;
    use crate::services::phrases::PhrasePools;
    use crate::services::session::MISSING_FIELDS_MESSAGE;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    async fn app(script: Vec<Result<String, TransportError>>) -> (Router, AppState) {
        let pool = db::test_pool().await;
        let client = CompletionClient::new(
            ScriptedTransport::new(script),
            "test-model",
            PhrasePools::default(),
        )
        .with_retry(1, Duration::ZERO);
        let state = AppState::new(pool, client, 2);
        (api_router(state.clone()), state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn setup_body(scene: &str) -> Value {
        json!({
            "known_language": "English",
            "target_language": "Spanish",
            "level": "beginner",
            "scene": scene,
        })
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _) = app(vec![]).await;
        let (status, body) = send_json(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "chatalyst");
    }

    #[tokio::test]
    async fn scenes_follow_requested_level() {
        let (app, _) = app(vec![]).await;
        let (status, body) = send_json(&app, "GET", "/scenes?level=Advanced", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scenes"][1], "job interview");

        let (_, body) = send_json(&app, "GET", "/scenes", None).await;
        assert_eq!(body["scenes"][0], "ordering food at a restaurant");
    }

    #[tokio::test]
    async fn setup_replaces_active_session() {
        let (app, _) = app(vec![]).await;
        let (status, _) = send_json(&app, "GET", "/session", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) =
            send_json(&app, "POST", "/session", Some(setup_body("greeting someone"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["greeting"],
            "Great! You're practicing greeting someone in a Spanish-speaking country. Let's begin!"
        );
        assert_eq!(body["session"]["level"], "Beginner");

        let (status, body) = send_json(&app, "GET", "/session", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scene"], "greeting someone");
    }

    #[tokio::test]
    async fn setup_with_blank_field_keeps_previous_state() {
        let (app, state) = app(vec![]).await;
        let (status, body) = send_json(&app, "POST", "/session", Some(setup_body("  "))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], MISSING_FIELDS_MESSAGE);
        assert!(state.session.read().await.is_none());

        send_json(&app, "POST", "/session", Some(setup_body("asking for directions"))).await;
        send_json(&app, "POST", "/session", Some(setup_body(""))).await;
        let (_, body) = send_json(&app, "GET", "/session", None).await;
        assert_eq!(body["scene"], "asking for directions");
    }

    #[tokio::test]
    async fn chat_requires_session() {
        let (app, _) = app(vec![]).await;
        let (status, body) =
            send_json(&app, "POST", "/chat", Some(json!({ "message": "Hola" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], session::NO_SESSION_MESSAGE);
    }

    #[tokio::test]
    async fn chat_rejects_empty_message() {
        let (app, _) = app(vec![]).await;
        send_json(&app, "POST", "/session", Some(setup_body("greeting someone"))).await;
        let (status, _) =
            send_json(&app, "POST", "/chat", Some(json!({ "message": "   " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_turn_feeds_insights_and_review() {
        let (app, _) = app(vec![Ok(
            "Small grammar note: say 'Hola, ¿cómo estás?'".to_string()
        )])
        .await;
        send_json(&app, "POST", "/session", Some(setup_body("greeting someone"))).await;

        let (status, body) = send_json(
            &app,
            "POST",
            "/chat",
            Some(json!({ "message": "Hola como estas", "history": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let history = body["history"].as_array().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["role"], "user");
        assert_eq!(history[1]["role"], "assistant");

        let (status, body) = send_json(&app, "GET", "/insights", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report"]["mistakes"][0]["mistake_type"], "grammar");
        assert_eq!(body["report"]["top_scenes"][0]["scene"], "greeting someone");
        assert!(body["text"]
            .as_str()
            .unwrap()
            .starts_with("📊 Learning Progress Report"));

        let (_, body) = send_json(&app, "GET", "/mistakes/recent", None).await;
        let id = body["mistakes"][0]["id"].as_i64().unwrap();

        let uri = format!("/mistakes/{id}/review");
        let (_, body) = send_json(&app, "POST", &uri, None).await;
        assert_eq!(body["review_count"], 1);
        assert_eq!(body["mastered"], false);
        let (status, body) = send_json(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mastered"], true);

        let (status, body) = send_json(&app, "POST", "/session/summary", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_interactions"], 1);
        assert_eq!(body["mistakes_made"], 1);

        let (_, body) = send_json(&app, "GET", "/session/summaries", None).await;
        assert_eq!(body["summaries"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn review_unknown_mistake_is_not_found() {
        let (app, _) = app(vec![]).await;
        let (status, body) = send_json(&app, "POST", "/mistakes/999/review", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn summary_requires_session() {
        let (app, _) = app(vec![]).await;
        let (status, _) = send_json(&app, "POST", "/session/summary", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn progress_renders_html() {
        let (app, _) = app(vec![]).await;
        let (status, bytes) = send(&app, "GET", "/progress", None).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(bytes).unwrap();
        assert!(html.contains("No recent mistakes recorded."));
    }

    #[tokio::test]
    async fn progress_failure_renders_message() {
        let (app, state) = app(vec![]).await;
        sqlx::query("DROP TABLE mistakes")
            .execute(&state.pool)
            .await
            .unwrap();
        let (status, bytes) = send(&app, "GET", "/progress", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let html = String::from_utf8(bytes).unwrap();
        assert!(html.contains("Unable to load learning progress. Please try again."));
    }
}
