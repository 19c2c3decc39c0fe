//! # 연습 세션 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/scenes?level= | `list_scenes` | 수준별 장면 목록 |
//! | GET | /api/v1/session | `get_session` | 활성 세션 조회 |
//! | POST | /api/v1/session | `setup_session` | 세션 설정 (검증 실패 시 400) |
//! | POST | /api/v1/session/summary | `summarize_session` | 활성 세션 요약 저장 |
//! | GET | /api/v1/session/summaries | `list_session_summaries` | 최근 세션 요약 |

use crate::{
    db,                 // 세션 요약 저장/조회
    error::AppError,
    models::*,          // SessionConfig, SetupRequest, SessionSummary 등
    routes::AppState,
    services::session,  // 입력 검증과 장면 목록
};
use axum::{
    extract::{Query, State}, // Query: ?level=... 쿼리 문자열을 구조체로 파싱
    Json,
};
use serde_json::{json, Value};

const SUMMARIES_LIMIT: i64 = 20;

/// 세션 없이 세션 의존 API를 부를 때의 안내 문구
pub const NO_SESSION_MESSAGE: &str = "Please start a practice session first.";

/// `GET /scenes?level=Intermediate` → `{ "level", "levels", "scenes" }`
///
/// level이 없으면 Beginner 목록을 돌려줍니다.
pub async fn list_scenes(Query(query): Query<SceneQuery>) -> Json<Value> {
    // unwrap_or_default(): None이면 빈 문자열 → scene_options가 Beginner로 대체
    let level = query.level.unwrap_or_default();
    Json(json!({
        "level": level,
        "levels": session::LEVELS,
        "scenes": session::scene_options(&level),
    }))
}

/// `GET /session`: 활성 세션이 없으면 404
pub async fn get_session(State(state): State<AppState>) -> Result<Json<SessionConfig>, AppError> {
    let current = state.session.read().await.clone();
    // Option<SessionConfig> → Result<Json<SessionConfig>, AppError>
    current.map(Json).ok_or(AppError::NotFound)
}

/// `POST /session` + `{ "known_language", "target_language", "level", "scene" }`
///
/// 검증에 성공했을 때만 활성 세션을 교체합니다.
pub async fn setup_session(
    State(state): State<AppState>,
    Json(req): Json<SetupRequest>,
) -> Result<Json<SetupResponse>, AppError> {
    // 검증 실패면 `?`로 여기서 400을 반환하고, 기존 세션은 건드리지 않습니다
    let (config, greeting) = session::setup(&req)?;

    // 쓰기 잠금을 잡고 통째로 교체
    *state.session.write().await = Some(config.clone());
    tracing::info!(
        target_language = %config.target_language,
        level = %config.level,
        scene = %config.scene,
        "Practice session started"
    );

    Ok(Json(SetupResponse {
        greeting,
        session: config,
    }))
}

/// `POST /session/summary`: 활성 세션의 카운터를 `user_progress`에 남깁니다.
pub async fn summarize_session(
    State(state): State<AppState>,
) -> Result<Json<SessionSummary>, AppError> {
    let current = state
        .session
        .read()
        .await
        .clone()
        .ok_or_else(|| AppError::BadRequest(NO_SESSION_MESSAGE.to_string()))?;

    // 집계 → 저장 → 저장된 행(id, session_date 포함) 반환
    let summary = db::summarize_session(&state.pool, &current).await?;
    let saved = db::insert_session_summary(&state.pool, &summary).await?;
    Ok(Json(saved))
}

/// `GET /session/summaries` → `{ "summaries": [...] }`
pub async fn list_session_summaries(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let summaries = db::list_session_summaries(&state.pool, SUMMARIES_LIMIT).await?;
    Ok(Json(json!({ "summaries": summaries })))
}
