//! # 실수 기록 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/mistakes/recent | `list_recent_mistakes` | 최근 실수 5개 |
//! | POST | /api/v1/mistakes/{id}/review | `review_mistake` | 복습 1회 기록 |

use crate::{
    db,
    error::AppError,
    models::*,
    routes::AppState,
    services::insights::RECENT_MISTAKES_LIMIT,
};
use axum::{
    extract::{Path, State}, // Path: URL의 {id} 부분을 i64로 파싱 (실패하면 Axum이 400)
    Json,
};
use serde_json::{json, Value};

/// `GET /mistakes/recent` → `{ "mistakes": [...] }` (최신순)
pub async fn list_recent_mistakes(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let mistakes = db::recent_mistakes(&state.pool, RECENT_MISTAKES_LIMIT).await?;
    Ok(Json(json!({ "mistakes": mistakes })))
}

/// `POST /mistakes/{id}/review`: 갱신된 실수를 돌려줍니다. 없는 id면 404
pub async fn review_mistake(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Mistake>, AppError> {
    let mistake = db::record_review(&state.pool, id, state.mastery_threshold)
        .await? // DB 에러 → 500
        .ok_or(AppError::NotFound)?; // 없는 id → 404

    if mistake.mastered {
        tracing::info!(mistake_id = id, "Mistake mastered");
    }
    Ok(Json(mistake))
}
