//! # 학습 통계 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/insights | `get_insights` | 구조화된 리포트 + 텍스트 렌더링 |
//! | GET | /api/v1/progress | `get_progress` | 진행 상황 HTML 조각 |

use crate::{error::AppError, routes::AppState, services::insights};
use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Json,
};
use serde_json::{json, Value};

const PROGRESS_UNAVAILABLE: &str =
    "<section class=\"progress\"><p>Unable to load learning progress. Please try again.</p></section>\n";

/// `GET /insights` → `{ "report": {...}, "text": "📊 Learning Progress Report ..." }`
pub async fn get_insights(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let report = insights::build_report(&state.pool).await?;
    // 같은 리포트를 텍스트로도 렌더링해서 함께 보냅니다
    let text = insights::render_text(&report);
    Ok(Json(json!({ "report": report, "text": text })))
}

/// `GET /progress`: HTML 조각
///
/// 집계에 실패하면 500 상태와 함께 안내 문구가 담긴 HTML을 돌려줍니다.
pub async fn get_progress(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    match insights::build_progress(&state.pool).await {
        // Html: Content-Type을 text/html로 설정하는 응답 래퍼
        Ok(view) => (StatusCode::OK, Html(insights::render_html(&view))),
        Err(e) => {
            tracing::error!("Failed to build progress view: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(PROGRESS_UNAVAILABLE.to_string()),
            )
        }
    }
}
