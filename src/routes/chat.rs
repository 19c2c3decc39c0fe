//! # 대화 API 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/v1/chat` + `{ "message": "...", "history": [...] }` → `{ "history": [...] }`
//!
//! 대화 처리 자체는 `services::orchestrator::process_turn`이 맡습니다.
//! 핸들러는 활성 세션을 꺼내 명시적으로 넘겨주기만 합니다.

use crate::{
    error::AppError,                                  // 자동으로 HTTP 에러 응답으로 변환됨
    models::*,                                        // ChatRequest, ChatResponse
    routes::{session::NO_SESSION_MESSAGE, AppState},
    services::orchestrator,                           // 대화 턴 처리 파이프라인
};
use axum::{extract::State, Json};

/// `POST /chat`: 메시지 하나를 처리하고 갱신된 대화 기록을 돌려줍니다.
///
/// 세션 설정은 읽기 잠금 안에서 복제한 뒤 바로 잠금을 풉니다. 완성 API 호출 중에는 잠금을 잡지 않습니다.
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    // 앞뒤 공백을 뺀 메시지가 비어 있으면 완성 API를 부르지 않습니다
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty.".to_string()));
    }

    let session = state
        .session
        .read() // 읽기 잠금: 여러 요청이 동시에 읽을 수 있음
        .await
        .clone() // Option<SessionConfig>를 복제. 이 문장이 끝나면 잠금이 풀립니다
        .ok_or_else(|| AppError::BadRequest(NO_SESSION_MESSAGE.to_string()))?;

    // process_turn은 실패하지 않습니다. 오류는 대화 기록 안의 안내 문구로 돌아옵니다
    let history =
        orchestrator::process_turn(&state.pool, &state.client, &session, message, req.history)
            .await;

    Ok(Json(ChatResponse { history }))
}
