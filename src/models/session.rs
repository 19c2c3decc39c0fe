//! # 연습 세션 모델 정의
//!
//! 사용자가 "연습 시작"을 누를 때 정한 설정과,
//! 세션이 끝난 뒤 남기는 요약 기록을 정의합니다.
//!
//! ## 세션 흐름
//! 1. `SetupRequest`로 아는 언어 / 배울 언어 / 수준 / 장면을 보냄
//! 2. 검증을 통과하면 `SessionConfig`가 활성 세션이 됨
//! 3. 이후 모든 대화 턴은 이 설정을 명시적으로 전달받아 처리됨
//! 4. `POST /session/summary`로 현재 세션을 `SessionSummary`로 기록

use serde::{Deserialize, Serialize};

/// 활성 연습 세션 설정 (DB에 저장되지 않음)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 사용자가 이미 아는 언어 (예: "English")
    pub known_language: String,
    /// 연습할 언어 (예: "Spanish")
    pub target_language: String,
    /// 첫 글자만 대문자로 정규화된 수준 (예: "Beginner")
    pub level: String,
    /// 대화 장면 (예: "greeting someone")
    pub scene: String,
    /// 세션 시작 시각. 세션 요약이 이 시각 이후의 기록만 집계합니다.
    pub started_at: String,
}

/// 세션 설정 요청: `POST /api/v1/session`의 요청 본문
///
/// 필드가 빠져도 역직렬화 단계에서 실패하지 않도록 `#[serde(default)]`를 둡니다.
/// 빈 값 검증은 `services::session::setup`이 맡아 고정된 안내 문구를 돌려줍니다.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SetupRequest {
    pub known_language: String,
    pub target_language: String,
    pub level: String,
    pub scene: String,
}

/// 세션 설정 응답
#[derive(Debug, Serialize)]
pub struct SetupResponse {
    pub greeting: String,
    pub session: SessionConfig,
}

/// `GET /api/v1/scenes?level=...`의 쿼리 문자열
#[derive(Debug, Deserialize)]
pub struct SceneQuery {
    pub level: Option<String>,
}

/// 세션 요약 엔티티: DB의 `user_progress` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SessionSummary {
    pub id: i64,
    /// 요약을 남긴 날짜 ("2026-10-16")
    pub session_date: String,
    pub scene: String,
    pub total_interactions: i64,
    /// 실수로 분류되지 않은 턴 수
    pub correct_responses: i64,
    pub mistakes_made: i64,
    /// correct_responses / total_interactions (턴이 없으면 0.0)
    pub confidence_score: f64,
}

/// 새로 저장할 세션 요약
#[derive(Debug, Clone)]
pub struct NewSessionSummary {
    pub scene: String,
    pub total_interactions: i64,
    pub correct_responses: i64,
    pub mistakes_made: i64,
    pub confidence_score: f64,
}
