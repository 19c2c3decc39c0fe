//! # 학습 통계 모델 정의
//!
//! 통계 데이터의 "모양"만 정의합니다.
//! 텍스트/HTML로 그리는 일은 `services::insights`의 렌더링 함수가 따로 맡습니다.

use super::{Mistake, MistakeStats};
use serde::Serialize;

/// 장면별 대화 수: `top_scenes()`의 한 행
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct SceneCount {
    pub scene: String,
    pub count: i64,
}

/// 학습 진행 리포트 (`GET /api/v1/insights`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsReport {
    /// 분류별 실수 집계, 개수 내림차순
    pub mistakes: Vec<MistakeStats>,
    /// 가장 많이 연습한 장면, 최대 3개
    pub top_scenes: Vec<SceneCount>,
}

/// 진행 상황 화면 (`GET /api/v1/progress`)
#[derive(Debug, Clone, Serialize)]
pub struct ProgressView {
    pub mistakes: Vec<MistakeStats>,
    /// 최근 실수, 최신순 최대 5개
    pub recent_mistakes: Vec<Mistake>,
}
