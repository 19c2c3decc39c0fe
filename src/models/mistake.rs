//! # 실수(Mistake) 모델 정의
//!
//! 도우미 응답에서 키워드로 찾아낸 학습 이슈를 표현합니다.
//!
//! ## 구조체 역할
//! - `MistakeCategory`: 닫힌 분류 집합 (grammar, vocabulary, pronunciation, cultural, general)
//! - `Mistake`: DB의 `mistakes` 테이블 한 행
//! - `NewMistake`: INSERT할 때 쓰는 값
//! - `MistakeStats`: 분류별 집계 (전체 개수, 숙달 개수)

use serde::{Deserialize, Serialize};
use std::fmt;

/// 실수 분류
///
/// 분류기는 `Grammar → Vocabulary → Pronunciation → Cultural` 순서로 검사하고,
/// 아무것도 맞지 않으면 `General`을 돌려줍니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MistakeCategory {
    Grammar,
    Vocabulary,
    Pronunciation,
    Cultural,
    General,
}

impl MistakeCategory {
    /// DB에 저장되는 문자열 표현
    pub fn as_str(&self) -> &'static str {
        match self {
            MistakeCategory::Grammar => "grammar",
            MistakeCategory::Vocabulary => "vocabulary",
            MistakeCategory::Pronunciation => "pronunciation",
            MistakeCategory::Cultural => "cultural",
            MistakeCategory::General => "general",
        }
    }
}

impl fmt::Display for MistakeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 실수 엔티티: DB의 `mistakes` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Mistake {
    pub id: i64,
    pub user_input: String,
    /// `MistakeCategory::as_str()` 값
    pub mistake_type: String,
    /// 현재는 도우미 응답 원문이 그대로 들어갑니다 (진짜 교정문이 아님)
    pub correction: String,
    pub explanation: String,
    /// 실수가 나온 장면(scene)
    pub context: String,
    pub timestamp: String,
    /// 복습 횟수. `record_review`로만 증가합니다.
    pub review_count: i64,
    pub mastered: bool,
}

/// 새로 저장할 실수
#[derive(Debug, Clone)]
pub struct NewMistake {
    pub user_input: String,
    pub category: MistakeCategory,
    pub correction: String,
    pub explanation: String,
    pub context: String,
}

/// 분류별 실수 집계: `mistake_counts()`의 한 행
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct MistakeStats {
    pub mistake_type: String,
    pub total: i64,
    pub mastered: i64,
}

impl MistakeStats {
    /// 숙달 비율(%). total이 0이면 0.0
    pub fn mastered_percent(&self) -> f64 {
        if self.total > 0 {
            self.mastered as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }
}
