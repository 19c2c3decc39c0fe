//! # 실수 분류 서비스
//!
//! 도우미 응답에 들어 있는 키워드로 실수 종류를 추정합니다.
//! 진짜 문법 분석이 아니라 단순한 부분 문자열 검사입니다.

use crate::models::MistakeCategory;

/// 분류별 키워드. 배열 순서가 곧 우선순위입니다.
const CATEGORY_KEYWORDS: [(MistakeCategory, &[&str]); 4] = [
    (
        MistakeCategory::Grammar,
        &["grammar", "tense", "conjugation", "structure", "incorrect"],
    ),
    (
        MistakeCategory::Vocabulary,
        &["word choice", "meaning", "vocabulary", "wrong word"],
    ),
    (
        MistakeCategory::Pronunciation,
        &["pronunciation", "accent", "sound", "pronounce"],
    ),
    (
        MistakeCategory::Cultural,
        &["cultural context", "formal", "informal", "politeness"],
    ),
];

/// 응답 텍스트를 실수 분류 하나로 매핑합니다.
///
/// 소문자로 바꾼 뒤 우선순위 순서대로 키워드 포함 여부를 검사하고,
/// 처음 맞은 분류를 돌려줍니다. 하나도 맞지 않으면 `General`입니다.
pub fn classify(response: &str) -> MistakeCategory {
    let lower = response.to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or(MistakeCategory::General)
}
