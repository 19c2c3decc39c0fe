//! # 연습 세션 설정 서비스
//!
//! 세션 설정 입력을 검증하고, 수준별 장면 목록을 제공합니다.

use crate::db;
use crate::error::AppError;
use crate::models::{SessionConfig, SetupRequest};

/// 필드가 하나라도 비어 있을 때 돌려주는 고정 문구
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields before starting the chat.";

pub const LEVELS: [&str; 3] = ["Beginner", "Intermediate", "Advanced"];

/// 수준별 대화 장면
const SCENE_OPTIONS: [(&str, [&str; 3]); 3] = [
    (
        "Beginner",
        ["ordering food at a restaurant", "greeting someone", "asking for directions"],
    ),
    (
        "Intermediate",
        ["booking a hotel", "visiting a doctor", "chatting with a local"],
    ),
    (
        "Advanced",
        ["debating social issues", "job interview", "discussing politics"],
    ),
];

/// 입력을 검증해 새 세션 설정과 인사말을 만듭니다.
///
/// 빈 필드(공백만 있는 경우 포함)가 있으면 `BadRequest(MISSING_FIELDS_MESSAGE)`를 돌려줍니다.
/// 이 함수는 상태를 바꾸지 않습니다. 활성 세션 교체는 호출자가 성공했을 때만 합니다.
pub fn setup(req: &SetupRequest) -> Result<(SessionConfig, String), AppError> {
    let fields = [&req.known_language, &req.target_language, &req.level, &req.scene];
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string()));
    }

    let session = SessionConfig {
        known_language: req.known_language.trim().to_string(),
        target_language: req.target_language.trim().to_string(),
        level: capitalize(req.level.trim()),
        scene: req.scene.trim().to_string(),
        started_at: db::now_timestamp(),
    };
    let greeting = format!(
        "Great! You're practicing {} in a {}-speaking country. Let's begin!",
        session.scene, session.target_language
    );

    Ok((session, greeting))
}

/// 수준에 맞는 장면 목록. 모르는 수준이면 Beginner 목록을 돌려줍니다.
pub fn scene_options(level: &str) -> Vec<&'static str> {
    let level = capitalize(level.trim());
    SCENE_OPTIONS
        .iter()
        .find(|(name, _)| *name == level)
        .unwrap_or(&SCENE_OPTIONS[0])
        .1
        .to_vec()
}

/// 첫 글자는 대문자, 나머지는 소문자로 바꿉니다 ("bEGINNER" → "Beginner").
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
