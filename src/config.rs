//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `OPENROUTER_API_KEY`: 채팅 완성 API 키 (필수)
//! - `DATABASE_URL`: SQLite 데이터베이스 경로
//! - `HOST` / `PORT`: 서버 바인딩 주소와 포트
//! - `COMPLETION_URL` / `COMPLETION_MODEL`: 완성 API 엔드포인트와 모델 이름
//! - `COMPLETION_TIMEOUT_SECS`: 시도당 요청 타임아웃
//! - `COMPLETION_MAX_ATTEMPTS` / `COMPLETION_RETRY_DELAY_MS`: 재시도 예산과 고정 대기 시간
//! - `RESET_DATABASE`: `true`이면 시작할 때 모든 테이블을 지우고 다시 만듦
//! - `MASTERY_THRESHOLD`: 실수를 "숙달"로 표시하기까지 필요한 복습 횟수
//! - `PHRASES_PATH`: 격려/축하 문구 JSON 파일 경로 (선택)
//! - `STATIC_DIR`: 빌드된 프론트엔드 디렉토리

use std::env;
use std::str::FromStr;

pub const DEFAULT_COMPLETION_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "mistralai/mistral-7b-instruct";

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 `main`에서 각 구성요소로 나눠 전달됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:language_chatbot.db?mode=rwc")
    pub database_url: String,
    /// 완성 API의 Bearer 토큰
    pub api_key: String,
    pub completion_url: String,
    pub completion_model: String,
    /// 시도 한 번의 타임아웃(초)
    pub completion_timeout_secs: u64,
    /// 전체 시도 횟수 (첫 시도 포함)
    pub completion_max_attempts: u32,
    /// 재시도 사이의 고정 대기 시간(밀리초). 백오프나 지터는 없습니다.
    pub completion_retry_delay_ms: u64,
    /// 시작 시 스키마를 파괴적으로 재생성할지 여부
    pub reset_database: bool,
    pub mastery_threshold: i64,
    /// 문구 풀 JSON 파일 경로. None이면 내장 기본값을 씁니다.
    pub phrases_path: Option<String>,
    pub static_dir: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "127.0.0.1")
    pub host: String,
    /// 서버 포트 번호 (기본값: 8080)
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `OPENROUTER_API_KEY`는 필수이며, 없으면 `VarError`가 반환됩니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:language_chatbot.db?mode=rwc".to_string()),
            api_key: env::var("OPENROUTER_API_KEY")?, // 필수: 없으면 에러
            completion_url: env::var("COMPLETION_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.to_string()),
            completion_model: env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.to_string()),
            completion_timeout_secs: parse_or("COMPLETION_TIMEOUT_SECS", 30),
            completion_max_attempts: parse_or("COMPLETION_MAX_ATTEMPTS", 3),
            completion_retry_delay_ms: parse_or("COMPLETION_RETRY_DELAY_MS", 1000),
            reset_database: parse_flag(env::var("RESET_DATABASE").ok().as_deref()),
            mastery_threshold: parse_or("MASTERY_THRESHOLD", 3),
            // .ok(): Result → Option. 변수가 없으면 None
            phrases_path: env::var("PHRASES_PATH").ok().filter(|p| !p.trim().is_empty()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080),
        })
    }
}

/// 숫자형 환경변수를 읽습니다. 없거나 파싱에 실패하면 기본값을 씁니다.
///
/// 제네릭 `T: FromStr`로 u16, u32, u64, i64 등에 모두 쓸 수 있습니다.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// "1", "true", "yes", "on"(대소문자 무시)만 참으로 봅니다.
fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_flag_accepts_common_truthy_values() {
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some(" YES ")));
        assert!(parse_flag(Some("1")));
        assert!(!parse_flag(Some("false")));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(None));
    }
}
