//! # 대화 모델 정의
//!
//! 한 번의 대화 턴(사용자 메시지 + 도우미 응답)과
//! 클라이언트와 주고받는 대화 기록(transcript) 구조체를 정의합니다.
//!
//! ## 구조체 역할
//! - `ChatTurn`: DB의 `chats` 테이블 한 행 (생성 후 수정/삭제되지 않음)
//! - `NewChatTurn`: INSERT할 때 쓰는 값 (id와 timestamp는 저장 시 채워짐)
//! - `ChatMessage`: 화면에 보이는 대화 기록의 한 줄
//! - `ChatRequest` / `ChatResponse`: `POST /api/v1/chat`의 요청/응답 본문

use serde::{Deserialize, Serialize};

/// 대화 턴 엔티티: DB의 `chats` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatTurn {
    /// 자동 증가 식별자. 나중에 만든 턴일수록 큽니다.
    pub id: i64,
    pub user_input: String,
    pub bot_response: String,
    /// 사용자 메시지의 감정 점수 [-1.0, 1.0]
    pub sentiment_score: f64,
    pub scene: String,
    /// 생성 시각 (로컬 시간, 초 단위: "2026-10-16 14:03:22")
    pub timestamp: String,
}

/// 새로 저장할 대화 턴
#[derive(Debug, Clone)]
pub struct NewChatTurn {
    pub user_input: String,
    pub bot_response: String,
    pub sentiment_score: f64,
    pub scene: String,
}

/// 대화 기록 메시지의 발화자
///
/// `#[serde(rename_all = "lowercase")]`: JSON에서는 "user" / "assistant"로 표현됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// 화면에 표시되는 대화 기록의 한 줄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// 메시지 전송 요청: `POST /api/v1/chat`의 요청 본문
///
/// `history`는 클라이언트가 들고 있는 현재 대화 기록입니다.
/// 없으면 빈 기록으로 시작합니다 (`#[serde(default)]`).
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// 메시지 전송 응답: 사용자 메시지와 도우미 응답이 덧붙은 대화 기록
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub history: Vec<ChatMessage>,
}
