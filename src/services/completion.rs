//! # 채팅 완성(Chat Completion) 클라이언트
//!
//! 외부 채팅 완성 API(OpenRouter 호환)에 대화 프롬프트를 보내고 응답을 받아옵니다.
//!
//! ## 구성
//! - `ChatTransport` 트레이트: "요청 하나 보내고 응답 텍스트 받기"만 책임지는 전송 계층
//! - `ReqwestTransport`: reqwest로 구현한 실제 HTTP 전송
//! - `CompletionClient`: 프롬프트 조립, 재시도 정책, 감정 맞춤 문구 적용
//!
//! ## 재시도 정책
//! ```text
//! 타임아웃 / 연결 실패 → 고정 간격으로 재시도 (총 max_attempts번)
//!                      → 예산 소진 시 실패 종류에 맞는 사과 문구
//! 200이 아닌 HTTP 상태 → 재시도 없이 "trouble connecting" 문구
//! 그 밖의 실패(파싱 등) → 재시도 없이 "technical difficulties" 문구, 원인은 로그로
//! ```
//! `complete()`는 절대 에러를 반환하지 않습니다. 모든 실패는 사용자에게 보여줄 문자열이 됩니다.

use crate::models::{ChatTurn, SessionConfig};
use crate::services::phrases::PhrasePools;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const TIMEOUT_APOLOGY: &str =
    "The response is taking longer than expected. Could you please try again? 🕒";
pub const CONNECTION_APOLOGY: &str = "I'm having trouble connecting to my language services. Please check your internet connection and try again. 🌐";
pub const EXHAUSTED_APOLOGY: &str =
    "I'm sorry, I'm having trouble responding right now. Please try again in a few moments. 🙏";
pub const STATUS_FAILURE: &str =
    "I'm having trouble connecting right now. Could you please try again in a moment? 😊";
pub const TECHNICAL_FAILURE: &str =
    "I seem to be having technical difficulties. Let's try that again! 🔄";

/// 응답에 이 문자열 중 하나라도 들어 있으면 실패 안내 문구로 봅니다.
/// 이런 턴은 학습 기록으로 저장하지 않습니다.
pub const PLACEHOLDER_MARKERS: [&str; 4] = [
    "trouble connecting",
    "taking longer than expected",
    "technical difficulties",
    "try again",
];

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
/// 프롬프트에 넣는 이전 대화 턴 수
pub const CONTEXT_TURNS: usize = 3;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

/// 응답이 실패 안내 문구인지 확인합니다.
pub fn is_placeholder(response: &str) -> bool {
    PLACEHOLDER_MARKERS
        .iter()
        .any(|marker| response.contains(marker))
}

/// API로 보내는 메시지 한 개
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: String,
}

/// 완성 API 요청 본문
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<PromptMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// 전송 계층 에러
///
/// 재시도 여부는 종류로 결정됩니다: `Timeout`과 `Connect`만 재시도합니다.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Unexpected(err.to_string())
        }
    }
}

/// 요청 하나를 보내고 첫 번째 선택지의 내용을 돌려주는 전송 계층
///
/// `#[async_trait]`: 트레이트의 async fn을 `Arc<dyn ChatTransport>`로 쓸 수 있게 합니다.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &CompletionRequest) -> Result<String, TransportError>;
}

/// reqwest 기반 HTTP 전송
pub struct ReqwestTransport {
    client: Client,
    url: String,
    api_key: String,
}

impl ReqwestTransport {
    /// `timeout`은 시도 한 번에 적용됩니다 (연결 + 응답 본문까지).
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl ChatTransport for ReqwestTransport {
    async fn send(&self, request: &CompletionRequest) -> Result<String, TransportError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        // 200만 성공으로 봅니다. 201/204 같은 다른 2xx도 실패 처리
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| TransportError::Unexpected("response has no choices".to_string()))
    }
}

/// 프롬프트 조립 + 재시도 + 감정 맞춤 문구를 담당하는 클라이언트
pub struct CompletionClient {
    transport: Arc<dyn ChatTransport>,
    model: String,
    max_attempts: u32,
    retry_delay: Duration,
    phrases: PhrasePools,
}

impl CompletionClient {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        model: impl Into<String>,
        phrases: PhrasePools,
    ) -> Self {
        Self {
            transport,
            model: model.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            phrases,
        }
    }

    /// 재시도 예산(첫 시도 포함 총 횟수)과 고정 대기 시간을 바꿉니다.
    pub fn with_retry(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.retry_delay = retry_delay;
        self
    }

    /// 요청 본문을 만듭니다.
    ///
    /// `recent`는 최신순으로 들어오며, 프롬프트에는 최대 3개를 오래된 것부터 넣습니다.
    pub fn build_request(
        &self,
        user_text: &str,
        session: &SessionConfig,
        recent: &[ChatTurn],
    ) -> CompletionRequest {
        let context = if recent.is_empty() {
            String::new()
        } else {
            let lines: Vec<String> = recent
                .iter()
                .take(CONTEXT_TURNS)
                .rev()
                .map(|turn| format!("User: {}\nAssistant: {}", turn.user_input, turn.bot_response))
                .collect();
            format!("Previous conversation:\n{}\n\n", lines.join("\n"))
        };

        let system = format!(
            "You are Chatalyst, a friendly language guide. \
             Help the user learn {} in a simple way. \
             Use short sentences and easy words. \
             Encourage them and provide examples. \
             Current scene: {}.\n\n{}",
            session.target_language, session.scene, context
        );

        CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                PromptMessage {
                    role: "system".to_string(),
                    content: system,
                },
                PromptMessage {
                    role: "user".to_string(),
                    content: user_text.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }

    /// 사용자 메시지에 대한 도우미 응답을 받아옵니다.
    ///
    /// 성공하면 감정 점수에 맞춰 다시 쓴 응답을, 실패하면 고정 안내 문구를 돌려줍니다.
    pub async fn complete(
        &self,
        user_text: &str,
        session: &SessionConfig,
        recent: &[ChatTurn],
        sentiment: f64,
    ) -> String {
        let request = self.build_request(user_text, session, recent);
        let mut apology = EXHAUSTED_APOLOGY;

        for attempt in 1..=self.max_attempts {
            match self.transport.send(&request).await {
                Ok(content) => return self.phrases.apply(sentiment, &content),
                Err(err @ (TransportError::Timeout | TransportError::Connect(_))) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        "Completion attempt failed: {}",
                        err
                    );
                    apology = match err {
                        TransportError::Timeout => TIMEOUT_APOLOGY,
                        _ => CONNECTION_APOLOGY,
                    };
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
                Err(TransportError::Status { status, body }) => {
                    tracing::error!("Completion API error: {} - {}", status, body);
                    return STATUS_FAILURE.to_string();
                }
                Err(TransportError::Unexpected(cause)) => {
                    tracing::error!("Error in completion request: {}", cause);
                    return TECHNICAL_FAILURE.to_string();
                }
            }
        }

        apology.to_string()
    }
}
