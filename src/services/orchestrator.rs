//! # 대화 턴 처리 파이프라인
//!
//! 사용자 메시지 하나를 받아 다음 순서로 처리합니다:
//!
//! ```text
//! Received → Scored → Completed → Classified → Persisted → Returned
//!                                                  │
//!                                                  └─(저장 실패)→ Errored → 대체 문구와 함께 Returned
//! ```
//!
//! 1. 감정 점수 계산 (실패하지 않음, 최악의 경우 0.0)
//! 2. 최근 대화 3턴을 읽어 완성 API 호출 (항상 문자열을 돌려받음)
//! 3. 응답을 실수 분류기에 통과
//! 4. 실패 안내 문구가 아니면 대화 턴 저장, 분류가 general이 아니면 실수도 저장
//! 5. 사용자 메시지와 응답을 대화 기록에 덧붙여 반환
//!
//! 저장이 실패해도 대화 기록은 돌려줍니다. 사용자 메시지는 화면에서 사라지지 않습니다.

use crate::db;
use crate::error::AppError;
use crate::models::{ChatMessage, MistakeCategory, NewChatTurn, NewMistake, SessionConfig};
use crate::services::{
    classifier,
    completion::{self, CompletionClient},
    sentiment,
};
use sqlx::SqlitePool;

/// 저장 단계가 실패했을 때 응답 대신 보여주는 문구
pub const PROCESSING_FALLBACK: &str = "I'm having trouble processing that. Let's try again! 🔄";

/// 실수 기록의 `explanation`에 들어가는 고정 문구
pub const MISTAKE_EXPLANATION: &str = "Extracted from conversation";

/// 사용자 메시지 하나를 처리하고 갱신된 대화 기록을 반환합니다.
///
/// 세션 설정은 전역 상태가 아니라 호출자가 명시적으로 넘겨줍니다.
pub async fn process_turn(
    pool: &SqlitePool,
    client: &CompletionClient,
    session: &SessionConfig,
    user_text: &str,
    mut history: Vec<ChatMessage>,
) -> Vec<ChatMessage> {
    let score = sentiment::score(user_text);

    // 문맥 조회 실패는 문맥 없이 진행합니다
    let recent = match db::recent_turns(pool, completion::CONTEXT_TURNS as i64).await {
        Ok(turns) => turns,
        Err(e) => {
            tracing::warn!("Could not load recent turns, continuing without context: {}", e);
            Vec::new()
        }
    };

    let response = client.complete(user_text, session, &recent, score).await;
    let category = classifier::classify(&response);

    match persist_turn(pool, session, user_text, &response, score, category).await {
        Ok(()) => {
            history.push(ChatMessage::user(user_text));
            history.push(ChatMessage::assistant(response));
        }
        Err(e) => {
            tracing::error!("Error in chat turn: {}", e);
            history.push(ChatMessage::user(user_text));
            history.push(ChatMessage::assistant(PROCESSING_FALLBACK));
        }
    }

    history
}

/// 학습 데이터로 남길 턴이면 저장합니다.
///
/// 실패 안내 문구만 돌아온 턴은 아무것도 저장하지 않습니다.
/// 대화 턴과 실수는 각각 따로 커밋되는 단일 행 INSERT입니다.
async fn persist_turn(
    pool: &SqlitePool,
    session: &SessionConfig,
    user_text: &str,
    response: &str,
    score: f64,
    category: MistakeCategory,
) -> Result<(), AppError> {
    if completion::is_placeholder(response) {
        tracing::debug!("Skipping persistence for placeholder response");
        return Ok(());
    }

    let turn = db::insert_turn(
        pool,
        &NewChatTurn {
            user_input: user_text.to_string(),
            bot_response: response.to_string(),
            sentiment_score: score,
            scene: session.scene.clone(),
        },
    )
    .await?;
    tracing::debug!(turn_id = turn.id, sentiment = score, "Stored chat turn");

    if category != MistakeCategory::General {
        let mistake = db::insert_mistake(
            pool,
            &NewMistake {
                user_input: user_text.to_string(),
                category,
                correction: response.to_string(),
                explanation: MISTAKE_EXPLANATION.to_string(),
                context: session.scene.clone(),
            },
        )
        .await?;
        tracing::debug!(mistake_id = mistake.id, category = %category, "Stored mistake");
    }

    Ok(())
}
