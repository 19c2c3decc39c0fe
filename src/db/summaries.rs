//! # 세션 요약 데이터베이스 쿼리 모듈
//!
//! `user_progress` 테이블에 세션 요약을 남기고 조회합니다.
//!
//! ## 집계 기준
//! 세션의 장면(scene)과 같은 장면에서, 세션 시작 시각(`started_at`) 이후에 저장된
//! 대화 턴과 실수만 셉니다.

use crate::error::AppError;
use crate::models::{NewSessionSummary, SessionConfig, SessionSummary};
use sqlx::SqlitePool;

/// 현재 세션의 카운터를 계산합니다 (저장하지 않음).
///
/// - `total_interactions`: 저장된 대화 턴 수
/// - `mistakes_made`: 저장된 실수 수
/// - `correct_responses`: 둘의 차이 (음수가 되지 않도록 0에서 자름)
/// - `confidence_score`: correct / total, 턴이 없으면 0.0
pub async fn summarize_session(
    pool: &SqlitePool,
    session: &SessionConfig,
) -> Result<NewSessionSummary, AppError> {
    // query_scalar: 결과의 첫 번째 열 하나만 꺼냅니다 (여기서는 COUNT(*))
    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM chats WHERE scene = ? AND timestamp >= ?")
            .bind(&session.scene)
            .bind(&session.started_at)
            .fetch_one(pool)
            .await?;

    let mistakes: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM mistakes WHERE context = ? AND timestamp >= ?")
            .bind(&session.scene)
            .bind(&session.started_at)
            .fetch_one(pool)
            .await?;

    let correct = (total - mistakes).max(0);
    let confidence = if total > 0 {
        correct as f64 / total as f64
    } else {
        0.0
    };

    Ok(NewSessionSummary {
        scene: session.scene.clone(),
        total_interactions: total,
        correct_responses: correct,
        mistakes_made: mistakes,
        confidence_score: confidence,
    })
}

/// ID로 세션 요약 하나를 조회합니다.
pub async fn get_session_summary(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<SessionSummary>, AppError> {
    let summary = sqlx::query_as::<_, SessionSummary>(
        r#"
        SELECT id, session_date, scene, total_interactions, correct_responses,
               mistakes_made, confidence_score
        FROM user_progress
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool) // 없는 id면 None
    .await?;

    Ok(summary)
}

/// 세션 요약을 저장합니다. `session_date`는 오늘 날짜로 채워집니다.
pub async fn insert_session_summary(
    pool: &SqlitePool,
    summary: &NewSessionSummary,
) -> Result<SessionSummary, AppError> {
    // 날짜만 남깁니다 (예: "2026-10-16")
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let result = sqlx::query(
        r#"
        INSERT INTO user_progress (session_date, scene, total_interactions,
                                   correct_responses, mistakes_made, confidence_score)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(today)
    .bind(&summary.scene)
    .bind(summary.total_interactions)
    .bind(summary.correct_responses)
    .bind(summary.mistakes_made)
    .bind(summary.confidence_score) // 0.0 ~ 1.0
    .execute(pool)
    .await?;

    get_session_summary(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created session summary".to_string()))
}

/// 최근 세션 요약을 최신순으로 조회합니다.
pub async fn list_session_summaries(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<SessionSummary>, AppError> {
    let summaries = sqlx::query_as::<_, SessionSummary>(
        r#"
        SELECT id, session_date, scene, total_interactions, correct_responses,
               mistakes_made, confidence_score
        FROM user_progress
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{insert_mistake, insert_turn, test_pool};
    use crate::models::{MistakeCategory, NewChatTurn, NewMistake};

    fn session(scene: &str, started_at: &str) -> SessionConfig {
        SessionConfig {
            known_language: "English".into(),
            target_language: "Spanish".into(),
            level: "Beginner".into(),
            scene: scene.into(),
            started_at: started_at.into(),
        }
    }

    async fn store_turn(pool: &SqlitePool, scene: &str, with_mistake: bool) {
        insert_turn(
            pool,
            &NewChatTurn {
                user_input: "hola".into(),
                bot_response: "check your grammar".into(),
                sentiment_score: 0.0,
                scene: scene.into(),
            },
        )
        .await
        .unwrap();
        if with_mistake {
            insert_mistake(
                pool,
                &NewMistake {
                    user_input: "hola".into(),
                    category: MistakeCategory::Grammar,
                    correction: "check your grammar".into(),
                    explanation: "Extracted from conversation".into(),
                    context: scene.into(),
                },
            )
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn summary_counts_only_the_session_scene() {
        let pool = test_pool().await;
        store_turn(&pool, "greeting someone", true).await;
        store_turn(&pool, "greeting someone", false).await;
        store_turn(&pool, "greeting someone", false).await;
        store_turn(&pool, "job interview", true).await;

        let summary = summarize_session(&pool, &session("greeting someone", "2000-01-01 00:00:00"))
            .await
            .unwrap();
        assert_eq!(summary.total_interactions, 3);
        assert_eq!(summary.mistakes_made, 1);
        assert_eq!(summary.correct_responses, 2);
        assert!((summary.confidence_score - 2.0 / 3.0).abs() < 1e-9);

        let saved = insert_session_summary(&pool, &summary).await.unwrap();
        assert_eq!(saved.scene, "greeting someone");
        assert_eq!(list_session_summaries(&pool, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn summary_ignores_turns_before_session_start() {
        let pool = test_pool().await;
        store_turn(&pool, "greeting someone", true).await;

        let summary = summarize_session(&pool, &session("greeting someone", "9999-12-31 23:59:59"))
            .await
            .unwrap();
        assert_eq!(summary.total_interactions, 0);
        assert_eq!(summary.confidence_score, 0.0);
    }
}
