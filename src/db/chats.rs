//! # 대화 턴 데이터베이스 쿼리 모듈
//!
//! `chats` 테이블에 대한 쿼리 함수들입니다.
//! 대화 턴은 한 번 저장되면 수정/삭제되지 않으므로 INSERT와 조회만 있습니다.

use super::now_timestamp;
use crate::error::AppError;
use crate::models::{ChatTurn, NewChatTurn, SceneCount};
use sqlx::SqlitePool;

/// ID로 대화 턴 하나를 조회합니다.
///
/// `fetch_optional`: 0행이면 None, 1행이면 Some(ChatTurn)
pub async fn get_turn(pool: &SqlitePool, id: i64) -> Result<Option<ChatTurn>, AppError> {
    let turn = sqlx::query_as::<_, ChatTurn>(
        r#"
        SELECT id, user_input, bot_response, sentiment_score, scene, timestamp
        FROM chats
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(turn)
}

/// 대화 턴을 저장하고 저장된 행을 반환합니다.
///
/// `timestamp`는 저장 시점의 로컬 시간으로 채워집니다.
/// `last_insert_rowid()`: AUTOINCREMENT로 배정된 id
pub async fn insert_turn(pool: &SqlitePool, turn: &NewChatTurn) -> Result<ChatTurn, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO chats (user_input, bot_response, sentiment_score, scene, timestamp)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&turn.user_input) // .bind(): SQL의 ? 자리에 순서대로 값을 채움
    .bind(&turn.bot_response)
    .bind(turn.sentiment_score) // f64는 SQLite REAL로 저장
    .bind(&turn.scene)
    .bind(now_timestamp())
    .execute(pool) // 결과 행이 없는 쿼리는 execute
    .await?; // 실패 시 sqlx::Error → AppError::Database로 자동 변환

    // 저장 직후 다시 조회해서 id와 timestamp가 채워진 완전한 행을 돌려줍니다
    get_turn(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created chat turn".to_string()))
}

/// 최근 대화 턴을 최신순으로 조회합니다.
///
/// 같은 초에 저장된 턴도 순서가 뒤섞이지 않도록 timestamp 대신 id로 정렬합니다.
pub async fn recent_turns(pool: &SqlitePool, limit: i64) -> Result<Vec<ChatTurn>, AppError> {
    let turns = sqlx::query_as::<_, ChatTurn>(
        r#"
        SELECT id, user_input, bot_response, sentiment_score, scene, timestamp
        FROM chats
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(limit) // LIMIT에도 바인딩을 쓸 수 있습니다
    .fetch_all(pool) // 모든 행을 Vec으로
    .await?;

    Ok(turns)
}

/// 가장 많이 연습한 장면을 대화 수 내림차순으로 조회합니다.
///
/// 개수가 같으면 장면 이름순으로 정렬해 결과가 항상 같게 나오도록 합니다.
pub async fn top_scenes(pool: &SqlitePool, limit: i64) -> Result<Vec<SceneCount>, AppError> {
    let scenes = sqlx::query_as::<_, SceneCount>(
        r#"
        -- AS count: SceneCount 구조체의 필드 이름과 맞춤 (FromRow 매핑)
        SELECT scene, COUNT(*) AS count
        FROM chats
        GROUP BY scene
        ORDER BY count DESC, scene ASC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(scenes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn turn(user: &str, scene: &str) -> NewChatTurn {
        NewChatTurn {
            user_input: user.to_string(),
            bot_response: format!("reply to {user}"),
            sentiment_score: 0.25,
            scene: scene.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let pool = test_pool().await;
        let first = insert_turn(&pool, &turn("hola", "greeting someone")).await.unwrap();
        let second = insert_turn(&pool, &turn("adiós", "greeting someone")).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.bot_response, "reply to hola");
        assert_eq!(first.sentiment_score, 0.25);
        assert_eq!(first.timestamp.len(), "2026-01-01 00:00:00".len());
    }

    #[tokio::test]
    async fn recent_turns_are_most_recent_first_and_limited() {
        let pool = test_pool().await;
        for text in ["one", "two", "three", "four"] {
            insert_turn(&pool, &turn(text, "booking a hotel")).await.unwrap();
        }

        let recent = recent_turns(&pool, 3).await.unwrap();
        let inputs: Vec<&str> = recent.iter().map(|t| t.user_input.as_str()).collect();
        assert_eq!(inputs, vec!["four", "three", "two"]);
    }

    #[tokio::test]
    async fn top_scenes_orders_by_count() {
        let pool = test_pool().await;
        for (text, scene) in [
            ("a", "job interview"),
            ("b", "greeting someone"),
            ("c", "greeting someone"),
            ("d", "asking for directions"),
            ("e", "greeting someone"),
            ("f", "job interview"),
            ("g", "visiting a doctor"),
        ] {
            insert_turn(&pool, &turn(text, scene)).await.unwrap();
        }

        let scenes = top_scenes(&pool, 3).await.unwrap();
        assert_eq!(
            scenes,
            vec![
                SceneCount { scene: "greeting someone".into(), count: 3 },
                SceneCount { scene: "job interview".into(), count: 2 },
                SceneCount { scene: "asking for directions".into(), count: 1 },
            ]
        );
    }
}
