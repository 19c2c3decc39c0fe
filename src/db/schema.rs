//! # 스키마 초기화
//!
//! 세 테이블을 만듭니다:
//! - `chats`: 대화 턴
//! - `mistakes`: 키워드로 찾아낸 실수
//! - `user_progress`: 세션 요약
//!
//! 기본 동작은 비파괴적입니다 (`CREATE TABLE IF NOT EXISTS`).
//! `fresh = true`(환경변수 `RESET_DATABASE=true`)일 때만 기존 테이블을 모두 지우고 새로 만듭니다.

use crate::error::AppError;
use sqlx::SqlitePool;

// DROP 순서. 외래 키가 없어서 순서는 상관없습니다
const TABLES: [&str; 3] = ["chats", "mistakes", "user_progress"];

const CREATE_CHATS: &str = r#"
CREATE TABLE IF NOT EXISTS chats (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_input TEXT NOT NULL,
    bot_response TEXT NOT NULL,
    sentiment_score REAL NOT NULL DEFAULT 0.0,
    scene TEXT NOT NULL DEFAULT '',
    timestamp TEXT NOT NULL
)
"#;

const CREATE_MISTAKES: &str = r#"
CREATE TABLE IF NOT EXISTS mistakes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_input TEXT NOT NULL,
    mistake_type TEXT NOT NULL,
    correction TEXT NOT NULL,
    explanation TEXT NOT NULL,
    context TEXT NOT NULL DEFAULT '',
    timestamp TEXT NOT NULL,
    review_count INTEGER NOT NULL DEFAULT 0,
    mastered BOOLEAN NOT NULL DEFAULT FALSE
)
"#;

const CREATE_USER_PROGRESS: &str = r#"
CREATE TABLE IF NOT EXISTS user_progress (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_date TEXT NOT NULL,
    scene TEXT NOT NULL,
    total_interactions INTEGER NOT NULL,
    correct_responses INTEGER NOT NULL,
    mistakes_made INTEGER NOT NULL,
    confidence_score REAL NOT NULL
)
"#;

/// 스키마를 준비합니다.
///
/// ## 매개변수
/// - `fresh`: true이면 세 테이블을 DROP한 뒤 다시 만듭니다. 기존 기록은 모두 사라집니다.
pub async fn init_schema(pool: &SqlitePool, fresh: bool) -> Result<(), AppError> {
    if fresh {
        tracing::warn!("RESET_DATABASE is set, dropping all tables");
        for table in TABLES {
            // 테이블 이름은 바인딩(?)할 수 없어서 상수 목록으로만 format!합니다
            sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
                .execute(pool)
                .await?;
        }
    }

    // IF NOT EXISTS라 이미 있는 테이블과 데이터는 그대로 둡니다
    for ddl in [CREATE_CHATS, CREATE_MISTAKES, CREATE_USER_PROGRESS] {
        sqlx::query(ddl).execute(pool).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::NewChatTurn;

    fn turn(text: &str) -> NewChatTurn {
        NewChatTurn {
            user_input: text.to_string(),
            bot_response: "¡Hola!".to_string(),
            sentiment_score: 0.0,
            scene: "greeting someone".to_string(),
        }
    }

    #[tokio::test]
    async fn reinit_keeps_history_unless_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("chat.db").display());

        let pool = db::connect(&url).await.unwrap();
        init_schema(&pool, false).await.unwrap();
        db::insert_turn(&pool, &turn("hello")).await.unwrap();
        pool.close().await;

        // 재시작: 비파괴 초기화는 기록을 유지합니다
        let pool = db::connect(&url).await.unwrap();
        init_schema(&pool, false).await.unwrap();
        assert_eq!(db::recent_turns(&pool, 3).await.unwrap().len(), 1);

        // fresh 초기화는 모두 지웁니다
        init_schema(&pool, true).await.unwrap();
        assert!(db::recent_turns(&pool, 3).await.unwrap().is_empty());
        pool.close().await;
    }
}
