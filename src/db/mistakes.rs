//! # 실수 기록 데이터베이스 쿼리 모듈
//!
//! `mistakes` 테이블에 대한 쿼리 함수들입니다.
//!
//! ## 복습 라이프사이클
//! ```text
//! insert_mistake() → review_count = 0, mastered = false
//!   → record_review() × N → review_count >= threshold 이면 mastered = true
//! ```

use super::now_timestamp;
use crate::error::AppError;
use crate::models::{Mistake, MistakeStats, NewMistake};
use sqlx::SqlitePool;

/// ID로 실수 하나를 조회합니다.
pub async fn get_mistake(pool: &SqlitePool, id: i64) -> Result<Option<Mistake>, AppError> {
    let mistake = sqlx::query_as::<_, Mistake>(
        r#"
        SELECT id, user_input, mistake_type, correction, explanation, context,
               timestamp, review_count, mastered
        FROM mistakes
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(mistake)
}

/// 실수를 저장하고 저장된 행을 반환합니다.
///
/// `review_count`와 `mastered`는 테이블 기본값(0, false)으로 시작합니다.
pub async fn insert_mistake(pool: &SqlitePool, mistake: &NewMistake) -> Result<Mistake, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO mistakes (user_input, mistake_type, correction, explanation, context, timestamp)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&mistake.user_input)
    .bind(mistake.category.as_str()) // enum은 소문자 문자열("grammar" 등)로 저장
    .bind(&mistake.correction)
    .bind(&mistake.explanation)
    .bind(&mistake.context)
    .bind(now_timestamp())
    .execute(pool)
    .await?;

    // ok_or(): Option → Result. 방금 넣은 행이 없다면 내부 오류
    get_mistake(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created mistake".to_string()))
}

/// 분류별 실수 개수와 숙달 개수를 집계합니다.
///
/// 개수 내림차순, 같으면 분류 이름순입니다. 쓰기 없이 두 번 호출하면 같은 결과가 나옵니다.
pub async fn mistake_counts(pool: &SqlitePool) -> Result<Vec<MistakeStats>, AppError> {
    let stats = sqlx::query_as::<_, MistakeStats>(
        r#"
        SELECT mistake_type,
               COUNT(*) AS total,
               -- SQLite의 BOOLEAN은 0/1 정수이므로 CASE로 세어 합산
               COALESCE(SUM(CASE WHEN mastered THEN 1 ELSE 0 END), 0) AS mastered
        FROM mistakes
        GROUP BY mistake_type
        ORDER BY total DESC, mistake_type ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(stats)
}

/// 최근 실수를 최신순으로 조회합니다.
pub async fn recent_mistakes(pool: &SqlitePool, limit: i64) -> Result<Vec<Mistake>, AppError> {
    let mistakes = sqlx::query_as::<_, Mistake>(
        r#"
        SELECT id, user_input, mistake_type, correction, explanation, context,
               timestamp, review_count, mastered
        FROM mistakes
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(mistakes)
}

/// 실수 하나를 복습했다고 기록합니다.
///
/// `review_count`를 1 올리고, 올린 값이 `threshold` 이상이면 `mastered`를 true로 바꿉니다.
/// 한 번 숙달된 실수는 다시 false가 되지 않습니다.
///
/// ## 반환값
/// - `Ok(Some(Mistake))`: 갱신된 실수
/// - `Ok(None)`: 해당 ID의 실수가 없음
pub async fn record_review(
    pool: &SqlitePool,
    id: i64,
    threshold: i64,
) -> Result<Option<Mistake>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE mistakes
        SET review_count = review_count + 1,
            -- SET 안의 review_count는 갱신 전 값입니다
            mastered = CASE WHEN review_count + 1 >= ? THEN 1 ELSE mastered END
        WHERE id = ?
        "#,
    )
    .bind(threshold)
    .bind(id)
    .execute(pool)
    .await?;

    // rows_affected(): UPDATE가 바꾼 행 수. 0이면 해당 id가 없다는 뜻
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_mistake(pool, id).await
}
