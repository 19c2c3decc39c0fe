//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러와 서비스(services/)가 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `schema`: 테이블 생성 (선택적으로 파괴적 재생성)
//! - `chats`: 대화 턴 INSERT, 최근 턴 / 장면별 집계 조회
//! - `mistakes`: 실수 INSERT, 분류별 집계, 복습 기록
//! - `summaries`: 세션 요약 집계와 저장
//!
//! 모든 INSERT는 한 문장씩 자동 커밋됩니다. 여러 테이블을 묶는 트랜잭션은 없습니다.

pub mod chats;
pub mod mistakes;
pub mod schema;
pub mod summaries;

pub use chats::*;
pub use mistakes::*;
pub use schema::*;
pub use summaries::*;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

/// SQLite 연결 풀을 엽니다.
///
/// 풀에서 연결을 빌려 쓰고 반환하므로, 각 작업은 호출 범위 안에서만 연결을 잡고 있습니다.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5) // 최대 5개의 동시 연결을 유지
        .connect(database_url)
        .await
}

/// 행에 기록하는 타임스탬프 (로컬 시간, 초 단위)
///
/// 이 형식은 문자열 비교가 곧 시간 비교가 되므로 `timestamp >= ?` 조건에 그대로 쓸 수 있습니다.
pub fn now_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 테스트용 인메모리 데이터베이스
///
/// `sqlite::memory:`는 연결마다 별개의 DB가 되므로 연결을 1개로 고정하고,
/// 유휴 연결이 닫혀 데이터가 사라지지 않도록 타임아웃을 끕니다.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    init_schema(&pool, false).await.expect("schema");
    pool
}
