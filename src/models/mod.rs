//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `chat`: 대화 턴과 대화 기록 메시지
//! - `insights`: 학습 통계 리포트
//! - `mistake`: 실수 분류와 실수 기록
//! - `session`: 연습 세션 설정과 세션 요약
//!
//! `pub use X::*;`로 재공개하므로 `crate::models::ChatTurn`처럼 짧게 접근할 수 있습니다.

pub mod chat;
pub mod insights;
pub mod mistake;
pub mod session;

pub use chat::*;
pub use insights::*;
pub use mistake::*;
pub use session::*;
