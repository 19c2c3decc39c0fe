//! # 비즈니스 로직 모듈
//!
//! - `classifier`: 응답 텍스트 → 실수 분류
//! - `completion`: 외부 채팅 완성 API 클라이언트 (재시도 포함)
//! - `insights`: 학습 통계 집계와 렌더링
//! - `orchestrator`: 대화 턴 하나의 처리 파이프라인
//! - `phrases`: 감정 점수별 격려/축하 문구
//! - `sentiment`: 감정 점수 계산
//! - `session`: 연습 세션 설정 검증과 장면 목록

pub mod classifier;
pub mod completion;
pub mod insights;
pub mod orchestrator;
pub mod phrases;
pub mod sentiment;
pub mod session;
