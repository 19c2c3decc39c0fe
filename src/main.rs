//! # Chatalyst 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성과 스키마 준비
//! 4. 감정 맞춤 문구 풀 로딩
//! 5. 완성 API 클라이언트 구성
//! 6. API 라우터 설정
//! 7. HTTP 서버 시작

// ── 모듈 선언 ──
mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;

use anyhow::Result;
use axum::Router;
use config::Config;
use routes::AppState;
use services::{
    completion::{CompletionClient, ReqwestTransport},
    phrases::PhrasePools,
};
use std::{path::Path, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 chatalyst, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatalyst=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    // OPENROUTER_API_KEY가 없으면 여기서 바로 종료합니다.
    let config = Config::from_env()?;
    tracing::info!("Starting Chatalyst server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 + 스키마 준비 ──
    let pool = db::connect(&config.database_url).await?;
    // RESET_DATABASE=true면 init_schema가 경고 로그를 남기고 테이블을 비웁니다
    db::init_schema(&pool, config.reset_database).await?;

    // ── 5단계: 문구 풀 로딩 ──
    let phrases = match &config.phrases_path {
        Some(path) => {
            tracing::info!("Loading phrase pools from {}", path);
            PhrasePools::load(path).await?
        }
        None => PhrasePools::default(),
    };

    // ── 6단계: 완성 API 클라이언트 ──
    let transport = ReqwestTransport::new(
        config.completion_url.clone(),
        config.api_key.clone(),
        Duration::from_secs(config.completion_timeout_secs),
    )?;
    let client = CompletionClient::new(Arc::new(transport), config.completion_model.clone(), phrases)
        .with_retry(
            config.completion_max_attempts,
            Duration::from_millis(config.completion_retry_delay_ms),
        );
    tracing::info!(
        model = %config.completion_model,
        max_attempts = config.completion_max_attempts,
        "Completion client ready"
    );

    // ── 7단계: 애플리케이션 상태 + 라우터 ──
    let state = AppState::new(pool, client, config.mastery_threshold);
    let api_routes = routes::api_router(state);

    // 개발 환경 기준으로 모든 출처를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 정적 채팅 화면이 있으면 같은 서버에서 서빙합니다.
    let static_dir = Path::new(&config.static_dir);
    let app = if static_dir.exists() {
        tracing::info!("Serving static files from {}", config.static_dir);
        Router::new()
            .nest("/api/v1", api_routes)
            .fallback_service(ServeDir::new(static_dir))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    } else {
        tracing::warn!("Static directory {} not found, serving API only", config.static_dir);
        Router::new()
            .nest("/api/v1", api_routes)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    };

    // ── 8단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
