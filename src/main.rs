//! # 언어 감지 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성 + 마이그레이션
//! 4. 언어 감지기 생성 (원격 API 또는 로컬)
//! 5. API 라우터 설정
//! 6. HTTP 서버 시작

use anyhow::Result;
use language_detector::{
    config::Config,
    db,
    routes::{self, AppState},
    services::LanguageDetector,
};
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 이 크레이트와 tower_http, axum을 debug 레벨로 출력합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "language_detector=debug,tower_http=debug,axum=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting language detector on {}:{}", config.host, config.port);

    // ── 4단계: 연결 풀 생성 + 마이그레이션 ──
    // 풀과 감지기는 프로세스당 한 번만 만들고 모든 요청이 재사용합니다.
    let pool = db::connect(&config.database_url, config.database_max_connections).await?;

    // ── 5단계: 언어 감지기 생성 ──
    let detector = LanguageDetector::from_backend(&config.detector)?;
    tracing::info!("Using {} language detection backend", detector.backend_name());

    match config.retention_days {
        Some(days) => tracing::info!("Detection records are kept for {} day(s)", days),
        None => tracing::info!("Detection records are kept indefinitely"),
    }

    let state = AppState {
        pool,
        detector,
        retention: config.retention(),
    };

    // ── 6단계: API 라우터 설정 ──
    let api_routes = routes::router(state, &config.api_base_path);

    // CORS: 모든 출처, 메서드, 헤더를 허용합니다 (preflight 포함)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── 7단계: 프론트엔드 정적 파일 서빙 ──
    // 빌드된 프론트엔드가 있으면 같은 서버에서 서빙합니다.
    // SPA이므로 찾을 수 없는 경로는 index.html로 돌려보냅니다.
    let static_dir = Path::new(&config.static_dir);
    let app = if static_dir.exists() {
        tracing::info!("Serving frontend static files from {}", config.static_dir);

        let serve_dir = ServeDir::new(static_dir)
            .not_found_service(ServeFile::new(static_dir.join("index.html")));

        api_routes
            .fallback_service(serve_dir)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    } else {
        tracing::warn!(
            "Frontend directory {} not found, serving API only",
            config.static_dir
        );

        api_routes.layer(cors).layer(TraceLayer::new_for_http())
    };

    // ── 8단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "Server listening on {} (API under '{}')",
        addr,
        if config.api_base_path.is_empty() { "/" } else { config.api_base_path.as_str() }
    );

    axum::serve(listener, app).await?;

    Ok(())
}
