//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 공유 상태, 라우터 조립을 담당합니다.
//!
//! 각 하위 모듈:
//! - `detect`: 텍스트 언어 감지 + 결과 저장
//! - `results`: 언어별 감지 횟수 상위 5개
//! - `health`: 서버 상태 확인 (헬스체크)

pub mod detect;
pub mod health;
pub mod results;

pub use detect::*;
pub use health::*;
pub use results::*;

use crate::services::LanguageDetector;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;

/// 감지 엔드포인트 경로 (기본 경로 아래)
pub const DETECT_ROUTE: &str = "detect-language";
/// 결과 엔드포인트 경로 (기본 경로 아래)
pub const RESULTS_ROUTE: &str = "detect-language-results";

/// 애플리케이션 공유 상태
///
/// 연결 풀과 감지기는 프로세스마다 한 번 만들어 모든 요청이 공유합니다.
/// 핸들러는 `State(state): State<AppState>`로 주입받으며, 그 외의 가변 상태는 없습니다.
/// SqlitePool과 reqwest::Client는 내부적으로 Arc이므로 clone해도 풀이 복제되지 않습니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub detector: LanguageDetector,
    /// 보존 기간. None이면 레코드를 지우지 않습니다.
    pub retention: Option<chrono::Duration>,
}

/// API 라우터를 조립합니다.
///
/// `base_path`는 `config::normalize_base_path`로 정규화된 값이어야 합니다.
/// 빈 문자열이면 루트에 바로 붙입니다 (axum 0.8은 "/"에 nest할 수 없음).
pub fn router(state: AppState, base_path: &str) -> Router {
    let api_routes = Router::new()
        // 텍스트 길이에 제한이 없으므로 기본 2MB 본문 제한을 끕니다
        .route(
            &format!("/{}", DETECT_ROUTE),
            post(detect_language).layer(DefaultBodyLimit::disable()),
        )
        .route(&format!("/{}", RESULTS_ROUTE), get(detection_results))
        .route("/health", get(health_check))
        .with_state(state);

    if base_path.is_empty() {
        Router::new().merge(api_routes)
    } else {
        Router::new().nest(base_path, api_routes)
    }
}
