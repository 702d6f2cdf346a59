//! # 감지 결과 집계 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | {base}/detect-language-results | `detection_results` | 언어별 감지 횟수 상위 5개 |
//!
//! 응답 예: `[{ "code": "en", "count": 10 }, { "code": "fr", "count": 5 }]`
//!
//! 매 요청마다 `detections` 테이블 전체를 스캔합니다. 인덱스나 캐시된 집계는 없습니다.

use crate::{
    db,
    error::AppError,
    models::AggregateCount,
    routes::AppState,
    services::{rank_language_counts, TOP_LANGUAGES},
};
use axum::{extract::State, Json};

/// `GET /detect-language-results`
///
/// 레코드가 없으면 빈 배열을 200으로 돌려줍니다.
/// 스캔 실패는 `AppError::Persistence` → 500 `{ "error": ... }`.
pub async fn detection_results(
    State(state): State<AppState>,
) -> Result<Json<Vec<AggregateCount>>, AppError> {
    let codes = db::scan_language_codes(&state.pool).await?;
    let scanned = codes.len();

    let ranked = rank_language_counts(codes, TOP_LANGUAGES);
    tracing::debug!("Aggregated {} detection(s) into {} entries", scanned, ranked.len());

    Ok(Json(ranked))
}
