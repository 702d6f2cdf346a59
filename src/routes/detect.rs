//! # 언어 감지 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | {base}/detect-language | `detect_language` | 텍스트 언어 감지 |
//!
//! ## 처리 흐름
//! 1. 입력 검증: `text`가 없거나 공백뿐이면 400, 하위 호출 없음
//! 2. 감지 기능 호출: 실패하면 500 + 제출된 텍스트, 재시도 없음
//! 3. 코드가 있으면 레코드 저장: 실패해도 감지 결과는 그대로 200으로 응답
//! 4. `{ "languageCode": ..., "text": ... }` 응답

use crate::{
    db,
    error::{AppError, MISSING_TEXT},
    models::*,
    routes::AppState,
};
use axum::{body::Bytes, extract::State, Json};
use chrono::{SecondsFormat, Utc};

/// `POST /detect-language` + `{ "text": "..." }`
///
/// `Json` 추출기는 `Content-Type: application/json` 헤더를 요구하므로,
/// 본문을 `Bytes`로 받아 헤더와 관계없이 직접 JSON으로 해석합니다.
/// 본문이 없거나 JSON이 아니거나 `text`가 문자열이 아니면 모두 "Missing text" 400으로 응답합니다.
pub async fn detect_language(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DetectResponse>, AppError> {
    let text = match serde_json::from_slice::<DetectRequest>(&body) {
        Ok(req) => req.text,
        Err(e) => {
            tracing::debug!("Rejected detect request body: {}", e);
            None
        }
    };

    // let-else: 검증 실패 시 감지 API도 DB도 건드리지 않고 바로 반환
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return Err(AppError::Validation(MISSING_TEXT.to_string()));
    };

    // 감지 기능에는 원문 그대로 보냅니다
    let language_code = match state.detector.identify(&text).await {
        Ok(code) => code,
        Err(e) => {
            return Err(AppError::DetectionService {
                message: e.to_string(),
                text,
            })
        }
    };

    match &language_code {
        Some(code) => {
            tracing::info!("Detected language '{}' ({} chars)", code, text.chars().count());
            record_detection(&state, &text, code).await;
        }
        None => tracing::info!("No language candidate returned, nothing stored"),
    }

    Ok(Json(DetectResponse {
        language_code,
        text,
    }))
}

/// 감지 결과를 저장합니다 (best-effort).
///
/// 저장 실패는 에러 로그만 남기고 삼킵니다. 이미 성공한 감지 결과를
/// 저장소 장애 때문에 실패로 바꾸지 않습니다.
/// 보존 기간이 설정되어 있으면 저장 직후 오래된 레코드를 정리합니다.
async fn record_detection(state: &AppState, text: &str, code: &str) {
    let record = DetectionRecord::new(text, code);

    if let Err(e) = db::insert_detection(&state.pool, &record).await {
        tracing::error!("Failed to store detection {}: {}", record.id, e);
        return;
    }

    let Some(retention) = state.retention else {
        return;
    };

    let Some(cutoff) = Utc::now().checked_sub_signed(retention) else {
        tracing::warn!("Retention period {} is out of range, skipping prune", retention);
        return;
    };
    let cutoff = cutoff.to_rfc3339_opts(SecondsFormat::Millis, true);
    match db::prune_detections_before(&state.pool, &cutoff).await {
        Ok(0) => {}
        Ok(removed) => tracing::info!("Pruned {} detection(s) older than {}", removed, cutoff),
        Err(e) => tracing::warn!("Failed to prune old detections: {}", e),
    }
}
