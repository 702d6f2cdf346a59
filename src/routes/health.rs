//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET {base}/health` → `{ "status": "ok" }`

use axum::Json;
use serde_json::{json, Value};

/// `GET /health` — 서버 상태를 확인합니다.
///
/// DB나 감지 API를 호출하지 않으므로 실패하지 않습니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}
