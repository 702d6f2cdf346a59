//! # 에러 처리 모듈
//!
//! 핸들러에서 발생할 수 있는 에러 종류를 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 검증/감지 서비스/저장소 에러를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 `{ "error": "..." }` 형태의 HTTP 응답으로 자동 변환
//!
//! 어떤 실패도 처리되지 않은 채 요청을 끊지 않습니다. 모든 에러는 경계에서
//! 구조화된 JSON 본문으로 바뀌고, 자동 재시도는 하지 않습니다.

use crate::models::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// 필수 입력이 없을 때 돌려주는 메시지
pub const MISSING_TEXT: &str = "Missing text";

/// 핸들러에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러가 `Result<T, AppError>`를 반환하면,
/// Axum이 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 필수 입력 누락 (HTTP 400): 클라이언트 잘못, 하위 호출 없음
    #[error("{0}")]
    Validation(String),

    /// 외부 언어 감지 서비스 실패 (HTTP 500)
    /// 클라이언트가 어떤 요청이 실패했는지 대조할 수 있도록 제출된 텍스트를 함께 돌려줍니다.
    #[error("{message}")]
    DetectionService { message: String, text: String },

    /// 저장소 읽기/쓰기 실패 (HTTP 500)
    /// #[from]: sqlx::Error에 `?`를 쓰면 자동으로 AppError::Persistence로 변환됩니다.
    #[error("{0}")]
    Persistence(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 500 에러도 원인 메시지를 그대로 본문에 담습니다.
    /// 감지 서비스 에러만 `text` 필드를 추가로 포함합니다.
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    text: None,
                },
            ),
            AppError::DetectionService { message, text } => {
                tracing::error!("Language detection failed: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: message,
                        text: Some(text),
                    },
                )
            }
            AppError::Persistence(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: e.to_string(),
                        text: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_parts(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = serde_json::from_slice(&bytes).expect("json body");
        (status, body)
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let (status, body) = response_parts(AppError::Validation(MISSING_TEXT.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Missing text" }));
    }

    #[tokio::test]
    async fn test_detection_service_error_echoes_text() {
        let error = AppError::DetectionService {
            message: "quota exceeded".to_string(),
            text: "hola".to_string(),
        };
        let (status, body) = response_parts(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({ "error": "quota exceeded", "text": "hola" })
        );
    }

    #[tokio::test]
    async fn test_persistence_error_carries_message() {
        let (status, body) = response_parts(AppError::Persistence(sqlx::Error::PoolClosed)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], sqlx::Error::PoolClosed.to_string());
        assert!(body.get("text").is_none());
    }
}
