//! # 언어 감지 모델 정의
//!
//! 감지 요청/응답 본문과, DB에 저장되는 감지 레코드를 정의합니다.
//!
//! ## 구조체 역할
//! - `DetectionRecord`: `detections` 테이블의 한 행 (저장 후 변경되지 않음)
//! - `DetectRequest`: `POST /detect-language`의 요청 본문
//! - `DetectResponse`: 감지 성공 시 응답 본문
//! - `ErrorResponse`: 모든 에러 응답의 본문 (`{ "error": ..., "text"?: ... }`)
//!
//! 응답 구조체는 서버와 CLI 클라이언트가 함께 사용하므로
//! Serialize와 Deserialize를 모두 derive합니다.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// 감지 레코드: DB의 `detections` 테이블 한 행(row)에 대응합니다.
///
/// 레코드는 추가만 되고 수정되지 않습니다(append-only).
/// `sqlx::FromRow`는 컬럼 이름(`language_code`)과 필드 이름을 그대로 매핑하고,
/// `#[serde(rename_all = "camelCase")]`는 JSON에서 `languageCode`로 보이게 합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DetectionRecord {
    /// 레코드 고유 식별자 (UUIDv7 문자열)
    pub id: String,
    /// 앞뒤 공백을 제거한 입력 텍스트
    pub text: String,
    /// 감지된 언어 코드 (예: "en", "zh-TW"). 컬럼은 NULL을 허용합니다.
    pub language_code: Option<String>,
    /// 생성 시각 (UTC, 밀리초 정밀도의 RFC 3339)
    pub timestamp: String,
}

impl DetectionRecord {
    /// 감지 결과로 새 레코드를 만듭니다.
    ///
    /// ID와 시각은 여기서 한 번 정해지고 이후 바뀌지 않습니다.
    /// 텍스트는 앞뒤 공백을 제거해서 저장합니다.
    pub fn new(text: &str, language_code: &str) -> Self {
        Self {
            // UUIDv7: 타임스탬프 기반이라 생성 순서대로 정렬됩니다
            id: uuid::Uuid::now_v7().to_string(),
            text: text.trim().to_string(),
            language_code: Some(language_code.to_string()),
            // 예: "2026-10-19T12:00:00.000Z"
            // 모든 레코드가 같은 형식이므로 문자열 비교가 곧 시간 비교입니다.
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// 감지 요청: `POST /detect-language`의 요청 본문입니다.
///
/// `text`가 Option인 이유: 필드가 빠진 요청도 파싱에 성공시킨 뒤,
/// 핸들러에서 "Missing text" 검증 에러로 일관되게 처리하기 위해서입니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectRequest {
    pub text: Option<String>,
}

/// 감지 응답: 감지 성공 시 200 응답 본문입니다.
///
/// 감지 서비스가 후보 언어를 하나도 돌려주지 않으면 `languageCode` 필드는
/// 응답에서 아예 빠집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    /// 제출된 텍스트 (클라이언트 측 대조용)
    pub text: String,
}

/// 에러 응답 본문: 400/500 응답에 공통으로 사용됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// 감지 서비스 실패 시에만 제출된 텍스트를 돌려줍니다
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_trims_text_and_sets_metadata() {
        let record = DetectionRecord::new("  Bonjour le monde \n", "fr");

        assert_eq!(record.text, "Bonjour le monde");
        assert_eq!(record.language_code.as_deref(), Some("fr"));
        assert!(uuid::Uuid::parse_str(&record.id).is_ok());
        assert!(chrono::DateTime::parse_from_rfc3339(&record.timestamp).is_ok());
        assert!(record.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_new_records_get_distinct_ids() {
        let a = DetectionRecord::new("hello", "en");
        let b = DetectionRecord::new("hello", "en");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_detect_response_omits_missing_language_code() {
        let response = DetectResponse {
            language_code: None,
            text: "???".to_string(),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json, serde_json::json!({ "text": "???" }));
    }

    #[test]
    fn test_detect_response_uses_camel_case() {
        let response = DetectResponse {
            language_code: Some("zh-TW".to_string()),
            text: "你好".to_string(),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["languageCode"], "zh-TW");
    }

    #[test]
    fn test_detect_request_tolerates_missing_text() {
        let request: DetectRequest = serde_json::from_str("{}").expect("deserialize");
        assert!(request.text.is_none());
    }
}
