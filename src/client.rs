//! # API 클라이언트
//!
//! 감지 엔드포인트에 텍스트를 제출하고 결과 엔드포인트에서 순위를 가져오는
//! 클라이언트 측 계약입니다. `langdetect` CLI가 사용합니다.
//!
//! ## 에러 표면화 규칙
//! - 응답이 왔지만 2xx가 아님 → 본문의 `error` 문자열, 없으면 `"Unknown error"`
//! - 응답 자체가 없음 (연결 실패, 타임아웃) → `"Network error"`
//!
//! ## 제출 상태
//! `Idle → Submitting → Succeeded | Failed`의 한 방향 전이뿐입니다.
//! 재시도는 없고, 사용자가 다시 제출해야 새 전이가 시작됩니다.
//! 제출이 성공하면 캐시된 결과 순위를 무효화합니다.

use crate::models::{AggregateCount, DetectRequest, DetectResponse, ErrorResponse};
use crate::routes::{DETECT_ROUTE, RESULTS_ROUTE};
use std::sync::Mutex;
use thiserror::Error;

pub const UNKNOWN_ERROR: &str = "Unknown error";
pub const NETWORK_ERROR: &str = "Network error";

#[derive(Debug, Error)]
pub enum ClientError {
    /// 서버가 에러 상태 코드로 응답함
    #[error("{message}")]
    Server {
        status: reqwest::StatusCode,
        message: String,
    },

    /// 응답을 받지 못함
    #[error("Network error")]
    Network(#[source] reqwest::Error),

    /// 2xx 응답이지만 본문을 해석할 수 없음
    #[error("Invalid response from server: {0}")]
    Decode(String),
}

/// 감지 서비스 HTTP 클라이언트
///
/// `base_url`은 API 기본 경로까지 포함합니다 (예: `http://localhost:3000/prod`).
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    report_cache: Mutex<Option<Vec<AggregateCount>>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            report_cache: Mutex::new(None),
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route)
    }

    /// 텍스트를 제출하여 언어를 감지합니다.
    ///
    /// 앞뒤 공백을 제거한 텍스트를 보냅니다. 성공하면 캐시된 순위를 비웁니다.
    pub async fn detect(&self, text: &str) -> Result<DetectResponse, ClientError> {
        let request = DetectRequest {
            text: Some(text.trim().to_string()),
        };

        let response = self
            .http
            .post(self.url(DETECT_ROUTE))
            .json(&request)
            .send()
            .await
            .map_err(ClientError::Network)?;

        let detected: DetectResponse = decode_response(response).await?;
        self.invalidate_results();
        Ok(detected)
    }

    /// 결과 순위를 돌려줍니다. 캐시가 있으면 요청하지 않습니다.
    pub async fn results(&self) -> Result<Vec<AggregateCount>, ClientError> {
        if let Some(cached) = self.cached_results() {
            return Ok(cached);
        }
        self.refresh_results().await
    }

    /// 캐시와 관계없이 결과 순위를 다시 가져와 캐시합니다.
    pub async fn refresh_results(&self) -> Result<Vec<AggregateCount>, ClientError> {
        let response = self
            .http
            .get(self.url(RESULTS_ROUTE))
            .send()
            .await
            .map_err(ClientError::Network)?;

        let ranked: Vec<AggregateCount> = decode_response(response).await?;
        *self.lock_cache() = Some(ranked.clone());
        Ok(ranked)
    }

    pub fn cached_results(&self) -> Option<Vec<AggregateCount>> {
        self.lock_cache().clone()
    }

    pub fn invalidate_results(&self) {
        *self.lock_cache() = None;
    }

    // 캐시는 단순한 값 교체뿐이므로 poison된 락도 그대로 이어서 씁니다
    fn lock_cache(&self) -> std::sync::MutexGuard<'_, Option<Vec<AggregateCount>>> {
        self.report_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn decode_response<T>(response: reqwest::Response) -> Result<T, ClientError>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await.map_err(ClientError::Network)?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        return Err(ClientError::Server { status, message });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// 제출 상태
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded(DetectResponse),
    Failed(String),
}

/// 텍스트 입력 하나와 제출 상태를 가진 감지 폼
#[derive(Debug)]
pub struct DetectForm {
    text: String,
    state: SubmissionState,
}

impl Default for DetectForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectForm {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            state: SubmissionState::Idle,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// 공백뿐인 입력이나 제출 중에는 제출할 수 없습니다
    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty() && self.state != SubmissionState::Submitting
    }

    /// 입력을 제출하고 최종 상태를 돌려줍니다.
    ///
    /// 제출할 수 없으면 아무 요청도 보내지 않고 현재 상태를 그대로 둡니다.
    /// 성공하면 입력을 비웁니다.
    pub async fn submit(&mut self, client: &ApiClient) -> &SubmissionState {
        if !self.can_submit() {
            return &self.state;
        }

        self.state = SubmissionState::Submitting;
        let text = self.text.clone();
        self.state = match client.detect(&text).await {
            Ok(response) => {
                self.text.clear();
                SubmissionState::Succeeded(response)
            }
            Err(e) => SubmissionState::Failed(e.to_string()),
        };
        &self.state
    }

    /// 사용자가 직접 초기화합니다
    pub fn reset(&mut self) {
        self.text.clear();
        self.state = SubmissionState::Idle;
    }
}
