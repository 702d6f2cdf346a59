//! # 언어 감지 서비스
//!
//! 실제 언어 판별은 이 코드베이스 밖의 감지 기능에 위임합니다.
//! 핸들러는 `LanguageDetector::identify(text) -> 코드 | 없음` 하나만 사용합니다.
//!
//! ## 백엔드
//! - `Remote`: 관리형 언어 감지 HTTP API (`POST {"q": text}`, Bearer 인증)
//! - `Local`: `whatlang` 크레이트를 사용한 오프라인 감지
//!
//! 두 백엔드 모두 후보 언어를 신뢰도 높은 순으로 돌려주며,
//! 실패 시 재시도하지 않습니다.

use crate::config::DetectorBackend;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// 감지 기능 호출 실패
#[derive(Debug, Error)]
pub enum DetectionError {
    /// 요청 전송 실패 (연결 불가, 타임아웃 등)
    #[error("Failed to send request to language detection API: {0}")]
    Request(#[from] reqwest::Error),

    /// API가 2xx가 아닌 상태 코드를 돌려줌 (쿼터 초과, 잘못된 입력 등)
    #[error("Language detection API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// 응답 본문을 해석할 수 없음
    #[error("Failed to parse language detection response: {0}")]
    Parse(String),
}

/// 감지된 후보 언어 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedLanguage {
    /// 언어 코드 (예: "fr", "zh-TW")
    pub language: String,
    pub is_reliable: bool,
    pub confidence: f64,
}

/// 원격 API 요청 본문
#[derive(Debug, Serialize)]
struct DetectApiRequest<'a> {
    q: &'a str,
}

/// 원격 API 응답: `{ "data": { "detections": [...] } }`
#[derive(Debug, Deserialize)]
struct DetectApiResponse {
    data: DetectApiData,
}

#[derive(Debug, Deserialize)]
struct DetectApiData {
    #[serde(default)]
    detections: Vec<DetectedLanguage>,
}

/// 외부 감지 기능에 대한 좁은 인터페이스
///
/// 프로세스 시작 시 한 번 만들어 `AppState`로 핸들러에 주입합니다.
/// 두 variant 모두 `Clone`이 저렴합니다 (reqwest::Client는 내부적으로 Arc).
#[derive(Debug, Clone)]
pub enum LanguageDetector {
    Remote(RemoteDetector),
    Local(LocalDetector),
}

impl LanguageDetector {
    /// 설정에서 백엔드를 골라 감지기를 만듭니다.
    pub fn from_backend(backend: &DetectorBackend) -> Result<Self, DetectionError> {
        match backend {
            DetectorBackend::Remote {
                api_url,
                api_key,
                timeout,
            } => Ok(Self::Remote(RemoteDetector::new(api_url, api_key, *timeout)?)),
            DetectorBackend::Local => Ok(Self::Local(LocalDetector)),
        }
    }

    /// 후보 언어 목록을 신뢰도 높은 순으로 돌려줍니다. 후보가 없으면 빈 Vec.
    pub async fn detect(&self, text: &str) -> Result<Vec<DetectedLanguage>, DetectionError> {
        match self {
            Self::Remote(detector) => detector.detect(text).await,
            Self::Local(detector) => Ok(detector.detect(text)),
        }
    }

    /// 가장 유력한 언어 코드 하나를 돌려줍니다.
    ///
    /// 코드가 빈 후보는 건너뜁니다. 쓸 만한 후보가 없으면 `Ok(None)`.
    pub async fn identify(&self, text: &str) -> Result<Option<String>, DetectionError> {
        let candidates = self.detect(text).await?;
        Ok(candidates
            .into_iter()
            .map(|candidate| candidate.language)
            .find(|code| !code.trim().is_empty()))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Remote(_) => "remote",
            Self::Local(_) => "local",
        }
    }
}

/// 관리형 언어 감지 HTTP API 클라이언트
#[derive(Debug, Clone)]
pub struct RemoteDetector {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl RemoteDetector {
    pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> Result<Self, DetectionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn detect(&self, text: &str) -> Result<Vec<DetectedLanguage>, DetectionError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&DetectApiRequest { q: text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(DetectionError::Api { status, body });
        }

        let body = response.text().await?;
        let parsed: DetectApiResponse =
            serde_json::from_str(&body).map_err(|e| DetectionError::Parse(e.to_string()))?;

        tracing::debug!(
            "Language detection API returned {} candidate(s)",
            parsed.data.detections.len()
        );
        Ok(parsed.data.detections)
    }
}

/// whatlang 기반 오프라인 감지기
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDetector;

impl LocalDetector {
    fn detect(&self, text: &str) -> Vec<DetectedLanguage> {
        match whatlang::detect(text) {
            Some(info) => vec![DetectedLanguage {
                language: iso_639_1(info.lang()).to_string(),
                is_reliable: info.is_reliable(),
                confidence: info.confidence(),
            }],
            None => Vec::new(),
        }
    }
}

/// whatlang의 ISO 639-3 코드를 두 글자 코드로 바꿉니다.
/// 두 글자 코드가 없는 언어는 세 글자 코드를 그대로 씁니다.
fn iso_639_1(lang: whatlang::Lang) -> &'static str {
    use whatlang::Lang;

    match lang {
        Lang::Afr => "af",
        Lang::Amh => "am",
        Lang::Ara => "ar",
        Lang::Aze => "az",
        Lang::Bel => "be",
        Lang::Ben => "bn",
        Lang::Bul => "bg",
        Lang::Cat => "ca",
        Lang::Ces => "cs",
        Lang::Cmn => "zh",
        Lang::Dan => "da",
        Lang::Deu => "de",
        Lang::Ell => "el",
        Lang::Eng => "en",
        Lang::Epo => "eo",
        Lang::Est => "et",
        Lang::Fin => "fi",
        Lang::Fra => "fr",
        Lang::Guj => "gu",
        Lang::Heb => "he",
        Lang::Hin => "hi",
        Lang::Hrv => "hr",
        Lang::Hun => "hu",
        Lang::Hye => "hy",
        Lang::Ind => "id",
        Lang::Ita => "it",
        Lang::Jav => "jv",
        Lang::Jpn => "ja",
        Lang::Kan => "kn",
        Lang::Kat => "ka",
        Lang::Khm => "km",
        Lang::Kor => "ko",
        Lang::Lat => "la",
        Lang::Lav => "lv",
        Lang::Lit => "lt",
        Lang::Mal => "ml",
        Lang::Mar => "mr",
        Lang::Mkd => "mk",
        Lang::Mya => "my",
        Lang::Nep => "ne",
        Lang::Nld => "nl",
        Lang::Nob => "no",
        Lang::Ori => "or",
        Lang::Pan => "pa",
        Lang::Pes => "fa",
        Lang::Pol => "pl",
        Lang::Por => "pt",
        Lang::Ron => "ro",
        Lang::Rus => "ru",
        Lang::Sin => "si",
        Lang::Slk => "sk",
        Lang::Slv => "sl",
        Lang::Sna => "sn",
        Lang::Spa => "es",
        Lang::Srp => "sr",
        Lang::Swe => "sv",
        Lang::Tam => "ta",
        Lang::Tel => "te",
        Lang::Tgl => "tl",
        Lang::Tha => "th",
        Lang::Tuk => "tk",
        Lang::Tur => "tr",
        Lang::Ukr => "uk",
        Lang::Urd => "ur",
        Lang::Uzb => "uz",
        Lang::Vie => "vi",
        Lang::Yid => "yi",
        Lang::Zul => "zu",
        other => other.code(),
    }
}
