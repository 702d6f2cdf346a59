//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (기본값: `sqlite:data/language-detector.db`)
//! - `DATABASE_MAX_CONNECTIONS`: 연결 풀 크기 (기본값: 5)
//! - `HOST` / `PORT`: 서버 바인딩 주소 (기본값: `0.0.0.0` / 3000)
//! - `API_BASE_PATH`: API 경로 접두사 (기본값: `/prod`)
//! - `STATIC_DIR`: 빌드된 프론트엔드 디렉토리 (기본값: `frontend/dist`)
//! - `DETECTOR_BACKEND`: `remote` 또는 `local` (기본값: `remote`)
//! - `DETECTOR_API_URL` / `DETECTOR_API_KEY` / `DETECTOR_TIMEOUT_SECS`: 원격 감지 API 설정
//! - `RECORD_RETENTION_DAYS`: 감지 레코드 보존 기간 (없으면 영구 보존)
//!
//! 값이 있는데 해석할 수 없으면 기본값으로 넘어가지 않고 에러를 돌려줍니다.

use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DETECTOR_API_URL: &str = "https://ws.detectlanguage.com/0.2/detect";

/// 설정 로딩 실패
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// 언어 감지 백엔드 선택
#[derive(Debug, Clone, PartialEq)]
pub enum DetectorBackend {
    /// 관리형 언어 감지 HTTP API
    Remote {
        api_url: String,
        api_key: String,
        timeout: Duration,
    },
    /// 오프라인 감지 (whatlang)
    Local,
}

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 한 번 읽어온 후 변경하지 않습니다.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// 정규화된 경로 접두사. 빈 문자열이면 루트에 라우트를 둡니다.
    pub api_base_path: String,
    pub static_dir: String,
    pub detector: DetectorBackend,
    /// None이면 레코드를 지우지 않습니다
    pub retention_days: Option<u32>,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 → 값 조회 함수로부터 설정을 만듭니다.
    ///
    /// 테스트에서 프로세스 환경변수를 건드리지 않고 설정을 검증할 수 있게
    /// 조회 방법을 클로저로 받습니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let detector = match lookup("DETECTOR_BACKEND")
            .unwrap_or_else(|| "remote".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "remote" => DetectorBackend::Remote {
                api_url: lookup("DETECTOR_API_URL")
                    .unwrap_or_else(|| DEFAULT_DETECTOR_API_URL.to_string()),
                api_key: lookup("DETECTOR_API_KEY")
                    .filter(|key| !key.trim().is_empty())
                    .ok_or(ConfigError::Missing("DETECTOR_API_KEY"))?,
                timeout: Duration::from_secs(parse_or(&lookup, "DETECTOR_TIMEOUT_SECS", 10)?),
            },
            "local" => DetectorBackend::Local,
            other => {
                return Err(ConfigError::Invalid {
                    key: "DETECTOR_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let retention_days = match lookup("RECORD_RETENTION_DAYS") {
            Some(value) => {
                let days: u32 = parse_value("RECORD_RETENTION_DAYS", &value)?;
                // 기준 시각이 chrono 날짜 범위를 벗어나는 값은 받지 않습니다
                let cutoff = chrono::Utc::now()
                    .checked_sub_signed(chrono::Duration::days(i64::from(days)));
                if cutoff.is_none() {
                    return Err(ConfigError::Invalid {
                        key: "RECORD_RETENTION_DAYS",
                        value,
                    });
                }
                Some(days)
            }
            None => None,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite:data/language-detector.db".to_string()),
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            api_base_path: normalize_base_path(
                &lookup("API_BASE_PATH").unwrap_or_else(|| "/prod".to_string()),
            ),
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "frontend/dist".to_string()),
            detector,
            retention_days,
        })
    }

    /// 보존 기간을 chrono::Duration으로 돌려줍니다.
    pub fn retention(&self) -> Option<chrono::Duration> {
        self.retention_days
            .map(|days| chrono::Duration::days(i64::from(days)))
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => parse_value(key, &value),
        None => Ok(default),
    }
}

/// `prod`, `/prod/` → `/prod`, `/`나 빈 값 → `""`
pub fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
