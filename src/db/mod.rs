//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출합니다.
//!
//! - `connect()`: 연결 풀 생성 + 내장 마이그레이션 실행
//! - `detections`: 감지 레코드 저장/스캔/정리 쿼리

pub mod detections;

pub use detections::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;
use std::str::FromStr;

/// SQLite 연결 풀을 만들고 마이그레이션을 실행합니다.
///
/// - 파일 DB는 상위 디렉토리와 파일이 없으면 새로 만듭니다.
/// - `sqlite::memory:`는 연결마다 별도의 DB가 생기므로, 연결 하나를 만료 없이
///   유지합니다. (테스트용)
///
/// `sqlx::migrate!`는 컴파일 타임에 ./migrations 폴더의 SQL 파일을 포함시킵니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    if let Some(dir) = database_dir(database_url) {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            tokio::fs::create_dir_all(&dir).await?;
            tracing::info!("Created database directory: {}", dir.display());
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?
    };

    tracing::debug!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// 파일 DB URL에서 DB 파일이 놓일 디렉토리를 꺼냅니다.
///
/// 예: `sqlite:data/language-detector.db?mode=rwc` → `data`
fn database_dir(database_url: &str) -> Option<PathBuf> {
    if is_in_memory(database_url) {
        return None;
    }

    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    // 쿼리 문자열(?mode=rwc 등)은 경로가 아닙니다
    let path = path.split('?').next().unwrap_or(path);

    PathBuf::from(path).parent().map(PathBuf::from)
}
