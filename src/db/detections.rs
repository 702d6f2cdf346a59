//! # 감지 레코드 데이터베이스 쿼리 모듈
//!
//! `detections` 테이블에 대한 쿼리 함수들입니다.
//! 모든 함수는 `SqlitePool` 참조를 받아 비동기로 실행되고, 에러는 `AppError`로 반환합니다.
//!
//! ## 테이블 구조
//! - `detections`: 감지 레코드 (id, text, language_code, timestamp)
//!
//! 레코드는 추가만 됩니다. 삭제 경로는 보존 기간이 설정된 경우의
//! `prune_detections_before` 하나뿐입니다.

use crate::error::AppError;
use crate::models::DetectionRecord;
use sqlx::SqlitePool;

/// 감지 레코드를 조건 없이 저장합니다.
///
/// 같은 ID로 두 번 저장하면 PRIMARY KEY 충돌로 에러가 납니다.
/// ID는 `DetectionRecord::new`에서 UUIDv7로 생성되므로 실제로는 충돌하지 않습니다.
pub async fn insert_detection(pool: &SqlitePool, record: &DetectionRecord) -> Result<(), AppError> {
    sqlx::query("INSERT INTO detections (id, text, language_code, timestamp) VALUES (?, ?, ?, ?)")
        .bind(&record.id)
        .bind(&record.text)
        .bind(&record.language_code) // None이면 SQL NULL
        .bind(&record.timestamp)
        .execute(pool)
        .await?;

    Ok(())
}

/// ID로 감지 레코드 하나를 조회합니다.
pub async fn get_detection(pool: &SqlitePool, id: &str) -> Result<Option<DetectionRecord>, AppError> {
    let record = sqlx::query_as::<_, DetectionRecord>(
        "SELECT id, text, language_code, timestamp FROM detections WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// 모든 레코드의 언어 코드를 읽어옵니다 (전체 테이블 스캔).
///
/// 인덱스도 정렬도 없는 스캔이므로 반환 순서는 정해져 있지 않습니다.
/// 집계에는 언어 코드만 필요하므로 `text`는 읽지 않습니다.
///
/// `query_scalar`: 결과의 첫 번째 컬럼만 값으로 꺼냅니다.
/// NULL 컬럼은 `None`으로 들어옵니다.
pub async fn scan_language_codes(pool: &SqlitePool) -> Result<Vec<Option<String>>, AppError> {
    let codes = sqlx::query_scalar::<_, Option<String>>("SELECT language_code FROM detections")
        .fetch_all(pool)
        .await?;

    Ok(codes)
}

/// 저장된 레코드 수를 반환합니다.
pub async fn count_detections(pool: &SqlitePool) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM detections")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// `cutoff`보다 오래된 레코드를 삭제하고, 삭제된 행 수를 반환합니다.
///
/// `cutoff`는 레코드와 같은 형식(밀리초 RFC 3339, `Z` 접미사)이어야 합니다.
/// 형식이 같으면 문자열 비교가 시간 비교와 일치합니다.
pub async fn prune_detections_before(pool: &SqlitePool, cutoff: &str) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM detections WHERE timestamp < ?")
        .bind(cutoff)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn create_test_pool() -> SqlitePool {
        db::connect("sqlite::memory:", 1)
            .await
            .expect("Failed to create in-memory database")
    }

    fn record_at(code: Option<&str>, timestamp: &str) -> DetectionRecord {
        DetectionRecord {
            id: uuid::Uuid::now_v7().to_string(),
            text: "sample".to_string(),
            language_code: code.map(str::to_string),
            timestamp: timestamp.to_string(),
        }
    }

    // ==================== insert / get ====================

    #[tokio::test]
    async fn test_insert_and_get_detection() {
        let pool = create_test_pool().await;
        let record = DetectionRecord::new("Guten Tag", "de");

        insert_detection(&pool, &record).await.expect("Should insert");

        let stored = get_detection(&pool, &record.id)
            .await
            .expect("Should query")
            .expect("Record should exist");
        assert_eq!(stored, record);
    }

    #[tokio::test]
    async fn test_get_missing_detection_returns_none() {
        let pool = create_test_pool().await;
        let stored = get_detection(&pool, "does-not-exist").await.expect("Should query");
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let pool = create_test_pool().await;
        let record = DetectionRecord::new("hello", "en");

        insert_detection(&pool, &record).await.expect("first insert");
        let second = insert_detection(&pool, &record).await;

        assert!(matches!(second, Err(AppError::Persistence(_))));
        assert_eq!(count_detections(&pool).await.expect("count"), 1);
    }

    // ==================== scan / count ====================

    #[tokio::test]
    async fn test_scan_empty_table() {
        let pool = create_test_pool().await;
        let codes = scan_language_codes(&pool).await.expect("Should scan");
        assert!(codes.is_empty());
    }

    #[tokio::test]
    async fn test_scan_returns_every_code_including_null() {
        let pool = create_test_pool().await;
        for code in [Some("en"), Some("fr"), Some("en"), None] {
            insert_detection(&pool, &record_at(code, "2026-01-01T00:00:00.000Z"))
                .await
                .expect("insert");
        }

        let mut codes = scan_language_codes(&pool).await.expect("Should scan");
        codes.sort();

        assert_eq!(
            codes,
            vec![
                None,
                Some("en".to_string()),
                Some("en".to_string()),
                Some("fr".to_string())
            ]
        );
        assert_eq!(count_detections(&pool).await.expect("count"), 4);
    }

    #[tokio::test]
    async fn test_scan_after_pool_closed_fails() {
        let pool = create_test_pool().await;
        pool.close().await;

        let result = scan_language_codes(&pool).await;
        assert!(matches!(result, Err(AppError::Persistence(_))));
    }

    // ==================== prune ====================

    #[tokio::test]
    async fn test_prune_removes_only_older_records() {
        let pool = create_test_pool().await;
        let old = record_at(Some("en"), "2026-01-01T00:00:00.000Z");
        let new = record_at(Some("fr"), "2026-03-01T00:00:00.000Z");
        insert_detection(&pool, &old).await.expect("insert old");
        insert_detection(&pool, &new).await.expect("insert new");

        let removed = prune_detections_before(&pool, "2026-02-01T00:00:00.000Z")
            .await
            .expect("Should prune");

        assert_eq!(removed, 1);
        assert!(get_detection(&pool, &old.id).await.expect("query").is_none());
        assert!(get_detection(&pool, &new.id).await.expect("query").is_some());
    }

    // ==================== on-disk database ====================

    #[tokio::test]
    async fn test_records_persist_across_reconnect() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let url = format!(
            "sqlite:{}",
            temp_dir.path().join("nested/detections.db").display()
        );

        let record = DetectionRecord::new("Olá mundo", "pt");
        {
            let pool = db::connect(&url, 2).await.expect("open");
            insert_detection(&pool, &record).await.expect("insert");
            pool.close().await;
        }

        let pool = db::connect(&url, 2).await.expect("reopen");
        assert_eq!(count_detections(&pool).await.expect("count"), 1);
    }
}
