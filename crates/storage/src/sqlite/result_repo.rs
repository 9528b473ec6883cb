use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{encode_responses, map_result_row};
use crate::repository::{ResultRecord, ResultSink, StorageError};

/// A persisted result together with its row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResult {
    pub id: i64,
    pub record: ResultRecord,
}

#[async_trait::async_trait]
impl ResultSink for SqliteRepository {
    async fn append_result(&self, record: &ResultRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO assessment_results (
                    recorded_at, dominant_style,
                    driver_pct, analytical_pct, amiable_pct, expressive_pct,
                    responses
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(&record.timestamp)
        .bind(&record.dominant_style)
        .bind(&record.scores.driver)
        .bind(&record.scores.analytical)
        .bind(&record.scores.amiable)
        .bind(&record.scores.expressive)
        .bind(encode_responses(&record.responses))
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}

impl SqliteRepository {
    /// Most recent results first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails or a row cannot be decoded.
    pub async fn list_results(&self, limit: u32) -> Result<Vec<StoredResult>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT
                    id, recorded_at, dominant_style,
                    driver_pct, analytical_pct, amiable_pct, expressive_pct,
                    responses
                FROM assessment_results
                ORDER BY id DESC
                LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row
                .try_get("id")
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            out.push(StoredResult {
                id,
                record: map_result_row(&row)?,
            });
        }
        Ok(out)
    }
}
