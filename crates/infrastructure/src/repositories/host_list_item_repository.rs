use async_trait::async_trait;
use ferrous_hosts_application::ports::HostListItemRepository;
use ferrous_hosts_domain::{DomainError, HostListItem, ListType};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

const COLS_PER_ROW: usize = 5;
const ROWS_PER_CHUNK: usize = 999 / COLS_PER_ROW;

type HostListItemRow = (i64, String, String, Option<String>, i64);

fn build_multi_insert_sql(n: usize) -> String {
    debug_assert!(n > 0 && n <= ROWS_PER_CHUNK);
    const HEADER: &str =
        "INSERT INTO hosts_lists (source_id, host, type, redirection, enabled) VALUES ";
    const PLACEHOLDER: &str = "(?,?,?,?,?)";
    let mut sql = String::with_capacity(HEADER.len() + n * (PLACEHOLDER.len() + 1));
    sql.push_str(HEADER);
    for i in 0..n {
        if i > 0 {
            sql.push(',');
        }
        sql.push_str(PLACEHOLDER);
    }
    sql
}

pub struct SqliteHostListItemRepository {
    pool: SqlitePool,
}

impl SqliteHostListItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: HostListItemRow) -> Result<HostListItem, DomainError> {
        let (source_id, host, list_type, redirection, enabled) = row;
        let list_type = ListType::from_str(&list_type).ok_or_else(|| {
            DomainError::DatabaseError(format!("Unknown host list type '{}'", list_type))
        })?;

        Ok(HostListItem {
            source_id,
            host: Arc::from(host.as_str()),
            list_type,
            redirection: redirection.map(|s| Arc::from(s.as_str())),
            enabled: enabled != 0,
        })
    }
}

#[async_trait]
impl HostListItemRepository for SqliteHostListItemRepository {
    #[instrument(skip(self))]
    async fn clear_source_hosts(&self, source_id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM hosts_lists WHERE source_id = ?")
            .bind(source_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, source_id, "Failed to clear hosts of source");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected())
    }

    /// One transaction per batch; a failing chunk rolls back the whole batch.
    async fn insert_batch(&self, batch: &[HostListItem]) -> Result<(), DomainError> {
        if batch.is_empty() {
            return Ok(());
        }

        let start = std::time::Instant::now();

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!(error = %e, count = batch.len(), "Failed to begin transaction for host batch");
            DomainError::DatabaseError(e.to_string())
        })?;

        for chunk in batch.chunks(ROWS_PER_CHUNK) {
            let sql = build_multi_insert_sql(chunk.len());
            let mut q = sqlx::query(&sql);
            for item in chunk {
                q = q
                    .bind(item.source_id)
                    .bind(item.host.as_ref())
                    .bind(item.list_type.to_str())
                    .bind(item.redirection.as_deref())
                    .bind(if item.enabled { 1i64 } else { 0i64 });
            }
            q.execute(&mut *tx).await.map_err(|e| {
                warn!(error = %e, chunk_size = chunk.len(), "Failed to insert host list chunk");
                DomainError::DatabaseError(e.to_string())
            })?;
        }

        tx.commit().await.map_err(|e| {
            error!(error = %e, count = batch.len(), "Failed to commit host batch transaction");
            DomainError::DatabaseError(e.to_string())
        })?;

        debug!(
            count = batch.len(),
            duration_ms = start.elapsed().as_millis(),
            "Host batch inserted"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_by_source(&self, source_id: i64) -> Result<Vec<HostListItem>, DomainError> {
        let rows = sqlx::query_as::<_, HostListItemRow>(
            "SELECT source_id, host, type, redirection, enabled
             FROM hosts_lists WHERE source_id = ? ORDER BY host ASC",
        )
        .bind(source_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, source_id, "Failed to query hosts of source");
            DomainError::DatabaseError(e.to_string())
        })?;

        rows.into_iter().map(Self::row_to_item).collect()
    }

    #[instrument(skip(self))]
    async fn count_by_source(&self, source_id: i64) -> Result<u64, DomainError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM hosts_lists WHERE source_id = ?")
                .bind(source_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    error!(error = %e, source_id, "Failed to count hosts of source");
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(count as u64)
    }
}
