use async_trait::async_trait;
use ferrous_hosts_application::ports::HostsSourceRepository;
use ferrous_hosts_domain::{DomainError, HostsSource};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, instrument};

type HostsSourceRow = (i64, String, Option<String>, i64, i64, Option<String>);

pub struct SqliteHostsSourceRepository {
    pool: SqlitePool,
}

impl SqliteHostsSourceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_source(row: HostsSourceRow) -> HostsSource {
        let (id, name, url, redirect_enabled, enabled, created_at) = row;
        HostsSource {
            id: Some(id),
            name: Arc::from(name.as_str()),
            url: url.map(|s| Arc::from(s.as_str())),
            redirect_enabled: redirect_enabled != 0,
            enabled: enabled != 0,
            created_at,
        }
    }
}

#[async_trait]
impl HostsSourceRepository for SqliteHostsSourceRepository {
    #[instrument(skip(self))]
    async fn create(
        &self,
        name: String,
        url: Option<String>,
        redirect_enabled: bool,
        enabled: bool,
    ) -> Result<HostsSource, DomainError> {
        let row = sqlx::query_as::<_, HostsSourceRow>(
            "INSERT INTO hosts_sources (name, url, redirect_enabled, enabled)
             VALUES (?, ?, ?, ?)
             RETURNING id, name, url, redirect_enabled, enabled, created_at",
        )
        .bind(&name)
        .bind(&url)
        .bind(if redirect_enabled { 1i64 } else { 0i64 })
        .bind(if enabled { 1i64 } else { 0i64 })
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                DomainError::InvalidHostsSource(format!("Hosts source '{}' already exists", name))
            } else {
                error!(error = %e, "Failed to create hosts source");
                DomainError::DatabaseError(e.to_string())
            }
        })?;

        Ok(Self::row_to_source(row))
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Option<HostsSource>, DomainError> {
        let row = sqlx::query_as::<_, HostsSourceRow>(
            "SELECT id, name, url, redirect_enabled, enabled, created_at
             FROM hosts_sources WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query hosts source by id");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(Self::row_to_source))
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<HostsSource>, DomainError> {
        let rows = sqlx::query_as::<_, HostsSourceRow>(
            "SELECT id, name, url, redirect_enabled, enabled, created_at
             FROM hosts_sources ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query all hosts sources");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(Self::row_to_source).collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM hosts_sources WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to delete hosts source");
                DomainError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::HostsSourceNotFound(id));
        }

        Ok(())
    }
}
