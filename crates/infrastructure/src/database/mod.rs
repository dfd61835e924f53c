use ferrous_hosts_domain::config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub fn database_url(path: &str) -> String {
    if path.starts_with("sqlite:") {
        path.to_string()
    } else {
        format!("sqlite:{}", path)
    }
}

/// Opens the pool and brings the schema up to date.
///
/// Parser workers insert concurrently, so the pool runs in WAL mode and
/// waits on a busy database instead of failing the flush.
pub async fn create_pool(
    database_url: &str,
    config: &DatabaseConfig,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    info!(
        url = database_url,
        max_connections = config.max_connections,
        "Database ready"
    );

    Ok(pool)
}
