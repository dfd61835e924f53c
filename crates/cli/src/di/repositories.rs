use ferrous_hosts_infrastructure::repositories::{
    SqliteHostListItemRepository, SqliteHostsSourceRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub hosts_source: Arc<SqliteHostsSourceRepository>,
    pub host_list: Arc<SqliteHostListItemRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            hosts_source: Arc::new(SqliteHostsSourceRepository::new(pool.clone())),
            host_list: Arc::new(SqliteHostListItemRepository::new(pool)),
        }
    }
}
