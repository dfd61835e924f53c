use async_trait::async_trait;
use ferrous_hosts_domain::{DomainError, HostsSource};

#[async_trait]
pub trait HostsSourceRepository: Send + Sync {
    async fn create(
        &self,
        name: String,
        url: Option<String>,
        redirect_enabled: bool,
        enabled: bool,
    ) -> Result<HostsSource, DomainError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<HostsSource>, DomainError>;

    async fn get_all(&self) -> Result<Vec<HostsSource>, DomainError>;

    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}
