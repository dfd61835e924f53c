use ferrous_hosts_domain::{DomainError, HostsSource};
use std::sync::Arc;
use tracing::instrument;

use crate::ports::HostsSourceRepository;

pub struct GetHostsSourcesUseCase {
    repo: Arc<dyn HostsSourceRepository>,
}

impl GetHostsSourcesUseCase {
    pub fn new(repo: Arc<dyn HostsSourceRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<HostsSource>, DomainError> {
        self.repo.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Option<HostsSource>, DomainError> {
        self.repo.get_by_id(id).await
    }
}
