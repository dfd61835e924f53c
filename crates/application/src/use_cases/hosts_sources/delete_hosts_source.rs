use ferrous_hosts_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::{HostListItemRepository, HostsSourceRepository};

pub struct DeleteHostsSourceUseCase {
    repo: Arc<dyn HostsSourceRepository>,
    host_repo: Arc<dyn HostListItemRepository>,
}

impl DeleteHostsSourceUseCase {
    pub fn new(
        repo: Arc<dyn HostsSourceRepository>,
        host_repo: Arc<dyn HostListItemRepository>,
    ) -> Self {
        Self { repo, host_repo }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, id: i64) -> Result<(), DomainError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(DomainError::HostsSourceNotFound(id))?;

        let removed = self.host_repo.clear_source_hosts(id).await?;
        self.repo.delete(id).await?;

        info!(source_id = id, removed, "Hosts source deleted successfully");

        Ok(())
    }
}
