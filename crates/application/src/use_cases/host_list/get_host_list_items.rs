use ferrous_hosts_domain::{DomainError, HostListItem};
use std::sync::Arc;
use tracing::instrument;

use crate::ports::HostListItemRepository;

pub struct GetHostListItemsUseCase {
    repo: Arc<dyn HostListItemRepository>,
}

impl GetHostListItemsUseCase {
    pub fn new(repo: Arc<dyn HostListItemRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn get_by_source(&self, source_id: i64) -> Result<Vec<HostListItem>, DomainError> {
        self.repo.get_by_source(source_id).await
    }

    #[instrument(skip(self))]
    pub async fn count_by_source(&self, source_id: i64) -> Result<u64, DomainError> {
        self.repo.count_by_source(source_id).await
    }
}
