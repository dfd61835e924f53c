use async_trait::async_trait;
use ferrous_hosts_domain::{DomainError, HostListItem};

/// Storage for parsed host list items, scoped by source.
///
/// `insert_batch` is called concurrently by every parser worker of a load,
/// each call with its own disjoint items; implementations must apply a batch
/// atomically.
#[async_trait]
pub trait HostListItemRepository: Send + Sync {
    /// Deletes every stored item of the source and returns how many were removed.
    async fn clear_source_hosts(&self, source_id: i64) -> Result<u64, DomainError>;

    async fn insert_batch(&self, items: &[HostListItem]) -> Result<(), DomainError>;

    async fn get_by_source(&self, source_id: i64) -> Result<Vec<HostListItem>, DomainError>;

    async fn count_by_source(&self, source_id: i64) -> Result<u64, DomainError>;
}
