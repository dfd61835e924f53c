use crate::ports::HostListItemRepository;
use ferrous_hosts_domain::{DomainError, HostListItem};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub items_inserted: u64,
    pub batches_flushed: u64,
}

impl BatchStats {
    pub fn merge(&mut self, other: BatchStats) {
        self.items_inserted += other.items_inserted;
        self.batches_flushed += other.batches_flushed;
    }
}

/// Per-worker insert buffer.
///
/// Each parser worker owns one writer; writers are never shared, so the
/// buffer needs no locking. The repository sees one `insert_batch` call per
/// full buffer plus the final partial flush.
pub struct BatchWriter {
    repo: Arc<dyn HostListItemRepository>,
    batch: Vec<HostListItem>,
    capacity: usize,
    stats: BatchStats,
}

impl BatchWriter {
    pub fn new(repo: Arc<dyn HostListItemRepository>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            repo,
            batch: Vec::with_capacity(capacity),
            capacity,
            stats: BatchStats::default(),
        }
    }

    /// Removes every stored item of the source. Must complete before any
    /// writer of the same load flushes.
    pub async fn clear_source(
        repo: &dyn HostListItemRepository,
        source_id: i64,
    ) -> Result<u64, DomainError> {
        let removed = repo.clear_source_hosts(source_id).await?;
        info!(source_id, removed, "Cleared hosts of source");
        Ok(removed)
    }

    pub async fn push(&mut self, item: HostListItem) -> Result<(), DomainError> {
        self.batch.push(item);
        if self.batch.len() >= self.capacity {
            self.flush().await?;
        }
        Ok(())
    }

    /// Sends the buffered items, possibly none, and resets the buffer.
    ///
    /// The buffer is emptied even when the insert fails; a failed batch is
    /// reported, not retried.
    pub async fn flush(&mut self) -> Result<(), DomainError> {
        let batch = std::mem::replace(&mut self.batch, Vec::with_capacity(self.capacity));
        self.write(batch).await
    }

    /// Sends a batch assembled elsewhere, bypassing the buffer.
    pub async fn write(&mut self, batch: Vec<HostListItem>) -> Result<(), DomainError> {
        self.repo.insert_batch(&batch).await?;

        if !batch.is_empty() {
            self.stats.items_inserted += batch.len() as u64;
            self.stats.batches_flushed += 1;
            debug!(count = batch.len(), "Host list batch flushed");
        }
        Ok(())
    }

    pub fn pending(&self) -> usize {
        self.batch.len()
    }

    pub fn stats(&self) -> BatchStats {
        self.stats
    }
}
