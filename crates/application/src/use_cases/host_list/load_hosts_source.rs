use ferrous_hosts_domain::{DomainError, IngestionConfig};
use std::io::BufRead;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::ports::{HostListItemRepository, HostsSourceRepository};
use crate::services::{IngestionPipeline, LoadReport};

/// Replaces the stored items of a hosts source with the parsed content of
/// `reader`.
pub struct LoadHostsSourceUseCase {
    source_repo: Arc<dyn HostsSourceRepository>,
    host_repo: Arc<dyn HostListItemRepository>,
    config: IngestionConfig,
}

impl LoadHostsSourceUseCase {
    pub fn new(
        source_repo: Arc<dyn HostsSourceRepository>,
        host_repo: Arc<dyn HostListItemRepository>,
        config: IngestionConfig,
    ) -> Self {
        Self {
            source_repo,
            host_repo,
            config,
        }
    }

    /// A load that ran but lost work (interrupted, failed flush, read error)
    /// is reported as [`DomainError::IncompleteLoad`]; nothing is retried.
    #[instrument(skip(self, reader, cancel))]
    pub async fn execute<R>(
        &self,
        source_id: i64,
        reader: R,
        cancel: CancellationToken,
    ) -> Result<LoadReport, DomainError>
    where
        R: BufRead + Send + 'static,
    {
        let source = self
            .source_repo
            .get_by_id(source_id)
            .await?
            .ok_or(DomainError::HostsSourceNotFound(source_id))?;

        info!(
            source_id,
            name = %source.name,
            redirect_enabled = source.redirect_enabled,
            strategy = %self.config.strategy,
            parser_count = self.config.parser_count,
            "Loading hosts source"
        );

        let report = IngestionPipeline::for_source(self.host_repo.clone(), &source, &self.config)?
            .with_cancellation(cancel)
            .run(reader)
            .await?;

        if !report.is_complete() {
            warn!(
                source_id,
                inserted = report.items_inserted,
                interrupted = report.interrupted,
                "Hosts source loaded incompletely"
            );
        }

        report.into_result()
    }
}
