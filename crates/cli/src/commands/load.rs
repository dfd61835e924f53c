use crate::di::UseCases;
use ferrous_hosts_domain::DomainError;
use ferrous_hosts_infrastructure::sources::{self, SourceLocation};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Explicit `--file` / `--url` win; otherwise the registered URL of the
/// source is fetched, and a source without one is read from stdin.
pub async fn load(
    use_cases: &UseCases,
    id: i64,
    file: Option<PathBuf>,
    url: Option<String>,
    fetch_timeout: Duration,
) -> anyhow::Result<()> {
    let source = use_cases
        .get_sources
        .get_by_id(id)
        .await?
        .ok_or(DomainError::HostsSourceNotFound(id))?;

    let location = match (file, url) {
        (Some(path), _) => SourceLocation::File(path),
        (None, Some(url)) => SourceLocation::Url(url),
        (None, None) => match source.url.as_deref() {
            Some(url) => SourceLocation::Url(url.to_string()),
            None => SourceLocation::Stdin,
        },
    };

    let reader = sources::open(&location, fetch_timeout).await?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping load");
            on_interrupt.cancel();
        }
    });

    let report = use_cases.load_source.execute(id, reader, cancel).await?;

    println!(
        "Loaded '{}' from {}: {} lines, {} entries in {} batches ({})",
        source.name,
        location,
        report.lines_read,
        report.items_inserted,
        report.batches_flushed,
        report.strategy,
    );
    Ok(())
}
