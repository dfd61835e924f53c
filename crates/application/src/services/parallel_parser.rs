use super::record_parser::RecordParser;
use super::source_lines::SourceLines;
use ferrous_hosts_domain::{DomainError, HostListItem};
use rayon::iter::{ParallelBridge, ParallelIterator};
use rayon::ThreadPoolBuilder;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub struct ParsedSource {
    pub lines_read: u64,
    pub batches_sent: u64,
    /// First read error; every line before it was still parsed.
    pub read_error: Option<DomainError>,
}

/// Declarative variant of the load: an unordered parallel filter/map over
/// the source lines.
///
/// Every call builds its own thread pool and tears it down on return, so
/// loads never share parser threads. Each fold of the pool fills its own
/// batch and hands it to `sink` once full, so at most one partial batch per
/// fold plus the channel capacity is held in memory.
pub struct ParallelSourceParser {
    parser: RecordParser,
    threads: usize,
}

impl ParallelSourceParser {
    pub fn new(parser: RecordParser, threads: usize) -> Self {
        Self {
            parser,
            threads: threads.max(1),
        }
    }

    /// Blocking; call from a blocking context. Batches the receiver no
    /// longer accepts are dropped.
    pub fn parse_into<R>(
        &self,
        reader: R,
        cancel: &CancellationToken,
        batch_size: usize,
        sink: mpsc::Sender<Vec<HostListItem>>,
    ) -> Result<ParsedSource, DomainError>
    where
        R: BufRead + Send,
    {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("source-parser-{}", i))
            .build()
            .map_err(|e| DomainError::WorkerFailed {
                worker: 0,
                reason: format!("failed to build parser pool: {}", e),
            })?;

        let batch_size = batch_size.max(1);
        let lines_read = AtomicU64::new(0);
        let batches_sent = AtomicU64::new(0);
        let read_error: OnceLock<io::Error> = OnceLock::new();
        let parser = &self.parser;

        let send = |batch: Vec<HostListItem>| {
            if sink.blocking_send(batch).is_ok() {
                batches_sent.fetch_add(1, Ordering::Relaxed);
            }
        };

        pool.install(|| {
            SourceLines::new(reader)
                .with_cancellation(cancel.clone())
                .par_bridge()
                .filter_map(|line| match line {
                    Ok(line) => {
                        lines_read.fetch_add(1, Ordering::Relaxed);
                        parser.parse(&line)
                    }
                    Err(e) => {
                        let _ = read_error.set(e);
                        None
                    }
                })
                .fold(
                    || Vec::with_capacity(batch_size),
                    |mut batch, item| {
                        batch.push(item);
                        if batch.len() >= batch_size {
                            send(std::mem::replace(&mut batch, Vec::with_capacity(batch_size)));
                        }
                        batch
                    },
                )
                .for_each(|rest| {
                    if !rest.is_empty() {
                        send(rest);
                    }
                })
        });

        let parsed = ParsedSource {
            lines_read: lines_read.into_inner(),
            batches_sent: batches_sent.into_inner(),
            read_error: read_error
                .into_inner()
                .map(|e| DomainError::IoError(e.to_string())),
        };
        debug!(
            source_id = parser.source_id(),
            lines = parsed.lines_read,
            batches = parsed.batches_sent,
            threads = self.threads,
            "Parallel parse finished"
        );

        Ok(parsed)
    }
}
