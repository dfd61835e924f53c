//! Concurrent parse-and-load of one hosts source.
//!
//! A load clears the stored items of the source, then streams the text
//! through parser workers into per-worker batches. The default strategy runs
//! a blocking reader thread that feeds a shared FIFO queue; `parser_count`
//! tasks pop lines from it until the reader closes the queue, which every
//! worker observes as end of input. Worker failures are collected into the
//! [`LoadReport`] once all workers have finished; a failing worker never
//! stops its siblings.
//!
//! Everything a load spawns is bound to the `run` future: dropping it
//! cancels the reader and aborts the workers, so no insert lands after the
//! caller gave up on the load.

use super::batch_writer::{BatchStats, BatchWriter};
use super::parallel_parser::{ParallelSourceParser, ParsedSource};
use super::record_parser::RecordParser;
use super::source_lines::SourceLines;
use crate::ports::HostListItemRepository;
use ferrous_hosts_domain::{DomainError, HostsSource, IngestionConfig, LoadStrategy};
use futures::future::join_all;
use std::io::{self, BufRead};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::{AbortHandle, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

type LineQueue = Arc<Mutex<mpsc::UnboundedReceiver<String>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    ClearingSource,
    Streaming,
    Draining,
    Completed,
    Failed,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::ClearingSource => "clearing_source",
            PipelineState::Streaming => "streaming",
            PipelineState::Draining => "draining",
            PipelineState::Completed => "completed",
            PipelineState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub source_id: i64,
    pub strategy: LoadStrategy,
    pub state: PipelineState,
    /// Items removed by the clear step.
    pub cleared: u64,
    pub lines_read: u64,
    pub items_inserted: u64,
    pub batches_flushed: u64,
    pub interrupted: bool,
    pub failures: Vec<DomainError>,
}

impl LoadReport {
    fn new(source_id: i64, strategy: LoadStrategy) -> Self {
        Self {
            source_id,
            strategy,
            state: PipelineState::Idle,
            cleared: 0,
            lines_read: 0,
            items_inserted: 0,
            batches_flushed: 0,
            interrupted: false,
            failures: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == PipelineState::Completed
    }

    /// Turns a failed load into [`DomainError::IncompleteLoad`].
    pub fn into_result(self) -> Result<Self, DomainError> {
        if self.is_complete() {
            return Ok(self);
        }

        let failures = self
            .failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(DomainError::IncompleteLoad {
            source_id: self.source_id,
            inserted: self.items_inserted,
            failures,
        })
    }

    fn record_batches(&mut self, stats: BatchStats) {
        self.items_inserted += stats.items_inserted;
        self.batches_flushed += stats.batches_flushed;
    }

    fn record_worker_failure(&mut self, worker: usize, error: DomainError) {
        if matches!(error, DomainError::Interrupted) {
            self.interrupted = true;
        }
        warn!(
            source_id = self.source_id,
            worker,
            error = %error,
            "Failed to parse hosts source"
        );
        self.failures.push(DomainError::WorkerFailed {
            worker,
            reason: error.to_string(),
        });
    }
}

struct WorkerReport {
    stats: BatchStats,
    failure: Option<DomainError>,
}

/// Aborts the wrapped tasks when dropped.
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

/// One load of one hosts source. Built per call and consumed by [`run`].
///
/// [`run`]: IngestionPipeline::run
pub struct IngestionPipeline {
    repo: Arc<dyn HostListItemRepository>,
    parser: RecordParser,
    parser_count: usize,
    batch_size: usize,
    strategy: LoadStrategy,
    cancel: CancellationToken,
    state: PipelineState,
}

impl IngestionPipeline {
    pub fn new(
        repo: Arc<dyn HostListItemRepository>,
        parser: RecordParser,
        config: &IngestionConfig,
    ) -> Self {
        Self {
            repo,
            parser,
            parser_count: config.parser_count.max(1),
            batch_size: config.batch_size.max(1),
            strategy: config.strategy,
            cancel: CancellationToken::new(),
            state: PipelineState::Idle,
        }
    }

    pub fn for_source(
        repo: Arc<dyn HostListItemRepository>,
        source: &HostsSource,
        config: &IngestionConfig,
    ) -> Result<Self, DomainError> {
        Ok(Self::new(repo, RecordParser::for_source(source)?, config))
    }

    /// Cancelling the token stops the reader at the next line and makes every
    /// worker flush its partial batch and exit.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    fn transition(&mut self, next: PipelineState) {
        debug!(
            source_id = self.parser.source_id(),
            from = %self.state,
            to = %next,
            "Pipeline state change"
        );
        self.state = next;
    }

    /// Replaces the stored items of the source with the items parsed from
    /// `reader`.
    ///
    /// Returns `Err` only when the clear step fails; worker, reader and
    /// persistence failures during streaming end in a report with state
    /// [`PipelineState::Failed`]. Items already flushed stay stored.
    pub async fn run<R>(mut self, reader: R) -> Result<LoadReport, DomainError>
    where
        R: BufRead + Send + 'static,
    {
        let source_id = self.parser.source_id();
        let mut report = LoadReport::new(source_id, self.strategy);

        // Fires when this future completes or is dropped; the caller's token
        // is left untouched.
        self.cancel = self.cancel.child_token();
        let _teardown = self.cancel.clone().drop_guard();

        self.transition(PipelineState::ClearingSource);
        report.cleared = match BatchWriter::clear_source(self.repo.as_ref(), source_id).await {
            Ok(removed) => removed,
            Err(e) => {
                self.transition(PipelineState::Failed);
                return Err(e);
            }
        };

        self.transition(PipelineState::Streaming);
        match self.strategy {
            LoadStrategy::WorkerQueue => self.stream_through_queue(reader, &mut report).await,
            LoadStrategy::ParallelStream => self.stream_in_parallel(reader, &mut report).await,
        }

        let outcome = if report.failures.is_empty() {
            PipelineState::Completed
        } else {
            PipelineState::Failed
        };
        self.transition(outcome);
        report.state = outcome;

        info!(
            source_id,
            strategy = %report.strategy,
            state = %report.state,
            lines = report.lines_read,
            inserted = report.items_inserted,
            batches = report.batches_flushed,
            failures = report.failures.len(),
            "Hosts source load finished"
        );

        Ok(report)
    }

    async fn stream_through_queue<R>(&mut self, reader: R, report: &mut LoadReport)
    where
        R: BufRead + Send + 'static,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        let queue: LineQueue = Arc::new(Mutex::new(receiver));

        let reader_task = spawn_reader(reader, sender, self.cancel.clone());

        let workers: Vec<JoinHandle<WorkerReport>> = (0..self.parser_count)
            .map(|worker| {
                let writer = BatchWriter::new(self.repo.clone(), self.batch_size);
                tokio::spawn(run_worker(
                    worker,
                    Arc::clone(&queue),
                    self.parser,
                    writer,
                    self.cancel.clone(),
                ))
            })
            .collect();
        let _abort_workers = AbortOnDrop(workers.iter().map(JoinHandle::abort_handle).collect());
        // Workers hold the only receivers now, so the reader stops sending
        // if every worker is gone.
        drop(queue);

        debug!(
            source_id = report.source_id,
            parser_count = self.parser_count,
            "Parser workers started"
        );

        self.transition(PipelineState::Draining);

        for (worker, result) in join_all(workers).await.into_iter().enumerate() {
            match result {
                Ok(worker_report) => {
                    report.record_batches(worker_report.stats);
                    if let Some(e) = worker_report.failure {
                        report.record_worker_failure(worker, e);
                    }
                }
                Err(e) => {
                    warn!(source_id = report.source_id, worker, error = %e, "Parser worker panicked");
                    report.failures.push(DomainError::WorkerFailed {
                        worker,
                        reason: e.to_string(),
                    });
                }
            }
        }

        match reader_task.await {
            Ok((lines, error)) => {
                report.lines_read = lines;
                if let Some(e) = error {
                    warn!(source_id = report.source_id, lines, error = %e, "Failed to read hosts source");
                    report.failures.push(DomainError::IoError(e.to_string()));
                }
            }
            Err(e) => {
                warn!(source_id = report.source_id, error = %e, "Source reader panicked");
                report.failures.push(DomainError::IoError(e.to_string()));
            }
        }
    }

    async fn stream_in_parallel<R>(&mut self, reader: R, report: &mut LoadReport)
    where
        R: BufRead + Send + 'static,
    {
        let parser = ParallelSourceParser::new(self.parser, self.parser_count);
        let (sink, mut batches) = mpsc::channel(self.parser_count);
        // Stops the parser after a failed insert without marking the load
        // interrupted.
        let stop = self.cancel.child_token();
        let parse_task = {
            let stop = stop.clone();
            let batch_size = self.batch_size;
            tokio::task::spawn_blocking(move || parser.parse_into(reader, &stop, batch_size, sink))
        };

        // The writer lives in this future, so dropping `run` drops it and
        // the receiver with it.
        let mut writer = BatchWriter::new(self.repo.clone(), self.batch_size);
        let mut failure = None;
        while let Some(batch) = batches.recv().await {
            if let Err(e) = writer.write(batch).await {
                failure = Some(e);
                stop.cancel();
                break;
            }
        }
        drop(batches);

        self.transition(PipelineState::Draining);

        match parse_task.await {
            Ok(Ok(ParsedSource {
                lines_read,
                read_error,
                ..
            })) => {
                report.lines_read = lines_read;
                if let Some(e) = read_error {
                    warn!(source_id = report.source_id, lines = lines_read, error = %e, "Failed to read hosts source");
                    report.failures.push(e);
                }
            }
            Ok(Err(e)) => {
                warn!(source_id = report.source_id, error = %e, "Failed to start parallel parser");
                report.failures.push(e);
            }
            Err(e) => {
                warn!(source_id = report.source_id, error = %e, "Parallel parser panicked");
                report.failures.push(DomainError::WorkerFailed {
                    worker: 0,
                    reason: e.to_string(),
                });
            }
        }

        if failure.is_none() && self.cancel.is_cancelled() {
            failure = Some(DomainError::Interrupted);
        }

        report.record_batches(writer.stats());
        if let Some(e) = failure {
            report.record_worker_failure(0, e);
        }
    }
}

fn spawn_reader<R>(
    reader: R,
    sender: mpsc::UnboundedSender<String>,
    cancel: CancellationToken,
) -> JoinHandle<(u64, Option<io::Error>)>
where
    R: BufRead + Send + 'static,
{
    // Dropping `sender` on return closes the queue for every worker, on
    // success, read error and cancellation alike.
    tokio::task::spawn_blocking(move || {
        let mut lines = 0u64;
        for line in SourceLines::new(reader).with_cancellation(cancel) {
            let line = match line {
                Ok(line) => line,
                Err(e) => return (lines, Some(e)),
            };
            if sender.send(line).is_err() {
                break;
            }
            lines += 1;
        }
        (lines, None)
    })
}

async fn next_line(queue: &LineQueue) -> Option<String> {
    queue.lock().await.recv().await
}

async fn run_worker(
    worker: usize,
    queue: LineQueue,
    parser: RecordParser,
    mut writer: BatchWriter,
    cancel: CancellationToken,
) -> WorkerReport {
    let mut failure = None;

    loop {
        let line = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                failure = Some(DomainError::Interrupted);
                break;
            }
            line = next_line(&queue) => line,
        };

        let Some(line) = line else {
            break;
        };

        if let Some(item) = parser.parse(&line) {
            if let Err(e) = writer.push(item).await {
                failure = Some(e);
                break;
            }
        }
    }

    // Partial batch goes out even after an interruption.
    if let Err(e) = writer.flush().await {
        failure.get_or_insert(e);
    }

    debug!(
        worker,
        inserted = writer.stats().items_inserted,
        failed = failure.is_some(),
        "Parser worker finished"
    );

    WorkerReport {
        stats: writer.stats(),
        failure,
    }
}
