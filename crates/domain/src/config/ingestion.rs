use serde::{Deserialize, Serialize};

/// How a hosts source is spread across parser workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStrategy {
    /// One reader thread feeding a shared queue drained by parser tasks.
    #[default]
    WorkerQueue,
    /// A parallel filter/map over the lines on a per-load thread pool.
    ParallelStream,
}

impl LoadStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStrategy::WorkerQueue => "worker_queue",
            LoadStrategy::ParallelStream => "parallel_stream",
        }
    }
}

impl std::fmt::Display for LoadStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestionConfig {
    #[serde(default = "default_parser_count")]
    pub parser_count: usize,

    /// Items per insert transaction, per parser worker.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default)]
    pub strategy: LoadStrategy,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            parser_count: default_parser_count(),
            batch_size: default_batch_size(),
            strategy: LoadStrategy::default(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_parser_count() -> usize {
    4
}

fn default_batch_size() -> usize {
    100
}

fn default_fetch_timeout_secs() -> u64 {
    30
}
