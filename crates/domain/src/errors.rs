use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Hosts source not found: {0}")]
    HostsSourceNotFound(i64),

    #[error("Invalid hosts source: {0}")]
    InvalidHostsSource(String),

    #[error("Hosts source fetch error: {0}")]
    SourceFetchError(String),

    #[error("Source load interrupted")]
    Interrupted,

    #[error("Parser worker {worker} failed: {reason}")]
    WorkerFailed { worker: usize, reason: String },

    #[error("Hosts source {source_id} loaded incompletely ({inserted} items inserted): {failures}")]
    IncompleteLoad {
        source_id: i64,
        inserted: u64,
        failures: String,
    },
}
