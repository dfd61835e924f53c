//! Openers that turn a hosts source location into a line reader.

mod http;

pub use http::HttpSourceFetcher;

use ferrous_hosts_domain::DomainError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub type SourceReader = Box<dyn BufRead + Send>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    File(PathBuf),
    Url(String),
    Stdin,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLocation::File(path) => write!(f, "{}", path.display()),
            SourceLocation::Url(url) => f.write_str(url),
            SourceLocation::Stdin => f.write_str("<stdin>"),
        }
    }
}

pub fn open_file(path: &Path) -> Result<SourceReader, DomainError> {
    let file = File::open(path)
        .map_err(|e| DomainError::IoError(format!("{}: {}", path.display(), e)))?;
    Ok(Box::new(BufReader::new(file)))
}

pub fn open_stdin() -> SourceReader {
    Box::new(BufReader::new(io::stdin()))
}

/// Files and stdin are streamed; URLs are fetched whole before parsing starts.
pub async fn open(
    location: &SourceLocation,
    fetch_timeout: Duration,
) -> Result<SourceReader, DomainError> {
    info!(source = %location, "Opening hosts source");
    match location {
        SourceLocation::File(path) => open_file(path),
        SourceLocation::Stdin => Ok(open_stdin()),
        SourceLocation::Url(url) => HttpSourceFetcher::new(fetch_timeout)?.fetch(url).await,
    }
}
