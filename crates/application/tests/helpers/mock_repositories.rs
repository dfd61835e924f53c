#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_hosts_application::ports::{HostListItemRepository, HostsSourceRepository};
use ferrous_hosts_domain::{DomainError, HostListItem, HostsSource};
use std::collections::HashSet;
use std::io::{self, BufRead, Cursor, Read};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoEvent {
    Clear(i64),
    Insert(usize),
}

/// In-memory host list store that records every call it receives.
#[derive(Clone, Default)]
pub struct MockHostListItemRepository {
    items: Arc<Mutex<Vec<HostListItem>>>,
    events: Arc<Mutex<Vec<RepoEvent>>>,
    poisoned_hosts: Arc<Mutex<HashSet<String>>>,
    fail_clear: Arc<AtomicBool>,
    insert_delay: Arc<Mutex<Option<Duration>>>,
}

impl MockHostListItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any batch containing `host` fails to insert.
    pub fn poison_host(&self, host: &str) {
        self.poisoned_hosts.lock().unwrap().insert(host.to_string());
    }

    pub fn set_fail_clear(&self, fail: bool) {
        self.fail_clear.store(fail, Ordering::SeqCst);
    }

    pub fn set_insert_delay(&self, delay: Duration) {
        *self.insert_delay.lock().unwrap() = Some(delay);
    }

    pub fn seed(&self, items: Vec<HostListItem>) {
        self.items.lock().unwrap().extend(items);
    }

    pub fn items(&self) -> Vec<HostListItem> {
        self.items.lock().unwrap().clone()
    }

    pub fn item_set(&self) -> HashSet<HostListItem> {
        self.items().into_iter().collect()
    }

    pub fn events(&self) -> Vec<RepoEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Sizes of every insert call, empty final flushes included.
    pub fn flush_sizes(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                RepoEvent::Insert(n) => Some(n),
                RepoEvent::Clear(_) => None,
            })
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, RepoEvent::Clear(_)))
            .count()
    }
}

#[async_trait]
impl HostListItemRepository for MockHostListItemRepository {
    async fn clear_source_hosts(&self, source_id: i64) -> Result<u64, DomainError> {
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("Mock clear failed".to_string()));
        }

        self.events.lock().unwrap().push(RepoEvent::Clear(source_id));
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| item.source_id != source_id);
        Ok((before - items.len()) as u64)
    }

    async fn insert_batch(&self, batch: &[HostListItem]) -> Result<(), DomainError> {
        let delay = *self.insert_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        {
            let poisoned = self.poisoned_hosts.lock().unwrap();
            if batch.iter().any(|item| poisoned.contains(item.host.as_ref())) {
                return Err(DomainError::DatabaseError("Mock insert failed".to_string()));
            }
        }

        self.events.lock().unwrap().push(RepoEvent::Insert(batch.len()));
        self.items.lock().unwrap().extend_from_slice(batch);
        Ok(())
    }

    async fn get_by_source(&self, source_id: i64) -> Result<Vec<HostListItem>, DomainError> {
        Ok(self
            .items()
            .into_iter()
            .filter(|item| item.source_id == source_id)
            .collect())
    }

    async fn count_by_source(&self, source_id: i64) -> Result<u64, DomainError> {
        Ok(self.get_by_source(source_id).await?.len() as u64)
    }
}

#[derive(Clone)]
pub struct MockHostsSourceRepository {
    sources: Arc<RwLock<Vec<HostsSource>>>,
    next_id: Arc<AtomicI64>,
}

impl MockHostsSourceRepository {
    pub fn new() -> Self {
        Self {
            sources: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    pub async fn with_source(redirect_enabled: bool) -> (Self, HostsSource) {
        let repo = Self::new();
        let source = repo
            .create("Test hosts".to_string(), None, redirect_enabled, true)
            .await
            .unwrap();
        (repo, source)
    }

    pub async fn count(&self) -> usize {
        self.sources.read().await.len()
    }
}

impl Default for MockHostsSourceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostsSourceRepository for MockHostsSourceRepository {
    async fn create(
        &self,
        name: String,
        url: Option<String>,
        redirect_enabled: bool,
        enabled: bool,
    ) -> Result<HostsSource, DomainError> {
        let mut sources = self.sources.write().await;
        if sources.iter().any(|s| s.name.as_ref() == name) {
            return Err(DomainError::InvalidHostsSource(format!(
                "Hosts source '{}' already exists",
                name
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut source = HostsSource::new(
            Some(id),
            Arc::from(name.as_str()),
            url.as_deref().map(Arc::from),
            redirect_enabled,
            enabled,
        );
        source.created_at = Some("2025-01-01 00:00:00".to_string());
        sources.push(source.clone());
        Ok(source)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<HostsSource>, DomainError> {
        Ok(self
            .sources
            .read()
            .await
            .iter()
            .find(|s| s.id == Some(id))
            .cloned())
    }

    async fn get_all(&self) -> Result<Vec<HostsSource>, DomainError> {
        Ok(self.sources.read().await.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut sources = self.sources.write().await;
        let before = sources.len();
        sources.retain(|s| s.id != Some(id));
        if sources.len() == before {
            return Err(DomainError::HostsSourceNotFound(id));
        }
        Ok(())
    }
}

/// Serves `data`, then fails instead of reporting end of stream.
pub struct FailingReader {
    inner: Cursor<Vec<u8>>,
}

impl FailingReader {
    pub fn new(data: &str) -> Self {
        Self {
            inner: Cursor::new(data.as_bytes().to_vec()),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
        }
        Ok(n)
    }
}

impl BufRead for FailingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        let pos = self.inner.position() as usize;
        if pos >= self.inner.get_ref().len() {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
        }
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}

/// Serves `data`, then blocks like an idle network stream until `release`
/// fires and reports end of stream after that.
pub struct StallingReader {
    inner: Cursor<Vec<u8>>,
    release: CancellationToken,
}

impl StallingReader {
    pub fn new(data: &str, release: CancellationToken) -> Self {
        Self {
            inner: Cursor::new(data.as_bytes().to_vec()),
            release,
        }
    }
}

impl Read for StallingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for StallingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        while self.inner.position() as usize >= self.inner.get_ref().len()
            && !self.release.is_cancelled()
        {
            std::thread::sleep(Duration::from_millis(1));
        }
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}

pub fn reader(text: &str) -> Cursor<Vec<u8>> {
    Cursor::new(text.as_bytes().to_vec())
}

/// `count` distinct blocked lines: `0.0.0.0 host-<n>.example.com`.
pub fn blocked_lines(count: usize) -> String {
    (0..count)
        .map(|n| format!("0.0.0.0 host-{}.example.com\n", n))
        .collect()
}
