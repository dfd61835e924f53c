use super::SourceReader;
use ferrous_hosts_domain::DomainError;
use std::io::Cursor;
use std::time::Duration;
use tracing::{debug, warn};

pub struct HttpSourceFetcher {
    client: reqwest::Client,
}

impl HttpSourceFetcher {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent("Ferrous-Hosts/1.0 (hosts-sync)")
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::SourceFetchError(e.to_string()))?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, url: &str) -> Result<SourceReader, DomainError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "Failed to fetch hosts source");
            DomainError::SourceFetchError(format!("fetch error for {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(DomainError::SourceFetchError(format!(
                "HTTP {} for {}",
                response.status().as_u16(),
                url
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            DomainError::SourceFetchError(format!("read error for {}: {}", url, e))
        })?;
        debug!(url, bytes = body.len(), "Hosts source downloaded");

        Ok(Box::new(Cursor::new(body.to_vec())))
    }
}
