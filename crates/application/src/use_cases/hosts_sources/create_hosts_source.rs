use ferrous_hosts_domain::{DomainError, HostsSource};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::HostsSourceRepository;

pub struct CreateHostsSourceUseCase {
    repo: Arc<dyn HostsSourceRepository>,
}

impl CreateHostsSourceUseCase {
    pub fn new(repo: Arc<dyn HostsSourceRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        name: String,
        url: Option<String>,
        redirect_enabled: bool,
        enabled: bool,
    ) -> Result<HostsSource, DomainError> {
        HostsSource::validate_name(&name).map_err(DomainError::InvalidHostsSource)?;

        HostsSource::validate_url(&url.as_deref().map(Arc::from))
            .map_err(DomainError::InvalidHostsSource)?;

        let source = self
            .repo
            .create(name.clone(), url, redirect_enabled, enabled)
            .await?;

        info!(
            source_id = ?source.id,
            name = %name,
            redirect_enabled,
            "Hosts source created successfully"
        );

        Ok(source)
    }
}
