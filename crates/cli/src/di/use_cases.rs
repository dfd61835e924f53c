use super::Repositories;
use ferrous_hosts_application::use_cases::{
    CreateHostsSourceUseCase, DeleteHostsSourceUseCase, GetHostListItemsUseCase,
    GetHostsSourcesUseCase, LoadHostsSourceUseCase,
};
use ferrous_hosts_domain::IngestionConfig;
use std::sync::Arc;

pub struct UseCases {
    pub create_source: Arc<CreateHostsSourceUseCase>,
    pub get_sources: Arc<GetHostsSourcesUseCase>,
    pub delete_source: Arc<DeleteHostsSourceUseCase>,
    pub load_source: Arc<LoadHostsSourceUseCase>,
    pub get_items: Arc<GetHostListItemsUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories, ingestion: &IngestionConfig) -> Self {
        Self {
            create_source: Arc::new(CreateHostsSourceUseCase::new(repos.hosts_source.clone())),
            get_sources: Arc::new(GetHostsSourcesUseCase::new(repos.hosts_source.clone())),
            delete_source: Arc::new(DeleteHostsSourceUseCase::new(
                repos.hosts_source.clone(),
                repos.host_list.clone(),
            )),
            load_source: Arc::new(LoadHostsSourceUseCase::new(
                repos.hosts_source.clone(),
                repos.host_list.clone(),
                ingestion.clone(),
            )),
            get_items: Arc::new(GetHostListItemsUseCase::new(repos.host_list.clone())),
        }
    }
}
