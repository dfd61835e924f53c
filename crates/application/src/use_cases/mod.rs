pub mod host_list;
pub mod hosts_sources;

// Re-export use cases
pub use host_list::{GetHostListItemsUseCase, LoadHostsSourceUseCase};
pub use hosts_sources::{
    CreateHostsSourceUseCase, DeleteHostsSourceUseCase, GetHostsSourcesUseCase,
};
