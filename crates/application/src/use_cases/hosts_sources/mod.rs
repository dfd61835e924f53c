mod create_hosts_source;
mod delete_hosts_source;
mod get_hosts_sources;

pub use create_hosts_source::CreateHostsSourceUseCase;
pub use delete_hosts_source::DeleteHostsSourceUseCase;
pub use get_hosts_sources::GetHostsSourcesUseCase;
