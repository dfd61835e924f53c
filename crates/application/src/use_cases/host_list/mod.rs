mod get_host_list_items;
mod load_hosts_source;

pub use get_host_list_items::GetHostListItemsUseCase;
pub use load_hosts_source::LoadHostsSourceUseCase;
