mod host_list_item_repository;
mod hosts_source_repository;

pub use host_list_item_repository::HostListItemRepository;
pub use hosts_source_repository::HostsSourceRepository;
