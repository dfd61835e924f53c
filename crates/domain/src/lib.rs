//! Ferrous Hosts Domain Layer
pub mod config;
pub mod errors;
pub mod host_list_item;
pub mod hosts_source;
pub mod line_validator;

pub use config::{CliOverrides, Config, ConfigError, IngestionConfig, LoadStrategy};
pub use errors::DomainError;
pub use host_list_item::{HostListItem, ListType};
pub use hosts_source::HostsSource;
pub use line_validator::{ClassifiedLine, LineRejection};
