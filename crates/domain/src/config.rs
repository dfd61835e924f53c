pub mod database;
pub mod errors;
pub mod ingestion;
pub mod logging;
pub mod root;

pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use ingestion::{IngestionConfig, LoadStrategy};
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
