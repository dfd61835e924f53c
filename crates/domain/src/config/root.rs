use serde::{Deserialize, Serialize};
use std::path::Path;

use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::ingestion::IngestionConfig;
use super::logging::LoggingConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-hosts.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-hosts/config.toml";

/// Main configuration structure for Ferrous Hosts
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Parser pool and batching
    #[serde(default)]
    pub ingestion: IngestionConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-hosts.toml in current directory
    /// 3. /etc/ferrous-hosts/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(str::to_string).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(count) = overrides.parser_count {
            self.ingestion.parser_count = count;
        }
        if let Some(size) = overrides.batch_size {
            self.ingestion.batch_size = size;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ingestion.parser_count == 0 {
            return Err(ConfigError::Validation(
                "Parser count must be at least 1".to_string(),
            ));
        }

        if self.ingestion.batch_size == 0 {
            return Err(ConfigError::Validation(
                "Batch size must be at least 1".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "Database pool needs at least one connection".to_string(),
            ));
        }

        Ok(())
    }

    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub database_path: Option<String>,
    pub log_level: Option<String>,
    pub parser_count: Option<usize>,
    pub batch_size: Option<usize>,
}
