use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A line-oriented block/redirect list registered for loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostsSource {
    pub id: Option<i64>,
    pub name: Arc<str>,
    pub url: Option<Arc<str>>,
    pub redirect_enabled: bool,
    pub enabled: bool,
    pub created_at: Option<String>,
}

impl HostsSource {
    pub fn new(
        id: Option<i64>,
        name: Arc<str>,
        url: Option<Arc<str>>,
        redirect_enabled: bool,
        enabled: bool,
    ) -> Self {
        Self {
            id,
            name,
            url,
            redirect_enabled,
            enabled,
            created_at: None,
        }
    }

    pub fn validate_name(name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("Hosts source name cannot be empty".to_string());
        }

        if name.len() > 200 {
            return Err("Hosts source name cannot exceed 200 characters".to_string());
        }

        Ok(())
    }

    pub fn validate_url(url: &Option<Arc<str>>) -> Result<(), String> {
        if let Some(u) = url {
            if u.len() > 2048 {
                return Err("URL cannot exceed 2048 characters".to_string());
            }
            if !u.starts_with("http://") && !u.starts_with("https://") {
                return Err("URL must start with http:// or https://".to_string());
            }
        }
        Ok(())
    }
}
