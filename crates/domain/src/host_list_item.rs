use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Blocked,
    Redirected,
}

impl ListType {
    pub fn to_str(&self) -> &'static str {
        match self {
            ListType::Blocked => "blocked",
            ListType::Redirected => "redirected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "blocked" => Some(ListType::Blocked),
            "redirected" => Some(ListType::Redirected),
            _ => None,
        }
    }
}

impl std::fmt::Display for ListType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// One parsed entry of a hosts source.
///
/// `redirection` is `Some` exactly when `list_type` is [`ListType::Redirected`];
/// the constructors are the only way the parser builds items, so the pairing
/// always holds for freshly parsed entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostListItem {
    pub source_id: i64,
    pub host: Arc<str>,
    pub list_type: ListType,
    pub redirection: Option<Arc<str>>,
    pub enabled: bool,
}

impl HostListItem {
    pub fn blocked(source_id: i64, host: &str) -> Self {
        Self {
            source_id,
            host: Arc::from(host),
            list_type: ListType::Blocked,
            redirection: None,
            enabled: true,
        }
    }

    pub fn redirected(source_id: i64, host: &str, redirection: &str) -> Self {
        Self {
            source_id,
            host: Arc::from(host),
            list_type: ListType::Redirected,
            redirection: Some(Arc::from(redirection)),
            enabled: true,
        }
    }
}
