use ferrous_hosts_domain::line_validator::{
    classify_line, is_valid_host, is_valid_redirection,
};
use ferrous_hosts_domain::{DomainError, HostListItem, HostsSource, LineRejection, ListType};
use tracing::debug;

/// Turns raw hosts lines of one source into validated host list items.
///
/// Holds only the source id and redirect flag, so a single parser can be
/// shared by every worker of a load.
#[derive(Debug, Clone, Copy)]
pub struct RecordParser {
    source_id: i64,
    redirect_enabled: bool,
}

impl RecordParser {
    pub fn new(source_id: i64, redirect_enabled: bool) -> Self {
        Self {
            source_id,
            redirect_enabled,
        }
    }

    pub fn for_source(source: &HostsSource) -> Result<Self, DomainError> {
        let source_id = source.id.ok_or_else(|| {
            DomainError::InvalidHostsSource(format!("Source '{}' has no id", source.name))
        })?;
        Ok(Self::new(source_id, source.redirect_enabled))
    }

    pub fn source_id(&self) -> i64 {
        self.source_id
    }

    pub fn redirect_enabled(&self) -> bool {
        self.redirect_enabled
    }

    pub fn parse(&self, line: &str) -> Option<HostListItem> {
        let classified = match classify_line(line, self.redirect_enabled) {
            Ok(classified) => classified,
            Err(LineRejection::Malformed) => {
                debug!(line, "Does not match hosts line format");
                return None;
            }
            Err(_) => return None,
        };

        let item = match classified.list_type {
            ListType::Blocked => HostListItem::blocked(self.source_id, classified.hostname),
            ListType::Redirected => HostListItem::redirected(
                self.source_id,
                classified.hostname,
                classified.address,
            ),
        };

        (is_valid_redirection(&item) && is_valid_host(&item)).then_some(item)
    }
}
