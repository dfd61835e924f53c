//! Pure classification and validation rules for hosts source lines.
//!
//! A hosts line is `<address> <hostname>` with an optional trailing `#`
//! comment. Blocking addresses produce blocked entries; any other address is
//! a redirection, accepted only when the source enables redirects.

use crate::host_list_item::{HostListItem, ListType};
use std::net::IpAddr;
use std::str::FromStr;

pub const LOCALHOST_HOSTNAME: &str = "localhost";
pub const LOCALHOST_IPV4: &str = "127.0.0.1";
pub const BOGUS_IPV4: &str = "0.0.0.0";
pub const LOCALHOST_IPV6: &str = "::1";

const WILDCARD_PLACEHOLDER: &str = "a";
const MAX_DOMAIN_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub address: &'a str,
    pub hostname: &'a str,
    pub list_type: ListType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRejection {
    /// Not `<address> <hostname> [# comment]`.
    Malformed,
    Localhost,
    RedirectDisabled,
}

/// Splits a line into its address and hostname tokens.
///
/// Everything from the first `#` on is a comment. Tokens are separated by
/// runs of ASCII whitespace, vertical tab included. Exactly two tokens must
/// remain, so blank lines, comment-only lines and lines with extra tokens
/// return `None`.
pub fn split_hosts_line(line: &str) -> Option<(&str, &str)> {
    let content = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let mut tokens = content.split(is_line_whitespace).filter(|t| !t.is_empty());
    let address = tokens.next()?;
    let hostname = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }
    Some((address, hostname))
}

/// ASCII whitespace plus vertical tab.
fn is_line_whitespace(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}

pub fn is_blocking_address(address: &str) -> bool {
    matches!(address, LOCALHOST_IPV4 | BOGUS_IPV4 | LOCALHOST_IPV6)
}

pub fn classify_line(line: &str, redirect_enabled: bool) -> Result<ClassifiedLine<'_>, LineRejection> {
    let (address, hostname) = split_hosts_line(line).ok_or(LineRejection::Malformed)?;

    if hostname == LOCALHOST_HOSTNAME {
        return Err(LineRejection::Localhost);
    }

    let list_type = if is_blocking_address(address) {
        ListType::Blocked
    } else if redirect_enabled {
        ListType::Redirected
    } else {
        return Err(LineRejection::RedirectDisabled);
    };

    Ok(ClassifiedLine {
        address,
        hostname,
        list_type,
    })
}

/// Strict IPv4 or IPv6 literal check. Hostnames never pass.
pub fn is_valid_ip(address: &str) -> bool {
    IpAddr::from_str(address).is_ok()
}

pub fn is_valid_hostname(hostname: &str) -> bool {
    let name = hostname.strip_suffix('.').unwrap_or(hostname);
    if name.is_empty() || name.len() > MAX_DOMAIN_LENGTH {
        return false;
    }

    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    if !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }

    labels.last().is_some_and(|tld| is_plausible_tld(tld))
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LENGTH
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

fn is_plausible_tld(tld: &str) -> bool {
    let is_punycode = tld.len() > 4
        && tld
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("xn--"));
    is_punycode || (tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_alphabetic()))
}

fn is_wildcard(c: char) -> bool {
    c == '*' || c == '?'
}

/// Validates a hostname that may contain `*` or `?` wildcards.
///
/// Wildcards may stand for an empty run or for real characters, so the name
/// is checked both with wildcards removed and with each wildcard replaced by
/// a letter. Either form being a valid domain accepts the pattern.
pub fn is_valid_wildcard_hostname(hostname: &str) -> bool {
    if !hostname.contains(is_wildcard) {
        return is_valid_hostname(hostname);
    }

    let cleared = hostname.replace(is_wildcard, "");
    let replaced = hostname.replace(is_wildcard, WILDCARD_PLACEHOLDER);
    is_valid_hostname(&cleared) || is_valid_hostname(&replaced)
}

pub fn is_valid_redirection(item: &HostListItem) -> bool {
    match (item.list_type, item.redirection.as_deref()) {
        (ListType::Blocked, _) => true,
        (ListType::Redirected, Some(ip)) => is_valid_ip(ip),
        (ListType::Redirected, None) => false,
    }
}

pub fn is_valid_host(item: &HostListItem) -> bool {
    is_valid_wildcard_hostname(&item.host)
}

/// Converts a wildcard host into an anchored regular expression.
///
/// `*` becomes `.*`, `?` becomes `.`, and regex metacharacters are escaped:
/// `ad*.example.com` turns into `^ad.*\.example\.com$`.
pub fn wildcard_to_regex(wildcard: &str) -> String {
    let mut regex = String::with_capacity(wildcard.len() + 8);
    regex.push('^');
    for c in wildcard.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            '(' | ')' | '[' | ']' | '$' | '^' | '.' | '{' | '}' | '|' | '\\' | '+' => {
                regex.push('\\');
                regex.push(c);
            }
            _ => regex.push(c),
        }
    }
    regex.push('$');
    regex
}
