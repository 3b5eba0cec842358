//! Best-effort mailbox validation against DNS.
//!
//! This is a helper for callers that want to reject undeliverable addresses
//! up front; the send path never consults it. A mailbox is considered valid
//! when its domain has MX records, or, failing that, resolves to at least
//! one IP address.

use hickory_resolver::Resolver;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidateError {
    /// The mailbox failed the structural shape check.
    #[error("mailbox {0:?} is not a plausible address")]
    BadMailbox(String),

    /// The system DNS resolver could not be set up.
    #[error("failed to initialise DNS resolver: {0}")]
    Resolver(#[from] std::io::Error),

    /// The IP lookup failed outright (e.g. NXDOMAIN).
    #[error("DNS lookup failed: {0}")]
    Lookup(#[from] hickory_resolver::error::ResolveError),

    /// The domain exists but has neither MX records nor assigned IPs.
    #[error("no mail servers found for domain {0:?}")]
    NoMailServers(String),
}

/// Checks a mailbox shape without touching the network (RFC 5322,
/// simplified).
pub fn is_valid_mailbox(mailbox: &str) -> bool {
    if mailbox.is_empty() {
        return false;
    }
    let re = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap();
    if !re.is_match(mailbox) {
        return false;
    }
    let mut parts = mailbox.split('@');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
    )
}

/// Validates a mailbox: structural check, then an MX lookup on the domain,
/// falling back to a plain IP lookup when no MX records exist.
///
/// MX lookup failures are ignored (the fallback decides); IP lookup
/// failures are propagated.
pub fn validate(mailbox: &str) -> Result<(), ValidateError> {
    if !is_valid_mailbox(mailbox) {
        return Err(ValidateError::BadMailbox(mailbox.to_string()));
    }
    let domain = mailbox
        .split('@')
        .nth(1)
        .expect("shape check guarantees a domain part");

    let resolver = Resolver::from_system_conf()?;

    if let Ok(mx) = resolver.mx_lookup(domain) {
        if mx.iter().next().is_some() {
            log::debug!("domain {domain} has MX records");
            return Ok(());
        }
    }

    let ips = resolver.lookup_ip(domain)?;
    if ips.iter().next().is_some() {
        log::debug!("domain {domain} has no MX records but resolves");
        Ok(())
    } else {
        Err(ValidateError::NoMailServers(domain.to_string()))
    }
}
