//! Address Module
//!
//! Normalizes `host[:port]` strings into the host and port the client connects to.

use crate::cache::DEFAULT_PORT;
use crate::error::{CacheError, Result};

// == Normalize ==
/// Appends the default port when the address carries no port delimiter.
///
/// Any `:` counts as a delimiter, so bare IPv6 literals must be written
/// bracketed with an explicit port (`[::1]:6379`).
pub fn normalize_address(address: &str) -> String {
    if address.contains(':') {
        address.to_string()
    } else {
        format!("{}:{}", address, DEFAULT_PORT)
    }
}

// == Parse ==
/// Splits a (normalized) address into host and port.
pub fn parse_address(address: &str) -> Result<(String, u16)> {
    let normalized = normalize_address(address.trim());

    let (host, port) = normalized
        .rsplit_once(':')
        .ok_or_else(|| CacheError::InvalidAddress(address.to_string()))?;

    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);

    if host.is_empty() {
        return Err(CacheError::InvalidAddress(format!(
            "{}: missing host",
            address
        )));
    }

    // An unbracketed host with a colon is an IPv6 literal whose last group was taken as the port
    if host.contains(':') && !normalized.starts_with('[') {
        return Err(CacheError::InvalidAddress(format!(
            "{}: IPv6 addresses must be bracketed",
            address
        )));
    }

    let port = port
        .parse::<u16>()
        .map_err(|_| CacheError::InvalidAddress(format!("{}: invalid port", address)))?;

    Ok((host.to_string(), port))
}
