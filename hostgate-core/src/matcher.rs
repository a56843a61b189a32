//! Address matching for HostGate.
//!
//! This module decides whether a single client address matches a single
//! configured pattern. A pattern is either a literal IP address or an
//! IPv4 CIDR expression (`address/prefix`).
//!
//! # Matching Rules
//!
//! - A pattern containing `/` is treated as an IPv4 CIDR range, but only
//!   when the client address is not IPv6-shaped (contains no `:`). IPv6
//!   CIDR matching is unsupported: an IPv6 client falls through to literal
//!   equality, which a `/`-containing pattern can never satisfy.
//! - CIDR containment is standard prefix containment: the client address
//!   matches when its first `prefix` bits equal the network's.
//! - All other cases compare the zone-stripped client address and the
//!   pattern for exact string equality.
//!
//! Patterns are parsed lazily at match time; a malformed CIDR surfaces as
//! [`HostGateError::InvalidCidr`] rather than a silent non-match. Use
//! [`validate_pattern`] to catch such defects eagerly at startup.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::error::{HostGateError, Result};

/// Returns `true` if the address looks like IPv6 (contains a `:`).
pub fn is_ipv6_shaped(addr: &str) -> bool {
    addr.contains(':')
}

/// Strips the zone index (`%zone`) from an IPv6-shaped address.
///
/// IPv6 addresses may carry a zone suffix identifying a network
/// interface (e.g. `fe80::1%eth0`), which is irrelevant to matching.
/// Addresses that are not IPv6-shaped are returned unchanged.
pub fn strip_zone(addr: &str) -> &str {
    if is_ipv6_shaped(addr) {
        match addr.find('%') {
            Some(idx) => &addr[..idx],
            None => addr,
        }
    } else {
        addr
    }
}

/// Tests a client address against a single pattern.
///
/// The client address is zone-stripped before any comparison. An empty
/// client address never matches. A client address that fails to parse as
/// IPv4 never matches a CIDR pattern; only a malformed *pattern* is an
/// error.
///
/// # Errors
///
/// Returns [`HostGateError::InvalidCidr`] when the pattern contains `/`
/// but is not valid IPv4 CIDR syntax.
///
/// # Example
///
/// ```
/// use hostgate_core::matcher;
///
/// assert!(matcher::matches("10.5.5.5", "10.0.0.0/8").unwrap());
/// assert!(matcher::matches("fe80::1%eth0", "fe80::1").unwrap());
/// assert!(!matcher::matches("192.168.1.6", "192.168.1.5").unwrap());
/// ```
pub fn matches(client_addr: &str, pattern: &str) -> Result<bool> {
    let client = strip_zone(client_addr);
    if client.is_empty() {
        return Ok(false);
    }

    if pattern.contains('/') && !is_ipv6_shaped(client) {
        let net = parse_cidr(pattern)?;
        return Ok(client
            .parse::<Ipv4Addr>()
            .map(|ip| net.contains(&ip))
            .unwrap_or(false));
    }

    Ok(client == pattern)
}

/// Checks a single configured pattern for valid syntax.
///
/// Patterns without `/` are literal addresses and always pass; `/`-carrying
/// patterns must parse as IPv4 CIDR. Intended for eager startup validation
/// via [`HostGroupConfig::validate`](crate::HostGroupConfig::validate).
pub fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.contains('/') {
        parse_cidr(pattern)?;
    }
    Ok(())
}

fn parse_cidr(pattern: &str) -> Result<Ipv4Net> {
    pattern
        .trim()
        .parse::<Ipv4Net>()
        .map_err(|err| HostGateError::InvalidCidr {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })
}
