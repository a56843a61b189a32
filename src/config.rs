//! Configuration management for HostGate.
//!
//! This module handles loading and caching configuration from environment
//! variables. The host group snapshot is computed once at first access and
//! cached for the lifetime of the application using
//! `once_cell::sync::Lazy`.
//!
//! # Caching
//!
//! Configuration is read from environment variables only once, before any
//! request handling begins. This provides:
//! - Consistent configuration throughout the application lifetime
//! - No runtime overhead from repeated environment lookups
//! - Thread-safe, lock-free sharing across concurrent requests
//!
//! # Group Syntax
//!
//! `HOST_GROUPS` holds all group definitions in one value, preserving the
//! case of group names (which environment variable *names* cannot):
//!
//! ```text
//! HOST_GROUPS="default=127.0.0.1;intranet=10.0.0.0/8|192.168.1.5"
//! ```
//!
//! Groups are separated by `;`, patterns within a group by `|`. Malformed
//! entries are skipped with a warning; malformed CIDR patterns inside an
//! otherwise well-formed entry are caught by the eager
//! [`HostGroupConfig::validate`] step at startup.

use std::env;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::env_vars;
use hostgate_core::HostGroupConfig;

static HOST_GROUP_CONFIG: Lazy<HostGroupConfig> = Lazy::new(compute_host_group_config);

/// Returns the cached host group configuration.
///
/// Configuration is read from environment variables on first access:
/// - `HOST_GROUPS`: group definitions (`name=p1|p2;name2=p3`)
/// - `HOST_GROUPS_REDIRECT`: optional deny redirect URL
pub fn get_host_group_config() -> &'static HostGroupConfig {
    &HOST_GROUP_CONFIG
}

/// Compute the host group configuration from environment variables.
fn compute_host_group_config() -> HostGroupConfig {
    let defs = env::var(env_vars::HOST_GROUPS).unwrap_or_default();
    let mut config = parse_group_defs(&defs);

    let redirect = env::var(env_vars::HOST_GROUPS_REDIRECT)
        .ok()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());
    config.set_redirect(redirect);

    config
}

/// Parses `name=p1|p2;name2=p3` group definitions.
///
/// Entries without a `=` or with an empty group name are skipped with a
/// warning. Patterns are trimmed and empty patterns dropped, preserving
/// the order of the remaining ones.
fn parse_group_defs(defs: &str) -> HostGroupConfig {
    let mut config = HostGroupConfig::new();

    for entry in defs.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.split_once('=') {
            Some((name, patterns)) if !name.trim().is_empty() => {
                let patterns = patterns
                    .split('|')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect();
                config.insert_group(name.trim().to_string(), patterns);
            }
            _ => warn!(entry, "ignoring malformed host group entry"),
        }
    }

    config
}
