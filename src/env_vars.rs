//! Environment variable names used throughout HostGate configuration

/// Host group definitions: `name=pattern|pattern;name2=pattern`.
/// Patterns are literal IPs or IPv4 CIDR ranges.
pub const HOST_GROUPS: &str = "HOST_GROUPS";

/// Optional URL denied clients are redirected to. When unset, denied
/// clients receive 403 Forbidden.
pub const HOST_GROUPS_REDIRECT: &str = "HOST_GROUPS_REDIRECT";

/// Get all environment variable names for documentation/validation
pub fn all_env_vars() -> &'static [&'static str] {
    &[HOST_GROUPS, HOST_GROUPS_REDIRECT]
}
