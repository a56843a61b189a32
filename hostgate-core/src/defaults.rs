//! Default values and configuration key constants for HostGate.
//!
//! This module centralizes the group names and configuration keys used
//! throughout HostGate, ensuring consistency between production code and tests.

/// Name of the group used when no group is requested or the requested
/// group is not configured.
pub const DEFAULT_GROUP: &str = "default";

/// Configuration key prefix for group pattern lists
/// (`restricttohostgroup.groups.<name>`).
pub const CONFIG_GROUPS_PREFIX: &str = "restricttohostgroup.groups.";

/// Configuration key holding the optional URL denied clients are
/// redirected to.
pub const CONFIG_REDIRECT_KEY: &str = "restricttohostgroup.redirect";
