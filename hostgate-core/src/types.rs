//! Type definitions for HostGate configuration and per-request state.
//!
//! This module contains the core types used throughout HostGate for:
//! - Configuration injection via composable provider traits
//! - The map-backed [`HostGroupConfig`] configuration snapshot
//! - The [`RequestContext`] carrying per-request evaluation state

use std::collections::HashMap;

use crate::defaults::{CONFIG_GROUPS_PREFIX, CONFIG_REDIRECT_KEY};
use crate::error::Result;
use crate::matcher;

// ============================================================================
// Composable Configuration Traits
// ============================================================================

/// Configuration source for host group pattern lists.
///
/// Implement this trait to supply group definitions from any source.
pub trait GroupsProvider: Send + Sync {
    /// Returns the ordered pattern list for a group, or `None` if the
    /// group is not configured. Pattern order is significant: the guard
    /// tests patterns in this order and stops on the first match.
    fn group_patterns(&self, group: &str) -> Option<&[String]>;
}

/// Configuration source for the deny redirect target.
pub trait RedirectProvider: Send + Sync {
    /// Returns the URL denied clients are redirected to, if configured.
    /// When `None`, denied requests receive a forbidden response instead.
    fn redirect_url(&self) -> Option<&str>;
}

/// Trait for complete configuration injection.
///
/// This trait combines the specialized configuration traits into one.
/// Any type implementing [`GroupsProvider`] and [`RedirectProvider`] is a
/// `ConfigProvider` via the blanket implementation.
pub trait ConfigProvider: GroupsProvider + RedirectProvider {}

impl<T> ConfigProvider for T where T: GroupsProvider + RedirectProvider {}

// ============================================================================
// HostGroupConfig - map-backed configuration snapshot
// ============================================================================

/// Immutable configuration snapshot mapping group names to allowed
/// address patterns.
///
/// Group names are case-sensitive. Each pattern is either a literal IP
/// address or an IPv4 CIDR expression (`address/prefix`). The snapshot is
/// built once at startup and shared read-only across requests; it carries
/// no interior mutability and needs no locking.
///
/// # Example
///
/// ```
/// use hostgate_core::HostGroupConfig;
///
/// let config = HostGroupConfig::new()
///     .with_group("default", ["127.0.0.1"])
///     .with_group("intranet", ["10.0.0.0/8", "192.168.1.5"])
///     .with_redirect("https://example.com/denied");
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default)]
pub struct HostGroupConfig {
    groups: HashMap<String, Vec<String>>,
    redirect: Option<String>,
}

impl HostGroupConfig {
    /// Creates an empty configuration (no groups, no redirect).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a group with its ordered pattern list.
    pub fn with_group<I, S>(mut self, name: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_group(name.into(), patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the deny redirect URL.
    pub fn with_redirect(mut self, url: impl Into<String>) -> Self {
        self.redirect = Some(url.into());
        self
    }

    /// Inserts a group, replacing any previous definition of the same name.
    pub fn insert_group(&mut self, name: String, patterns: Vec<String>) {
        self.groups.insert(name, patterns);
    }

    /// Sets or clears the deny redirect URL.
    pub fn set_redirect(&mut self, url: Option<String>) {
        self.redirect = url;
    }

    /// Builds a configuration from dotted property entries:
    /// `restricttohostgroup.groups.<name>` keys hold comma-separated
    /// pattern lists, `restricttohostgroup.redirect` the deny redirect
    /// URL. Unrelated keys are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use hostgate_core::{GroupsProvider, HostGroupConfig};
    ///
    /// let config = HostGroupConfig::from_properties([
    ///     ("restricttohostgroup.groups.intranet", "10.0.0.0/8, 192.168.1.5"),
    ///     ("restricttohostgroup.redirect", "https://example.com/denied"),
    /// ]);
    ///
    /// assert!(config.group_patterns("intranet").is_some());
    /// ```
    pub fn from_properties<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::new();
        for (key, value) in entries {
            let (key, value) = (key.as_ref(), value.as_ref());
            if let Some(name) = key.strip_prefix(CONFIG_GROUPS_PREFIX) {
                if !name.is_empty() {
                    config.insert_group(name.to_string(), parse_comma_separated(value));
                }
            } else if key == CONFIG_REDIRECT_KEY {
                let url = value.trim();
                if !url.is_empty() {
                    config.redirect = Some(url.to_string());
                }
            }
        }
        config
    }

    /// Returns the number of configured groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns the configured group names in unspecified order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Eagerly checks every `/`-containing pattern for valid IPv4 CIDR
    /// syntax, returning the first defect found.
    ///
    /// Intended for startup validation so that malformed patterns fail
    /// fast as an operator-facing error instead of failing individual
    /// requests at match time.
    pub fn validate(&self) -> Result<()> {
        for patterns in self.groups.values() {
            for pattern in patterns {
                matcher::validate_pattern(pattern)?;
            }
        }
        Ok(())
    }
}

impl GroupsProvider for HostGroupConfig {
    fn group_patterns(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }
}

impl RedirectProvider for HostGroupConfig {
    fn redirect_url(&self) -> Option<&str> {
        self.redirect.as_deref()
    }
}

/// Parses a comma-separated string into a Vec of trimmed strings.
///
/// Filters out empty entries after trimming.
fn parse_comma_separated(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// ============================================================================
// RequestContext - per-request evaluation state
// ============================================================================

/// Per-request state passed explicitly through the handler chain.
///
/// Carries the guard marker that keeps access evaluation to at most once
/// per request, even when the same guard is applied again through
/// composition. Created empty at request start and discarded with the
/// request; it is never shared across requests, so no locking applies.
#[derive(Debug, Default)]
pub struct RequestContext {
    evaluated: bool,
}

impl RequestContext {
    /// Creates a fresh context with the guard marker unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a guard has already evaluated this request.
    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// Sets the guard marker.
    pub fn mark_evaluated(&mut self) {
        self.evaluated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // HostGroupConfig builder tests
    // ===========================================

    #[test]
    fn test_config_with_group() {
        let config = HostGroupConfig::new().with_group("intranet", ["10.0.0.0/8", "192.168.1.5"]);

        assert_eq!(
            config.group_patterns("intranet"),
            Some(&["10.0.0.0/8".to_string(), "192.168.1.5".to_string()][..])
        );
        assert_eq!(config.group_patterns("unknown"), None);
    }

    #[test]
    fn test_config_group_names_are_case_sensitive() {
        let config = HostGroupConfig::new().with_group("Intranet", ["10.0.0.1"]);

        assert!(config.group_patterns("Intranet").is_some());
        assert!(config.group_patterns("intranet").is_none());
    }

    #[test]
    fn test_config_redirect() {
        let config = HostGroupConfig::new();
        assert_eq!(config.redirect_url(), None);

        let config = config.with_redirect("https://example.com/denied");
        assert_eq!(config.redirect_url(), Some("https://example.com/denied"));
    }

    #[test]
    fn test_config_insert_group_replaces() {
        let mut config = HostGroupConfig::new().with_group("default", ["127.0.0.1"]);
        config.insert_group("default".to_string(), vec!["10.0.0.1".to_string()]);

        assert_eq!(
            config.group_patterns("default"),
            Some(&["10.0.0.1".to_string()][..])
        );
    }

    #[test]
    fn test_config_preserves_pattern_order() {
        let config =
            HostGroupConfig::new().with_group("g", ["192.168.1.5", "10.0.0.0/8", "172.16.0.1"]);

        let patterns = config.group_patterns("g").unwrap();
        assert_eq!(patterns[0], "192.168.1.5");
        assert_eq!(patterns[1], "10.0.0.0/8");
        assert_eq!(patterns[2], "172.16.0.1");
    }

    // ===========================================
    // from_properties tests
    // ===========================================

    #[test]
    fn test_from_properties_groups_and_redirect() {
        let config = HostGroupConfig::from_properties([
            ("restricttohostgroup.groups.default", "127.0.0.1"),
            (
                "restricttohostgroup.groups.intranet",
                "10.0.0.0/8, 192.168.1.5",
            ),
            ("restricttohostgroup.redirect", "https://example.com/denied"),
        ]);

        assert_eq!(config.group_count(), 2);
        assert_eq!(
            config.group_patterns("intranet"),
            Some(&["10.0.0.0/8".to_string(), "192.168.1.5".to_string()][..])
        );
        assert_eq!(config.redirect_url(), Some("https://example.com/denied"));
    }

    #[test]
    fn test_from_properties_trims_and_drops_empty_patterns() {
        let config = HostGroupConfig::from_properties([(
            "restricttohostgroup.groups.g",
            " 10.0.0.1 ,, 192.168.1.5 , ",
        )]);

        assert_eq!(
            config.group_patterns("g"),
            Some(&["10.0.0.1".to_string(), "192.168.1.5".to_string()][..])
        );
    }

    #[test]
    fn test_from_properties_ignores_unrelated_keys() {
        let config = HostGroupConfig::from_properties([
            ("http.port", "9000"),
            ("restricttohostgroup.groups.g", "10.0.0.1"),
            ("application.secret", "hunter2"),
        ]);

        assert_eq!(config.group_count(), 1);
    }

    #[test]
    fn test_from_properties_empty_redirect_means_none() {
        let config = HostGroupConfig::from_properties([("restricttohostgroup.redirect", "  ")]);
        assert_eq!(config.redirect_url(), None);
    }

    #[test]
    fn test_from_properties_ignores_empty_group_name() {
        let config = HostGroupConfig::from_properties([("restricttohostgroup.groups.", "1.2.3.4")]);
        assert_eq!(config.group_count(), 0);
    }

    // ===========================================
    // validate tests
    // ===========================================

    #[test]
    fn test_validate_accepts_literals_and_cidrs() {
        let config = HostGroupConfig::new()
            .with_group("default", ["127.0.0.1", "fe80::1"])
            .with_group("intranet", ["10.0.0.0/8", "192.168.1.0/24"]);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed_cidr() {
        let config = HostGroupConfig::new().with_group("g", ["10.0.0.0/33"]);
        assert!(config.validate().is_err());

        let config = HostGroupConfig::new().with_group("g", ["not-a-net/8"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_config() {
        assert!(HostGroupConfig::new().validate().is_ok());
    }

    // ===========================================
    // RequestContext tests
    // ===========================================

    #[test]
    fn test_request_context_starts_unevaluated() {
        let ctx = RequestContext::new();
        assert!(!ctx.is_evaluated());
    }

    #[test]
    fn test_request_context_mark_is_sticky() {
        let mut ctx = RequestContext::new();
        ctx.mark_evaluated();
        assert!(ctx.is_evaluated());
        ctx.mark_evaluated();
        assert!(ctx.is_evaluated());
    }
}
