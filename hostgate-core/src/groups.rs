//! Group resolution for HostGate.
//!
//! Resolves a requested group name to its configured pattern list,
//! falling back to the `"default"` group when the requested group is not
//! configured. Resolution never fails: even a fully unconfigured default
//! group yields an empty pattern list, which denies everything
//! (fail-safe).

use tracing::warn;

use crate::defaults::DEFAULT_GROUP;
use crate::types::GroupsProvider;

const NO_PATTERNS: &[String] = &[];

/// Resolves a requested group name against the configuration.
///
/// An empty `requested` name means the default group. When the requested
/// group is not configured, a warning is logged once and the default
/// group is substituted. Returns the effective group name together with
/// its pattern list in configured order; a missing default group yields
/// an empty list, never an error.
///
/// # Example
///
/// ```
/// use hostgate_core::{HostGroupConfig, groups};
///
/// let config = HostGroupConfig::new().with_group("default", ["127.0.0.1"]);
///
/// let (name, patterns) = groups::resolve("", &config);
/// assert_eq!(name, "default");
/// assert_eq!(patterns, &["127.0.0.1".to_string()][..]);
/// ```
pub fn resolve<'c>(requested: &str, config: &'c impl GroupsProvider) -> (String, &'c [String]) {
    let requested = if requested.is_empty() {
        DEFAULT_GROUP
    } else {
        requested
    };

    let effective = if config.group_patterns(requested).is_some() {
        requested
    } else {
        warn!(group = requested, "group not found, using 'default'");
        DEFAULT_GROUP
    };

    let patterns = config.group_patterns(effective).unwrap_or(NO_PATTERNS);
    (effective.to_string(), patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestConfig, count_warnings};

    #[test]
    fn test_resolve_configured_group() {
        let config = TestConfig::new().with_group("intranet", vec!["10.0.0.0/8"]);

        let (name, patterns) = resolve("intranet", &config);
        assert_eq!(name, "intranet");
        assert_eq!(patterns, &["10.0.0.0/8".to_string()][..]);
    }

    #[test]
    fn test_resolve_empty_name_means_default() {
        let config = TestConfig::new().with_group("default", vec!["127.0.0.1"]);

        let (name, patterns) = resolve("", &config);
        assert_eq!(name, "default");
        assert_eq!(patterns, &["127.0.0.1".to_string()][..]);
    }

    #[test]
    fn test_resolve_unknown_group_falls_back_to_default() {
        let config = TestConfig::new()
            .with_group("default", vec!["127.0.0.1"])
            .with_group("intranet", vec!["10.0.0.0/8"]);

        let (name, patterns) = resolve("dmz", &config);
        assert_eq!(name, "default");
        assert_eq!(patterns, &["127.0.0.1".to_string()][..]);
    }

    #[test]
    fn test_resolve_unknown_group_without_default_is_empty() {
        let config = TestConfig::new().with_group("intranet", vec!["10.0.0.0/8"]);

        let (name, patterns) = resolve("dmz", &config);
        assert_eq!(name, "default");
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_resolve_fully_unconfigured_is_empty() {
        let config = TestConfig::new();

        let (name, patterns) = resolve("", &config);
        assert_eq!(name, "default");
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_resolve_unknown_group_warns_exactly_once() {
        let config = TestConfig::new().with_group("default", vec!["127.0.0.1"]);

        let ((name, _), warnings) = count_warnings(|| resolve("dmz", &config));
        assert_eq!(name, "default");
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_resolve_configured_group_emits_no_warning() {
        let config = TestConfig::new()
            .with_group("default", vec!["127.0.0.1"])
            .with_group("intranet", vec!["10.0.0.0/8"]);

        let (_, warnings) = count_warnings(|| resolve("intranet", &config));
        assert_eq!(warnings, 0);

        // The empty name means default, not a failed lookup.
        let (_, warnings) = count_warnings(|| resolve("", &config));
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let config = TestConfig::new()
            .with_group("default", vec!["127.0.0.1"])
            .with_group("Intranet", vec!["10.0.0.0/8"]);

        let (name, _) = resolve("intranet", &config);
        assert_eq!(name, "default");
    }

    #[test]
    fn test_resolve_preserves_pattern_order() {
        let config =
            TestConfig::new().with_group("g", vec!["192.168.1.5", "10.0.0.0/8", "172.16.0.1"]);

        let (_, patterns) = resolve("g", &config);
        assert_eq!(
            patterns,
            &[
                "192.168.1.5".to_string(),
                "10.0.0.0/8".to_string(),
                "172.16.0.1".to_string()
            ][..]
        );
    }
}
