//! Test utilities for HostGate.
//!
//! This module provides shared test configuration types used across unit
//! tests. It is only compiled when running tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

use crate::types::{GroupsProvider, RedirectProvider};

/// Shared test configuration for unit tests.
///
/// Implements the configuration provider traits with builder methods for
/// customization.
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    pub groups: HashMap<String, Vec<String>>,
    pub redirect: Option<String>,
}

impl TestConfig {
    /// Create an empty test configuration (no groups, no redirect).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group with its ordered pattern list.
    pub fn with_group(mut self, name: &str, patterns: Vec<&str>) -> Self {
        self.groups.insert(
            name.to_string(),
            patterns.into_iter().map(String::from).collect(),
        );
        self
    }

    /// Configure the deny redirect URL.
    pub fn with_redirect(mut self, url: &str) -> Self {
        self.redirect = Some(url.to_string());
        self
    }
}

struct WarnCounter {
    warnings: Arc<AtomicUsize>,
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.warnings.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Runs `f` under a thread-local subscriber that counts `warn!` events.
///
/// Returns the closure result together with the number of warnings the
/// closure emitted. Only events from the current thread are counted, so
/// parallel tests do not interfere.
pub fn count_warnings<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let warnings = Arc::new(AtomicUsize::new(0));
    let layer = WarnCounter {
        warnings: Arc::clone(&warnings),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, warnings.load(Ordering::Relaxed))
}

impl GroupsProvider for TestConfig {
    fn group_patterns(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }
}

impl RedirectProvider for TestConfig {
    fn redirect_url(&self) -> Option<&str> {
        self.redirect.as_deref()
    }
}
