//! HostGate Core - Reusable host-group access guard components
//!
//! This crate provides the core functionality for restricting HTTP endpoints
//! to named groups of allowed hosts:
//! - Address matching against literal IPs and IPv4 CIDR ranges
//! - Group resolution with fallback to a default group
//! - Guard orchestration with a once-per-request evaluation guarantee
//!
//! # Overview
//!
//! `hostgate-core` is designed to be framework-agnostic and can be integrated
//! into any Rust application. Configuration is provided via the
//! [`ConfigProvider`] trait family, allowing flexible configuration from any
//! source; [`HostGroupConfig`] is a ready-made implementation backed by a
//! plain map.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use hostgate_core::{AccessDecision, HostGroupConfig, HostGroupGuard, RequestContext};
//!
//! let config = HostGroupConfig::new()
//!     .with_group("intranet", ["10.0.0.0/8", "192.168.1.5"]);
//!
//! let guard = HostGroupGuard::new("intranet", Arc::new(config));
//! let mut ctx = RequestContext::new();
//!
//! let decision = guard.evaluate(&mut ctx, "10.5.5.5", "/admin").unwrap();
//! assert_eq!(decision, AccessDecision::Allowed);
//! ```
//!
//! # Modules
//!
//! - [`types`] - Configuration snapshot, provider traits, and per-request state
//! - [`error`] - Error types and result aliases
//! - [`headers`] - HTTP header constants
//! - [`matcher`] - Address matching against literal and CIDR patterns
//! - [`groups`] - Group resolution with default-group fallback
//! - [`guard`] - Guard orchestration and deny response construction

#![forbid(unsafe_code)]

pub mod defaults;
pub mod error;
pub mod groups;
pub mod guard;
pub mod headers;
pub mod matcher;
#[cfg(test)]
pub mod test_utils;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{HostGateError, Result};
pub use guard::{AccessDecision, HostGroupGuard};
pub use types::{
    // Aggregated configuration trait
    ConfigProvider,
    // Composable configuration traits
    GroupsProvider,
    // Map-backed configuration snapshot
    HostGroupConfig,
    RedirectProvider,
    // Per-request evaluation state
    RequestContext,
};
