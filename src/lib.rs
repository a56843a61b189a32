//! HostGate - A gatekeeper for host-group restricted endpoints
//!
//! A guarding reverse proxy that only lets configured groups of hosts
//! through to the upstream service.
//!
//! # Overview
//!
//! HostGate sits in front of an HTTP service and checks every request's
//! client address against a named group of allowed patterns (literal IPs
//! or IPv4 CIDR ranges) before forwarding. Denied clients receive a
//! forbidden response, or a redirect when one is configured.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hostgate::config;
//! use hostgate_core::HostGroupGuard;
//!
//! // Configuration is read from the environment once at startup
//! let host_groups = config::get_host_group_config();
//! let guard = HostGroupGuard::new("intranet", Arc::new(host_groups.clone()));
//! ```
//!
//! # Modules
//!
//! - [`config`] - Configuration management from environment variables
//! - [`env_vars`] - Environment variable constants
//! - [`request_handler`] - Per-request guarding and upstream forwarding
//! - [`server`] - Server utilities and startup info
//! - [`args`] - Command line argument parsing
//!
//! # Re-exports from hostgate-core
//!
//! Core functionality is provided by the `hostgate-core` crate:
//! - [`matcher`] - Address matching against literal and CIDR patterns
//! - [`groups`] - Group resolution with default-group fallback
//! - [`guard`] - Guard orchestration and deny responses

#![forbid(unsafe_code)]

pub mod args;
pub mod config;
pub mod env_vars;
pub mod request_handler;
pub mod server;

// Re-export hostgate-core modules
pub use hostgate_core::groups;
pub use hostgate_core::guard;
pub use hostgate_core::matcher;
pub use hostgate_core::types;

// Re-export commonly used items at crate root
pub use hostgate_core::{
    AccessDecision, ConfigProvider, GroupsProvider, HostGateError, HostGroupConfig,
    HostGroupGuard, RedirectProvider, RequestContext,
};
