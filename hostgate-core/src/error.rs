//! Error types for HostGate.
//!
//! This module provides a unified error type for all HostGate operations,
//! enabling better error handling and propagation throughout the codebase.
//!
//! A denied request is deliberately *not* an error: denial is a normal
//! terminal outcome expressed by [`AccessDecision`](crate::AccessDecision).
//! Errors here describe configuration defects and upstream failures, which
//! must stay distinguishable from a legitimate deny.

use thiserror::Error;

/// Result type alias for HostGate operations.
pub type Result<T> = std::result::Result<T, HostGateError>;

/// Unified error type for HostGate operations.
///
/// # Example
///
/// ```
/// use hostgate_core::error::{HostGateError, Result};
///
/// fn check_pattern(pattern: &str) -> Result<()> {
///     if pattern.ends_with('/') {
///         return Err(HostGateError::InvalidCidr {
///             pattern: pattern.into(),
///             reason: "missing prefix length".into(),
///         });
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Error)]
pub enum HostGateError {
    /// Malformed CIDR pattern in configuration. A configuration-authoring
    /// defect, never silently treated as "no match".
    #[error("Invalid CIDR pattern '{pattern}': {reason}")]
    InvalidCidr {
        /// The pattern string as configured.
        pattern: String,
        /// Parser diagnostic explaining what is wrong with it.
        reason: String,
    },

    /// Upstream forwarding failed.
    #[error("Upstream error: {0}")]
    UpstreamError(String),
}

impl HostGateError {
    /// Returns the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> hyper::StatusCode {
        use hyper::StatusCode;

        match self {
            Self::InvalidCidr { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UpstreamError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Returns a user-friendly error message suitable for HTTP responses.
    ///
    /// This method returns a sanitized message that doesn't expose
    /// internal details (such as configured patterns) to clients.
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidCidr { .. } => "Internal server error",
            Self::UpstreamError(_) => "Bad gateway",
        }
    }

    /// Returns true if this error should be logged at error level.
    ///
    /// Expected failures would be logged at warn level instead; both
    /// current variants describe server-side faults.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::InvalidCidr { .. } | Self::UpstreamError(_))
    }
}
