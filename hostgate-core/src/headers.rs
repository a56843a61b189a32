//! HTTP header constants for HostGate.
//!
//! This module centralizes all HTTP header names used throughout the
//! codebase, avoiding magic strings and ensuring consistency.

/// Content-Type header.
pub const CONTENT_TYPE: &str = "content-type";

/// Location header (for redirect responses).
pub const LOCATION: &str = "location";

/// Host header (not forwarded upstream).
pub const HOST: &str = "host";

/// Content-Length header (recomputed by the upstream client).
pub const CONTENT_LENGTH: &str = "content-length";

/// X-Real-IP header - injected by HostGate for upstream services.
pub const X_REAL_IP: &str = "x-real-ip";
