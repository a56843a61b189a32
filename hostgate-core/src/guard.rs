//! Access-guard orchestration for HostGate.
//!
//! This module ties the matcher and group resolver together into a single
//! per-request evaluation:
//! 1. Skip straight to the downstream handler when the request is already
//!    marked as evaluated (composition safety)
//! 2. Normalize the client address (strip IPv6 zone suffix)
//! 3. Resolve the guard's group to its pattern list
//! 4. Test patterns in configured order, first match wins
//! 5. Allow, or deny with a redirect or forbidden response
//!
//! The guard holds no mutable state; the only mutation is the marker on
//! the per-request [`RequestContext`].

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Request, Response, StatusCode};
use tracing::{debug, error, warn};

use crate::error::Result;
use crate::headers::{CONTENT_TYPE, LOCATION};
use crate::types::{ConfigProvider, RequestContext};
use crate::{groups, matcher};

/// Outcome of a single guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessDecision {
    /// The client address matched the resolved group; the request
    /// proceeds downstream.
    Allowed,
    /// No pattern matched. Denied clients are redirected when a target is
    /// configured, otherwise they receive a forbidden response.
    Denied {
        /// Redirect target captured when the guard was constructed.
        redirect: Option<String>,
    },
}

/// Guards requests against a single named host group.
///
/// A guard is constructed once with the group name it protects and a
/// shared configuration snapshot, then applied per request. The deny
/// redirect target is read from configuration at construction and held
/// as an immutable field, so no request-time initialization races exist.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use hostgate_core::{AccessDecision, HostGroupConfig, HostGroupGuard, RequestContext};
///
/// let config = HostGroupConfig::new().with_group("intranet", ["10.0.0.0/8"]);
/// let guard = HostGroupGuard::new("intranet", Arc::new(config));
///
/// let mut ctx = RequestContext::new();
/// let decision = guard.evaluate(&mut ctx, "10.5.5.5", "/status").unwrap();
/// assert_eq!(decision, AccessDecision::Allowed);
/// ```
#[derive(Clone, Debug)]
pub struct HostGroupGuard<C> {
    group: String,
    redirect: Option<String>,
    config: Arc<C>,
}

impl<C: ConfigProvider> HostGroupGuard<C> {
    /// Creates a guard for `group`. An empty group name means the default
    /// group is applied at resolution time.
    pub fn new(group: impl Into<String>, config: Arc<C>) -> Self {
        let redirect = config.redirect_url().map(str::to_owned);
        Self {
            group: group.into(),
            redirect,
            config,
        }
    }

    /// Returns the group name this guard protects.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Evaluates access for one request.
    ///
    /// Evaluation happens at most once per request: a context already
    /// carrying the guard marker short-circuits to `Allowed` without
    /// touching patterns or emitting diagnostics. Otherwise the marker is
    /// set and the zone-stripped client address is tested against the
    /// resolved group's patterns in configured order, stopping at the
    /// first match.
    ///
    /// `resource` identifies the requested resource in denial diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`HostGateError::InvalidCidr`](crate::HostGateError::InvalidCidr)
    /// when a malformed CIDR pattern is reached before any earlier pattern
    /// matches. This is a configuration error, distinguishable from a deny.
    pub fn evaluate(
        &self,
        ctx: &mut RequestContext,
        client_addr: &str,
        resource: &str,
    ) -> Result<AccessDecision> {
        if ctx.is_evaluated() {
            return Ok(AccessDecision::Allowed);
        }
        ctx.mark_evaluated();

        let client = matcher::strip_zone(client_addr);
        let (group, patterns) = groups::resolve(&self.group, self.config.as_ref());

        for pattern in patterns {
            if matcher::matches(client, pattern)? {
                debug!(address = client, group = group.as_str(), "access granted");
                return Ok(AccessDecision::Allowed);
            }
        }

        warn!(address = client, resource, "access denied");
        Ok(AccessDecision::Denied {
            redirect: self.redirect.clone(),
        })
    }
}

/// Applies a guard to a hyper request.
///
/// On allow, the `next` continuation is invoked with the request and its
/// response is forwarded unchanged. On deny, a redirect or forbidden
/// response is produced. A configuration error (malformed CIDR pattern)
/// yields a sanitized server error rather than being conflated with a
/// deny.
pub async fn guard_request<C, B, F, Fut>(
    guard: &HostGroupGuard<C>,
    ctx: &mut RequestContext,
    client_addr: &str,
    req: Request<B>,
    next: F,
) -> Response<Full<Bytes>>
where
    C: ConfigProvider,
    F: FnOnce(Request<B>) -> Fut,
    Fut: Future<Output = Response<Full<Bytes>>>,
{
    let resource = req.uri().to_string();
    match guard.evaluate(ctx, client_addr, &resource) {
        Ok(AccessDecision::Allowed) => next(req).await,
        Ok(AccessDecision::Denied { redirect }) => match redirect {
            Some(url) => redirect_response(&url),
            None => error_response(StatusCode::FORBIDDEN, "Access denied"),
        },
        Err(err) => {
            if err.is_server_error() {
                error!(error = %err, "guard evaluation failed");
            } else {
                warn!(error = %err, "guard evaluation failed");
            }
            error_response(err.status_code(), err.user_message())
        }
    }
}

/// Builds a plain text response with the given status.
pub fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain")
        .body(Full::new(Bytes::from(message.to_string())))
        .unwrap_or_else(|_| {
            // Fallback response if builder fails (extremely unlikely)
            Response::new(Full::new(Bytes::from("Internal Server Error")))
        })
}

/// Builds a `303 See Other` redirect to the configured deny target.
///
/// Falls back to a server error if the target cannot be encoded as a
/// header value.
pub fn redirect_response(url: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(LOCATION, url)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|_| {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        })
}
