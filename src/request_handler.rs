//! Per-request guarding and upstream forwarding.
//!
//! This module contains the per-request pipeline of the proxy:
//! 1. Create a fresh [`RequestContext`] (the guard marker's lifetime is
//!    exactly one request)
//! 2. Evaluate the host group guard against the peer address
//! 3. On allow, forward the request to the upstream service with a
//!    shared pooled [`reqwest::Client`]
//!
//! Deny and configuration-error responses are built by
//! [`hostgate_core::guard`]; this module only supplies the downstream
//! continuation.

use std::convert::Infallible;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response, StatusCode, body::Incoming};

use hostgate_core::guard::{self, HostGroupGuard};
use hostgate_core::headers::{CONTENT_LENGTH, HOST, X_REAL_IP};
use hostgate_core::{ConfigProvider, HostGateError, RequestContext};

/// Handles one incoming HTTP request.
///
/// The client address is the peer socket's IP in string form. The guard
/// also strips an IPv6 `%zone` suffix before matching, for callers whose
/// address source includes one (peer IPs rendered here never do).
///
/// # Returns
///
/// Always returns `Ok` with either the upstream response (pass-through),
/// a redirect, a 403, or an upstream error response (502/504).
pub async fn handle_request<C: ConfigProvider>(
    req: Request<Incoming>,
    client_addr: String,
    host_guard: Arc<HostGroupGuard<C>>,
    forward_host: String,
    forward_port: u16,
    http_client: reqwest::Client,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let mut ctx = RequestContext::new();

    let response = guard::guard_request(
        host_guard.as_ref(),
        &mut ctx,
        &client_addr,
        req,
        |req| forward_request(req, &client_addr, &forward_host, forward_port, &http_client),
    )
    .await;

    Ok(response)
}

/// Forward an allowed request to the upstream service
async fn forward_request(
    req: Request<Incoming>,
    client_addr: &str,
    host: &str,
    port: u16,
    client: &reqwest::Client,
) -> Response<Full<Bytes>> {
    let (parts, body) = req.into_parts();
    let body_bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => {
            return guard::error_response(StatusCode::BAD_REQUEST, "Failed to read request body");
        }
    };

    // Construct destination URI
    let destination = format!(
        "http://{}:{}{}",
        host,
        port,
        parts.uri.path_and_query().map_or("", |pq| pq.as_str())
    );

    let method = match reqwest::Method::from_bytes(parts.method.as_str().as_bytes()) {
        Ok(method) => method,
        Err(_) => {
            return guard::error_response(
                StatusCode::METHOD_NOT_ALLOWED,
                "HTTP method not supported",
            );
        }
    };

    // Copy request headers (excluding host and content-length), telling
    // the upstream who the original client was
    let mut req_builder = client.request(method, &destination);
    for (name, value) in parts.headers.iter() {
        if name.as_str() != HOST
            && name.as_str() != CONTENT_LENGTH
            && let Ok(header_value) = value.to_str()
        {
            req_builder = req_builder.header(name.as_str(), header_value);
        }
    }
    req_builder = req_builder.header(X_REAL_IP, client_addr);

    if !body_bytes.is_empty() {
        req_builder = req_builder.body(body_bytes.to_vec());
    }

    match req_builder.send().await {
        Ok(upstream) => {
            let status = upstream.status();
            let headers = upstream.headers().clone();

            match upstream.bytes().await {
                Ok(body) => {
                    let mut response = match Response::builder()
                        .status(status.as_u16())
                        .body(Full::new(body))
                    {
                        Ok(response) => response,
                        Err(_) => {
                            return guard::error_response(
                                StatusCode::INTERNAL_SERVER_ERROR,
                                "Failed to build response",
                            );
                        }
                    };

                    // Copy response headers (skip hop-by-hop headers)
                    for (name, value) in headers.iter() {
                        if !is_hop_by_hop_header(name.as_str())
                            && let (Ok(hyper_name), Ok(hyper_value)) = (
                                hyper::header::HeaderName::from_bytes(name.as_str().as_bytes()),
                                hyper::header::HeaderValue::from_bytes(value.as_bytes()),
                            )
                        {
                            response.headers_mut().insert(hyper_name, hyper_value);
                        }
                    }

                    response
                }
                Err(_) => {
                    guard::error_response(StatusCode::BAD_GATEWAY, "Failed to read response body")
                }
            }
        }
        Err(err) if err.is_timeout() => {
            guard::error_response(StatusCode::GATEWAY_TIMEOUT, "Upstream service timeout")
        }
        Err(err) if err.is_connect() => guard::error_response(
            StatusCode::BAD_GATEWAY,
            "Could not connect to upstream service",
        ),
        Err(err) => {
            let err = HostGateError::UpstreamError(err.to_string());
            tracing::error!(error = %err, "upstream request failed");
            guard::error_response(err.status_code(), err.user_message())
        }
    }
}

/// Check if a header is a hop-by-hop header that shouldn't be forwarded
fn is_hop_by_hop_header(header_name: &str) -> bool {
    matches!(
        header_name,
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailers"
            | "transfer-encoding"
            | "upgrade"
    )
}
