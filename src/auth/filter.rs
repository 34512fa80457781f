// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The authentication filter: extraction composed with the authority.
//!
//! Per request the filter runs a short state machine:
//!
//! ```text
//! Start -> ExtractCredentials -> Invoke(authority) -> Continue | ShortCircuitFailure
//! ```
//!
//! Extraction failures (unsupported method, missing content type) short-
//! circuit before the authority is ever consulted. A successful extraction
//! always reaches the authority, even with empty credentials.
//!
//! Two embeddings are provided:
//!
//! - [`login`] — terminal route handler; writes the success or failure
//!   envelope itself
//! - [`authenticate`] — middleware; on success stores the [`Principal`]
//!   in request extensions and lets the chain continue, on failure writes
//!   the failure envelope. Paths listed in
//!   [`SecurityConfig::public_paths`](crate::config::SecurityConfig) pass
//!   through untouched.

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{ConnectInfo, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

use super::authority::{
    AuthenticationAuthority, AuthenticationRequest, Principal, RequestDetails,
};
use super::error::AuthError;
use super::extract::extract_credentials;
use super::handlers;
use crate::state::AppState;

/// Upper bound on a login body read. Larger bodies are truncated to the
/// empty pair rather than buffered.
const MAX_LOGIN_BODY_BYTES: usize = 64 * 1024;

/// Composes credential extraction with authority invocation.
pub struct AuthenticationFilter {
    authority: Arc<dyn AuthenticationAuthority>,
    post_only: bool,
}

impl AuthenticationFilter {
    /// New filter over the given authority. `post_only` defaults to true.
    pub fn new(authority: Arc<dyn AuthenticationAuthority>) -> Self {
        Self {
            authority,
            post_only: true,
        }
    }

    /// Permit non-POST login requests when set to false.
    pub fn post_only(mut self, post_only: bool) -> Self {
        self.post_only = post_only;
        self
    }

    /// Run the state machine for one request whose body has already been
    /// consumed into `body`.
    pub async fn attempt(&self, parts: &Parts, body: &[u8]) -> Result<Principal, AuthError> {
        let credentials =
            extract_credentials(&parts.method, &parts.headers, body, self.post_only)?;
        let request = AuthenticationRequest::new(credentials, request_details(parts));
        self.authority.authenticate(request).await
    }
}

/// Consume the request body exactly once. Read failures degrade to an
/// empty body, which extraction then turns into the empty pair.
async fn read_body(body: Body) -> Bytes {
    match to_bytes(body, MAX_LOGIN_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read login body, treating as empty");
            Bytes::new()
        }
    }
}

/// Caller context for the authority: peer address and correlation id.
fn request_details(parts: &Parts) -> RequestDetails {
    RequestDetails {
        remote_addr: parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|connect_info| connect_info.0),
        request_id: parts
            .headers
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
    }
}

/// Terminal embedding: the login route handler.
pub async fn login(State(state): State<AppState>, request: Request) -> Response {
    let filter =
        AuthenticationFilter::new(state.authority.clone()).post_only(state.security.post_only);

    let (parts, body) = request.into_parts();
    let bytes = read_body(body).await;

    match filter.attempt(&parts, &bytes).await {
        Ok(principal) => handlers::success_response(&principal),
        Err(err) => handlers::failure_response(err),
    }
}

/// Chain embedding: authenticate, then hand the request on with the
/// principal attached.
pub async fn authenticate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.security.is_public(request.uri().path()) {
        return next.run(request).await;
    }

    let filter =
        AuthenticationFilter::new(state.authority.clone()).post_only(state.security.post_only);

    let (parts, body) = request.into_parts();
    let bytes = read_body(body).await;

    match filter.attempt(&parts, &bytes).await {
        Ok(principal) => {
            let mut request = Request::from_parts(parts, Body::from(bytes));
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(err) => handlers::failure_response(err),
    }
}
