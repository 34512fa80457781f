// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The credential-verification authority.
//!
//! The filter never judges credentials itself — it always asks an
//! [`AuthenticationAuthority`], even when extraction produced the empty
//! pair. That keeps exactly one source of truth for what counts as valid
//! credentials.
//!
//! [`StaticAuthority`] is the built-in implementation: an in-memory user
//! table seeded from the environment at startup. Deployments with a real
//! user store implement the trait and swap it in through [`crate::state::AppState`].

use std::collections::HashMap;
use std::net::SocketAddr;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use super::credentials::Credentials;
use super::error::AuthError;

/// Caller context attached to every authority invocation, for audit and
/// log correlation downstream.
#[derive(Debug, Clone, Default)]
pub struct RequestDetails {
    /// Peer address of the connection, when the transport exposes it.
    pub remote_addr: Option<SocketAddr>,
    /// Correlation id: the request's `x-request-id`, or freshly generated
    /// for requests that did not pass the request-id layer.
    pub request_id: String,
}

/// The outgoing request handed to the authority: the extracted pair plus
/// caller context.
#[derive(Debug, Clone)]
pub struct AuthenticationRequest {
    pub credentials: Credentials,
    pub details: RequestDetails,
}

impl AuthenticationRequest {
    pub fn new(credentials: Credentials, details: RequestDetails) -> Self {
        Self {
            credentials,
            details,
        }
    }
}

/// An authenticated principal.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Principal {
    /// The verified username.
    pub username: String,
}

/// Verifies a credential pair.
///
/// Implementations must be safe for concurrent invocation; the filter
/// shares one instance across all requests.
#[async_trait]
pub trait AuthenticationAuthority: Send + Sync {
    /// Verify the pair, yielding the principal or a rejection.
    ///
    /// Rejections must not reveal whether the username or the password
    /// was the failing half.
    async fn authenticate(&self, request: AuthenticationRequest) -> Result<Principal, AuthError>;
}

/// In-memory authority seeded from the environment.
///
/// Seed format: `user:password` pairs separated by commas, e.g.
/// `alice:wonderland,bob:builder`. Entries without a `:` are ignored.
#[derive(Debug, Default)]
pub struct StaticAuthority {
    users: HashMap<String, String>,
}

impl StaticAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated `user:password` seed string.
    pub fn from_seed(seed: &str) -> Self {
        let mut users = HashMap::new();
        for entry in seed.split(',') {
            if let Some((username, password)) = entry.split_once(':') {
                let username = username.trim();
                if !username.is_empty() {
                    users.insert(username.to_string(), password.to_string());
                }
            }
        }
        Self { users }
    }

    /// Add a single user. Test and bootstrap convenience.
    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.users.insert(username.into(), password.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl AuthenticationAuthority for StaticAuthority {
    async fn authenticate(&self, request: AuthenticationRequest) -> Result<Principal, AuthError> {
        let credentials = &request.credentials;
        // Unknown user and wrong password collapse into the same rejection.
        match self.users.get(credentials.username()) {
            Some(expected) if expected == credentials.password() => Ok(Principal {
                username: credentials.username().to_string(),
            }),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}
