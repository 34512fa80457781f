// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Outcome handlers: one envelope per authentication attempt.
//!
//! Success writes `200` with an empty body (the envelope's status-only
//! form). Failures map through [`AuthError`]'s envelope rules. Internal
//! faults are logged with their detail but answered generically — stack
//! traces and source errors never reach the wire.

use axum::response::{IntoResponse, Response};

use super::authority::Principal;
use super::error::AuthError;

/// Terminal success: log the principal and answer 200.
pub fn success_response(principal: &Principal) -> Response {
    tracing::info!(username = %principal.username, "authentication succeeded");
    crate::result::ResultEnvelope::ok().into_response()
}

/// Any failure: log by severity, answer with the failure envelope.
pub fn failure_response(err: AuthError) -> Response {
    match &err {
        AuthError::Internal(detail) => {
            tracing::error!(error = %detail, "authentication failed on an internal fault");
        }
        _ => {
            tracing::info!(error = %err, "authentication failed");
        }
    }
    err.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn success_is_a_bare_200() {
        let principal = Principal {
            username: "alice".to_string(),
        };
        let response = success_response(&principal);
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn rejection_is_a_401_envelope() {
        let response = failure_response(AuthError::InvalidCredentials);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "40100");
    }
}
