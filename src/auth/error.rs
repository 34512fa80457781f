// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication failure taxonomy.
//!
//! Three categories with distinct response mappings:
//!
//! - malformed request (wrong method, missing content type) — detected
//!   locally before the authority is consulted, answered with 400
//! - rejected credentials — the authority's verdict, answered with 401
//! - internal fault — answered with a generic 500, details stay in logs
//!
//! The 401 message never says whether the username or the password was
//! wrong.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::result::{ResultCode, ResultEnvelope};

/// An authentication failure, distinguishable by kind.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The login endpoint only accepts POST; carries the actual method.
    #[error("Authentication method not supported: {0}")]
    MethodNotSupported(String),

    /// The request carried no Content-Type header.
    #[error("Content type not supported")]
    ContentTypeMissing,

    /// The authority rejected the credential pair.
    #[error("Unauthorized")]
    InvalidCredentials,

    /// A fault while authenticating; the detail is for logs only.
    #[error("Internal authentication error: {0}")]
    Internal(String),
}

impl AuthError {
    /// The HTTP status this failure maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MethodNotSupported(_) | AuthError::ContentTypeMissing => {
                StatusCode::BAD_REQUEST
            }
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MethodNotSupported(_) | AuthError::ContentTypeMissing => {
                ResultEnvelope::error_with(StatusCode::BAD_REQUEST, self.to_string())
                    .into_response()
            }
            AuthError::InvalidCredentials => {
                ResultEnvelope::unauthorized(ResultCode::Unauthorized).into_response()
            }
            // The internal detail is deliberately not serialized.
            AuthError::Internal(_) => ResultEnvelope::internal_server_error().into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AuthError) -> serde_json::Value {
        let response = err.into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn statuses_by_kind() {
        assert_eq!(
            AuthError::MethodNotSupported("GET".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::ContentTypeMissing.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Internal("db down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn method_not_supported_names_the_method() {
        let response = AuthError::MethodNotSupported("GET".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "40000");
        assert_eq!(body["message"], "Authentication method not supported: GET");
    }

    #[tokio::test]
    async fn invalid_credentials_is_a_uniform_401() {
        let body = body_json(AuthError::InvalidCredentials).await;
        assert_eq!(body["code"], "40100");
        assert_eq!(body["message"], "Unauthorized");
    }

    #[tokio::test]
    async fn internal_detail_never_reaches_the_body() {
        let body = body_json(AuthError::Internal("secret backend detail".into())).await;
        assert_eq!(body["code"], "50000");
        assert_eq!(body["message"], "Internal server error");
    }
}
