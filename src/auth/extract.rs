// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Content-negotiated credential extraction.
//!
//! A login request's body is parsed by one of two strategies, selected by
//! the Content-Type header:
//!
//! - JSON bodies (`application/json`, any parameters) are decoded into
//!   [`LoginRequest`]
//! - everything else goes through the conventional form-encoded path
//!   (`username` / `password` form fields)
//!
//! Extraction degrades instead of failing: a malformed JSON body or an
//! empty username yields the empty credential pair, which is still handed
//! to the authority — the authority alone decides what counts as valid
//! credentials. Parse failures are logged, never propagated.
//!
//! Only two conditions abort before the authority is consulted: a
//! non-POST method (when `post_only` is set) and a missing Content-Type
//! header. Both are malformed requests, not credential failures.

use axum::http::{header::CONTENT_TYPE, HeaderMap, Method};
use serde::Deserialize;
use utoipa::ToSchema;

use super::credentials::Credentials;
use super::error::AuthError;

const APPLICATION_JSON: &str = "application/json";

/// JSON login body. Both fields default to empty when absent.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// A body-parsing strategy. Strategies are infallible: whatever they
/// cannot read becomes the empty pair.
pub trait CredentialExtractor {
    fn extract(&self, body: &[u8]) -> Credentials;
}

/// Parses `{"username": ..., "password": ...}` bodies.
pub struct JsonExtractor;

impl CredentialExtractor for JsonExtractor {
    fn extract(&self, body: &[u8]) -> Credentials {
        match serde_json::from_slice::<LoginRequest>(body) {
            Ok(login) if !login.username.is_empty() => {
                Credentials::new(login.username, login.password)
            }
            Ok(_) => Credentials::empty(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse json login body, using empty credentials");
                Credentials::empty()
            }
        }
    }
}

/// Parses `username=...&password=...` bodies.
pub struct FormExtractor;

impl CredentialExtractor for FormExtractor {
    fn extract(&self, body: &[u8]) -> Credentials {
        let mut username = String::new();
        let mut password = String::new();
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "username" => username = value.into_owned(),
                "password" => password = value.into_owned(),
                _ => {}
            }
        }
        Credentials::new(username, password)
    }
}

fn extractor_for(content_type: &str) -> &'static dyn CredentialExtractor {
    if content_type.contains(APPLICATION_JSON) {
        &JsonExtractor
    } else {
        &FormExtractor
    }
}

/// Produce the credential pair for a login request whose body has already
/// been consumed into `body`.
///
/// Fails only on an unsupported method or a missing Content-Type header;
/// every other input degrades to (possibly empty) credentials.
pub fn extract_credentials(
    method: &Method,
    headers: &HeaderMap,
    body: &[u8],
    post_only: bool,
) -> Result<Credentials, AuthError> {
    if post_only && method != Method::POST {
        return Err(AuthError::MethodNotSupported(method.to_string()));
    }

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::ContentTypeMissing)?;

    tracing::debug!(content_type, "extracting login credentials");
    Ok(extractor_for(content_type).extract(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn json_body_yields_trimmed_username() {
        let creds = extract_credentials(
            &Method::POST,
            &headers_with("application/json"),
            br#"{"username":" alice ","password":"p"}"#,
            true,
        )
        .unwrap();
        assert_eq!(creds.username(), "alice");
        assert_eq!(creds.password(), "p");
    }

    #[test]
    fn json_content_type_with_charset_still_parses_json() {
        let creds = extract_credentials(
            &Method::POST,
            &headers_with("application/json; charset=utf-8"),
            br#"{"username":"bob","password":"pw"}"#,
            true,
        )
        .unwrap();
        assert_eq!(creds.username(), "bob");
    }

    #[test]
    fn empty_username_degrades_to_empty_pair() {
        let creds = extract_credentials(
            &Method::POST,
            &headers_with("application/json"),
            br#"{"username":"","password":"p"}"#,
            true,
        )
        .unwrap();
        assert_eq!(creds, Credentials::empty());
    }

    #[test]
    fn malformed_json_degrades_to_empty_pair() {
        let creds = extract_credentials(
            &Method::POST,
            &headers_with("application/json"),
            br#"{malformed json"#,
            true,
        )
        .unwrap();
        assert_eq!(creds, Credentials::empty());
    }

    #[test]
    fn absent_json_fields_default_to_empty() {
        let creds = extract_credentials(
            &Method::POST,
            &headers_with("application/json"),
            br#"{"username":"dave"}"#,
            true,
        )
        .unwrap();
        assert_eq!(creds.username(), "dave");
        assert_eq!(creds.password(), "");
    }

    #[test]
    fn form_body_reads_both_fields() {
        let creds = extract_credentials(
            &Method::POST,
            &headers_with("application/x-www-form-urlencoded"),
            b"username=bob&password=s3cret",
            true,
        )
        .unwrap();
        assert_eq!(creds.username(), "bob");
        assert_eq!(creds.password(), "s3cret");
    }

    #[test]
    fn form_body_trims_and_defaults_missing_fields() {
        let creds = extract_credentials(
            &Method::POST,
            &headers_with("application/x-www-form-urlencoded"),
            b"username=%20carol%20",
            true,
        )
        .unwrap();
        assert_eq!(creds.username(), "carol");
        assert_eq!(creds.password(), "");
    }

    #[test]
    fn non_post_is_rejected_when_post_only() {
        let err = extract_credentials(
            &Method::GET,
            &headers_with("application/json"),
            b"",
            true,
        )
        .unwrap_err();
        match err {
            AuthError::MethodNotSupported(method) => assert_eq!(method, "GET"),
            other => panic!("expected MethodNotSupported, got {other:?}"),
        }
    }

    #[test]
    fn non_post_passes_when_post_only_disabled() {
        let creds = extract_credentials(
            &Method::GET,
            &headers_with("application/json"),
            br#"{"username":"eve","password":"p"}"#,
            false,
        )
        .unwrap();
        assert_eq!(creds.username(), "eve");
    }

    #[test]
    fn missing_content_type_is_rejected() {
        let err =
            extract_credentials(&Method::POST, &HeaderMap::new(), b"", true).unwrap_err();
        assert!(matches!(err, AuthError::ContentTypeMissing));
    }
}
