// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup and shared read-only.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOGIN_PATH` | Path of the login endpoint | `/login` |
//! | `POST_ONLY` | Reject non-POST login requests (`true`/`false`) | `true` |
//! | `PUBLIC_PATHS` | Comma-separated path prefixes exempt from authentication | `/health,/docs` |
//! | `SEED_USERS` | `user:password` pairs for the static authority | empty |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the login endpoint path.
pub const LOGIN_PATH_ENV: &str = "LOGIN_PATH";

/// Environment variable name for the POST-only knob.
pub const POST_ONLY_ENV: &str = "POST_ONLY";

/// Environment variable name for the authentication-exempt path list.
pub const PUBLIC_PATHS_ENV: &str = "PUBLIC_PATHS";

/// Environment variable name for the static authority's user seed.
///
/// Format: comma-separated `user:password` pairs, e.g.
/// `alice:wonderland,bob:builder`.
pub const SEED_USERS_ENV: &str = "SEED_USERS";

/// Environment variable name for the logging format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Security-relevant settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Path of the login endpoint.
    pub login_path: String,
    /// When true, non-POST login requests fail with a method error.
    pub post_only: bool,
    /// Path prefixes the authentication middleware passes through.
    pub public_paths: Vec<String>,
}

impl SecurityConfig {
    /// Load from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            login_path: env::var(LOGIN_PATH_ENV).unwrap_or_else(|_| "/login".to_string()),
            post_only: env::var(POST_ONLY_ENV)
                .map(|value| parse_bool(&value))
                .unwrap_or(true),
            public_paths: env::var(PUBLIC_PATHS_ENV)
                .map(|value| parse_paths(&value))
                .unwrap_or_else(|_| Self::default().public_paths),
        }
    }

    /// Whether a request path bypasses authentication.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths
            .iter()
            .any(|public| path.starts_with(public.as_str()))
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            post_only: true,
            public_paths: vec!["/health".to_string(), "/docs".to_string()],
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

fn parse_paths(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_post_only_login() {
        let config = SecurityConfig::default();
        assert_eq!(config.login_path, "/login");
        assert!(config.post_only);
        assert!(config.is_public("/health/live"));
        assert!(config.is_public("/docs"));
        assert!(!config.is_public("/login"));
    }

    #[test]
    fn bool_parsing_accepts_common_spellings() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("nonsense"));
    }

    #[test]
    fn path_list_parsing_trims_and_drops_empties() {
        let paths = parse_paths(" /health , /docs ,, ");
        assert_eq!(paths, vec!["/health".to_string(), "/docs".to_string()]);
    }
}
