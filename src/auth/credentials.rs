// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The credential pair extracted from a login request.

use std::fmt;

/// A username/password pair.
///
/// Both fields are always present — absent or unparseable input produces
/// empty strings, never `None`, so downstream code has no null case to
/// handle. The username is trimmed of surrounding whitespace at
/// construction. Not persisted; consumed once per request.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Build a pair, trimming the username.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into().trim().to_string(),
            password: password.into(),
        }
    }

    /// The empty pair handed to the authority when extraction degrades.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// Passwords must not reach logs through Debug formatting.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
