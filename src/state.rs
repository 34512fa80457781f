// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{AuthenticationAuthority, StaticAuthority};
use crate::config::SecurityConfig;

#[derive(Clone)]
pub struct AppState {
    pub authority: Arc<dyn AuthenticationAuthority>,
    pub security: Arc<SecurityConfig>,
}

impl AppState {
    pub fn new(authority: Arc<dyn AuthenticationAuthority>, security: Arc<SecurityConfig>) -> Self {
        Self {
            authority,
            security,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            Arc::new(StaticAuthority::new()),
            Arc::new(SecurityConfig::default()),
        )
    }
}
