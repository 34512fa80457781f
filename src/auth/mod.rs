// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Login-request authentication: credential extraction, authority
//! invocation, and outcome handling.
//!
//! ## Flow
//!
//! 1. A login request arrives (JSON or form-encoded body)
//! 2. The filter consumes the body once and extracts the credential pair
//!    via the content-type-selected strategy
//! 3. The pair — possibly empty — goes to the authentication authority
//! 4. The outcome handler writes exactly one result envelope, or lets the
//!    middleware chain continue with the principal attached
//!
//! ## Security
//!
//! - Malformed bodies degrade to empty credentials; the authority alone
//!   decides validity
//! - Rejections are uniform 401s that never say which half of the pair
//!   was wrong
//! - Passwords are redacted from Debug output and never logged

pub mod authority;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod filter;
pub mod handlers;

pub use authority::{
    AuthenticationAuthority, AuthenticationRequest, Principal, RequestDetails, StaticAuthority,
};
pub use credentials::Credentials;
pub use error::AuthError;
pub use extract::{CredentialExtractor, FormExtractor, JsonExtractor, LoginRequest};
pub use filter::AuthenticationFilter;
