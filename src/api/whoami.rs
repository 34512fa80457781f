// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    response::{IntoResponse, Response},
    Extension,
};

use crate::auth::Principal;
use crate::result::ResultEnvelope;

/// Returns the authenticated principal.
///
/// Mounted behind the authentication middleware, which runs the same
/// extraction-and-verify pipeline as `/login` and stores the principal in
/// request extensions before the handler runs.
#[utoipa::path(
    post,
    path = "/whoami",
    tag = "Auth",
    request_body = crate::auth::LoginRequest,
    responses(
        (status = 200, description = "The authenticated principal", body = Principal),
        (status = 400, description = "Malformed request (method or content type)"),
        (status = 401, description = "Credentials rejected")
    )
)]
pub async fn whoami(Extension(principal): Extension<Principal>) -> Response {
    ResultEnvelope::ok_with(principal).into_response()
}
