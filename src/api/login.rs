// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Request, State},
    response::Response,
};

use crate::auth::filter;
use crate::state::AppState;

/// Login endpoint handler.
///
/// Accepts `application/json` bodies (`{"username": ..., "password": ...}`)
/// or conventional form-encoded bodies (`username=...&password=...`).
/// Success is a bare 200; failures carry a result envelope.
///
/// The route is mounted for every method so that the filter — not the
/// router — answers non-POST requests with the method-not-supported
/// envelope.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = crate::auth::LoginRequest,
    responses(
        (status = 200, description = "Authenticated; empty body"),
        (status = 400, description = "Malformed request (method or content type)"),
        (status = 401, description = "Credentials rejected"),
        (status = 500, description = "Internal authentication fault")
    )
)]
pub async fn login(state: State<AppState>, request: Request) -> Response {
    filter::login(state, request).await
}
