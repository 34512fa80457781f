// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{any, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::filter;
use crate::state::AppState;

pub mod health;
pub mod login;
pub mod whoami;

pub fn router(state: AppState) -> Router {
    // The chain embedding: whoami sits behind the authentication
    // middleware and only runs for verified credentials.
    let protected = Router::new()
        .route("/whoami", post(whoami::whoami))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            filter::authenticate,
        ));

    Router::new()
        .route(&state.security.login_path, any(login::login))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

#[derive(OpenApi)]
#[openapi(
    paths(login::login, whoami::whoami, health::health, health::liveness),
    components(
        schemas(
            crate::auth::LoginRequest,
            crate::auth::Principal,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Auth", description = "Login authentication"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticAuthority;
    use crate::config::SecurityConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn seeded_state() -> AppState {
        AppState::new(
            Arc::new(StaticAuthority::new().with_user("alice", "wonderland")),
            Arc::new(SecurityConfig::default()),
        )
    }

    fn json_request(method: Method, uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::default());
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn login_round_trip_succeeds() {
        let app = router(seeded_state());
        let response = app
            .oneshot(json_request(
                Method::POST,
                "/login",
                r#"{"username":"alice","password":"wonderland"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn login_with_get_is_a_400_envelope() {
        let app = router(seeded_state());
        let response = app
            .oneshot(json_request(Method::GET, "/login", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "40000");
    }

    #[tokio::test]
    async fn whoami_returns_the_principal_behind_the_middleware() {
        let app = router(seeded_state());
        let response = app
            .oneshot(json_request(
                Method::POST,
                "/whoami",
                r#"{"username":"alice","password":"wonderland"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["username"], "alice");
        assert!(body["datetime"].is_string());
    }

    #[tokio::test]
    async fn whoami_rejects_bad_credentials() {
        let app = router(seeded_state());
        let response = app
            .oneshot(json_request(
                Method::POST,
                "/whoami",
                r#"{"username":"alice","password":"wrong"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = router(seeded_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
