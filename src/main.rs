// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr, sync::Arc};

use tracing_subscriber::EnvFilter;

use credence::api::router;
use credence::auth::StaticAuthority;
use credence::config::{
    SecurityConfig, HOST_ENV, LOG_FORMAT_ENV, PORT_ENV, SEED_USERS_ENV,
};
use credence::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise a sensible default.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json = env::var(LOG_FORMAT_ENV)
        .map(|format| format == "json")
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let security = Arc::new(SecurityConfig::from_env());

    let authority = match env::var(SEED_USERS_ENV) {
        Ok(seed) => StaticAuthority::from_seed(&seed),
        Err(_) => StaticAuthority::new(),
    };
    if authority.is_empty() {
        tracing::warn!("no users seeded; every login will be rejected");
    }

    let state = AppState::new(Arc::new(authority), security.clone());
    let app = router(state);

    // Parse bind address
    let host = env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var(PORT_ENV)
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!(%addr, login_path = %security.login_path, "Credence server listening (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    // Connect info keeps the peer address available to the filter's
    // request details.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("HTTP server failed");
}
