// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitdesk API Server
//!
//! Gateway between the fitness-studio dashboards and the studio core REST
//! API: sessions, role gating, entity screens, and the checkout saga.

use fitdesk::{
    config::Config,
    services::{CheckoutService, CoreClient, SessionStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Fitdesk API");

    // Core API client (the only outbound dependency)
    let core = CoreClient::new(config.core_api_url.clone());
    tracing::info!(core_api = %config.core_api_url, "Core API client initialized");

    // Session store and checkout saga runner
    let sessions = SessionStore::new();
    let checkout = CheckoutService::new();

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        sessions,
        core,
        checkout,
    });

    spawn_store_sweeper(state.clone());

    // Build router
    let app = fitdesk::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Periodically reclaim sessions past the JWT lifetime and stale saga
/// records. Both stores are in-memory only and would otherwise grow forever.
fn spawn_store_sweeper(state: Arc<AppState>) {
    use fitdesk::middleware::auth::SESSION_TTL_DAYS;

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            ticker.tick().await;
            let sessions = state.sessions.evict_expired(chrono::Duration::days(SESSION_TTL_DAYS));
            let sagas = state.checkout.evict_stale(chrono::Duration::hours(24));
            if sessions > 0 || sagas > 0 {
                tracing::info!(sessions, sagas, "Swept expired sessions and stale sagas");
            }
        }
    });
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitdesk=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
