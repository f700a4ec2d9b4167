//! HTTP gateway: shared state, router assembly, and server startup.
//!
//! The forwarder is injected into [`AppState`] as a trait object so the
//! handlers stay testable against fakes; [`serve`] wires in the real
//! [`HttpUpstreamClient`] bound to the loaded configuration.

pub mod city;
pub mod error;

use crate::config::Config;
use crate::upstream::http::HttpUpstreamClient;
use crate::upstream::UpstreamClient;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Shared state for the gateway. Cloned per request; holds no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: Arc<dyn UpstreamClient>,
}

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allow_origins);

    Router::new()
        .route("/", get(city::handle_health))
        .route("/api/city/submit", post(city::handle_submit_city))
        .layer(cors)
        .with_state(state)
}

/// Build the CORS layer from the configured origin list. `"*"` anywhere in
/// the list allows everything.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the gateway server. Runs until ctrl-c.
pub async fn serve(config: Arc<Config>) -> anyhow::Result<()> {
    let upstream = Arc::new(HttpUpstreamClient::new(
        config.upstream_base_url.clone(),
        Duration::from_secs(config.upstream_timeout_secs),
    ));
    let state = AppState {
        config: config.clone(),
        upstream,
    };
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.listen_host, config.listen_port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Gateway listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutting down");
}
