//! HTTP API Server
//!
//! Builds the axum application and serves it until shutdown.

use std::future::Future;

use axum::Router;
use cal_core::{EventManager, ServerConfig};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub events: EventManager,
}

impl AppState {
    pub fn new(events: EventManager) -> Self {
        Self { events }
    }
}

/// Build the application router with its middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP API server, stopping when `shutdown` resolves
pub async fn start_server<F>(
    config: &ServerConfig,
    events: EventManager,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(AppState::new(events));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP API stopped");
    Ok(())
}
