//! cal-server: Web Calendar Main Binary
//!
//! Usage:
//!   cal-server               - Serve on 127.0.0.1:5000
//!   cal-server <host>:<port> - Serve on the given address
//!
//! Events are stored in `calendar.db` in the working directory.

use cal_core::{Config, EventManager};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("info".parse()?)
        )
        .init();

    let config = Config::from_args(std::env::args().skip(1))
        .map_err(|e| anyhow::anyhow!("Invalid arguments: {}", e))?;

    tracing::info!("Starting cal-server {}...", env!("CARGO_PKG_VERSION"));

    let events = EventManager::new(&config.store.db_path)
        .map_err(|e| anyhow::anyhow!("Failed to open event store: {}", e))?;

    tracing::info!(
        "Event store ready at {} ({} events)",
        config.store.db_path,
        events.count()?
    );

    cal_api::start_server(&config.server, events, shutdown_signal()).await?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

/// Resolve on Ctrl+C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutting down..."),
        Err(e) => {
            // Keep serving; the process can still be killed
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await
        }
    }
}
