//! HTTP server wiring: state construction, router assembly and serving.

use std::net::SocketAddr;

use axum::Router;
use sqlx::SqlitePool;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::router::app_router;
use crate::state::AppState;

/// The API server: configuration plus stores, ready to serve.
#[derive(Debug, Clone)]
pub struct Server {
    state: AppState,
}

impl Server {
    /// Builds a server over an opened pool.
    #[must_use]
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self {
            state: AppState::new(config, pool),
        }
    }

    /// The assembled application router; tests drive this directly.
    #[must_use]
    pub fn router(&self) -> Router {
        app_router(self.state.clone())
    }

    /// Binds the configured port and serves until shutdown.
    ///
    /// # Errors
    ///
    /// Returns any bind or accept-loop failure.
    pub async fn serve(self) -> std::io::Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.port));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "listening");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(error) => tracing::error!(%error, "failed to listen for shutdown signal"),
    }
}
