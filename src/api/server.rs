//! Action server lifecycle: bind, serve, shut down on ctrl-c.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;

use crate::actions::ActionRegistry;
use crate::api::router::action_server_router;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// Serve the action API on `addr` until ctrl-c.
pub async fn serve(addr: SocketAddr, registry: Arc<ActionRegistry>) -> Result<(), ServeError> {
    let app = action_server_router(registry);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    tracing::info!(%addr, "action server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServeError::Serve)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => {
            // Without a signal handler the server can only be killed.
            tracing::error!(error = %err, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    }
}
