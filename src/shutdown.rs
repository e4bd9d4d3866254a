//! # Graceful Shutdown Module
//!
//! This module wires SIGINT and SIGTERM into a future the API server can
//! await, so an in-flight scan request can finish before the process
//! exits.

use tracing::info;

/// Wait for a termination signal (SIGINT or SIGTERM)
///
/// Resolves when either signal arrives. Used as the graceful-shutdown
/// trigger for the API server.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install SIGINT handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
