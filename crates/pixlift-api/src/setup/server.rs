//! Server startup and graceful shutdown

use anyhow::Result;
use axum::Router;
use tokio_util::sync::CancellationToken;

use pixlift_core::Config;

/// Start the server with graceful shutdown
pub async fn start_server(
    config: &Config,
    app: Router,
    shutdown: CancellationToken,
) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port);
    tracing::info!(addr = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let max_upload_mb = config.max_file_size_bytes / 1024 / 1024;
    tracing::info!(
        max_upload_mb,
        provider_base_url = %config.provider_base_url,
        storage_path = %config.storage_path,
        poll_max_attempts = config.poll_max_attempts,
        poll_interval_ms = config.poll_interval_ms,
        "Server ready and accepting connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    Ok(())
}

/// Signal handler for graceful shutdown
///
/// Listens for Ctrl+C (SIGINT) and SIGTERM signals to initiate graceful
/// shutdown, then fires the root cancellation token so in-flight polling
/// loops stop with the server.
///
/// # Panics
/// - Panics if Ctrl+C signal handler cannot be installed (unrecoverable system error)
/// - On Unix systems, panics if SIGTERM signal handler cannot be installed (unrecoverable system error)
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
    }

    tracing::info!("Shutting down gracefully...");

    // Stop in-flight enhancement jobs.
    shutdown.cancel();
}
