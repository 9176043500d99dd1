use std::future::Future;

use tokio::signal;

use crate::error::{AppError, Result};

/// Wait for a shutdown signal (SIGINT or SIGTERM).
pub async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, aborting run...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, aborting run...");
        }
    }
}

/// Race `fut` against `signal`; the signal wins with [`AppError::Interrupted`].
///
/// Dropping `fut` drops any child process it owns.
pub async fn interruptible<T, F, S>(fut: F, signal: S) -> Result<T>
where
    F: Future<Output = Result<T>>,
    S: Future<Output = ()>,
{
    tokio::select! {
        result = fut => result,
        _ = signal => Err(AppError::Interrupted),
    }
}
