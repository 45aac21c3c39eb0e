//! Graceful shutdown
//!
//! The server stops accepting on Ctrl+C or SIGTERM, then gives in-flight
//! requests up to the configured drain timeout before returning anyway.

use axum::Router;
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{error, info, warn};

/// Resolves on Ctrl+C or SIGTERM
///
/// A handler that cannot be installed never fires, so it cannot trigger a
/// shutdown on its own.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}

/// Serve `app` until `signal` resolves, then drain for at most `drain_timeout`
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain_timeout: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let stopping = Arc::new(Notify::new());
    let notify = Arc::clone(&stopping);
    let signal = async move {
        signal.await;
        notify.notify_one();
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .into_future();

    let deadline = async move {
        stopping.notified().await;
        info!(
            "Waiting up to {} seconds for connections to close",
            drain_timeout.as_secs_f64()
        );
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => result,
        _ = deadline => {
            warn!("Drain timeout elapsed with connections still open");
            Ok(())
        },
    }
}
