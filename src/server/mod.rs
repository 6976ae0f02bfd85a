// Server module entry point
// Accept loop, per-connection tasks and graceful shutdown

pub mod connection;
pub mod listener;
pub mod signal;

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::config::AppState;
use crate::error::Result;
use crate::logger;

pub use listener::bind_listener;
pub use signal::shutdown_signal;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept connections until `shutdown` resolves, then wait for open
/// connections to finish (bounded by `performance.shutdown_timeout`).
///
/// Open connections are told to close once their current response is done.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let active_connections = Arc::new(AtomicUsize::new(0));
    let (closing_tx, closing_rx) = watch::channel(());
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => match accept_result {
                Ok((stream, peer_addr)) => {
                    connection::accept_connection(
                        stream,
                        peer_addr,
                        &state,
                        &active_connections,
                        &closing_rx,
                    );
                }
                Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
            },
            () = &mut shutdown => break,
        }
    }

    drop(listener);
    closing_tx.send_replace(());
    let grace = Duration::from_secs(state.config.performance.shutdown_timeout);
    let remaining = drain(&active_connections, grace).await;
    logger::log_shutdown_complete(remaining);
    Ok(())
}

/// Wait until no connection is open or `grace` elapses; returns what is left
async fn drain(active_connections: &AtomicUsize, grace: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + grace;
    loop {
        let remaining = active_connections.load(Ordering::SeqCst);
        if remaining == 0 || tokio::time::Instant::now() >= deadline {
            return remaining;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
