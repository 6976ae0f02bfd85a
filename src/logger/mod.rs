//! Logger module
//!
//! Thin facade over `tracing` so call sites log lifecycle and request events
//! through named helpers instead of ad-hoc format strings.

use std::fmt::Debug;
use std::net::SocketAddr;
use std::time::Duration;

use hyper::{Method, StatusCode};
use tracing_subscriber::EnvFilter;

use crate::config::{AppState, LogFormat, LoggingConfig};
use crate::error::{Result, ServerError};

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over `logging.level`. Should be called once at
/// application startup.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ServerError::Logger(e.to_string()))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| ServerError::Logger(e.to_string()))
}

pub fn log_server_start(addr: &SocketAddr, state: &AppState) {
    let mut methods: Vec<&str> = state.dispatch.methods().map(Method::as_str).collect();
    methods.sort_unstable();
    tracing::info!(
        address = %addr,
        root = %state.config.server.root.display(),
        workers = ?state.config.server.workers,
        methods = %methods.join(","),
        "Server running at http://{addr}"
    );
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!(peer = %peer_addr, "Connection accepted");
}

pub fn log_connection_rejected(active: usize, max: u64) {
    tracing::warn!(active, max, "Max connections reached, connection rejected");
}

pub fn log_connection_error(err: &impl Debug) {
    tracing::debug!(error = ?err, "Failed to serve connection");
}

/// One line per answered request: `METHOD path status`
pub fn log_access(method: &Method, path: &str, status: StatusCode, elapsed: Duration) {
    tracing::info!(
        target: "access",
        %method,
        path,
        status = status.as_u16(),
        elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
        "{method} {path} {}",
        status.as_u16()
    );
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

pub fn log_shutdown_requested(signal: &str) {
    tracing::info!(signal, "Shutdown requested, no longer accepting connections");
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        tracing::info!("All connections closed, server stopped");
    } else {
        tracing::warn!(remaining, "Grace period elapsed with connections still open");
    }
}
