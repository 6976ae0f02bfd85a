//! Server error types
//!
//! Only startup and transport failures surface as [`ServerError`]; anything
//! that goes wrong while answering a request becomes an HTTP status instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("logger initialisation failed: {0}")]
    Logger(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;
