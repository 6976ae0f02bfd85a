// Configuration module entry point
// Loads the immutable startup configuration and holds per-process state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::{Result, ServerError};

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LogFormat, LoggingConfig, PerformanceConfig, ServerConfig};

/// Default config file (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources in increasing priority: built-in defaults, the optional file,
    /// `SERVER_*` environment variables (`__` separates nested keys).
    pub fn load_from(config_path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", types::DEFAULT_HOST)?
            .set_default("server.port", i64::from(types::DEFAULT_PORT))?
            .set_default("server.root", types::DEFAULT_ROOT)?
            .set_default("logging.level", types::DEFAULT_LOG_LEVEL)?
            .set_default("logging.access_log", true)?
            .set_default("logging.format", "pretty")?
            .set_default("performance.keep_alive", true)?
            .set_default(
                "performance.header_read_timeout",
                i64::from(types::DEFAULT_HEADER_READ_TIMEOUT),
            )?
            .set_default(
                "performance.shutdown_timeout",
                i64::from(types::DEFAULT_SHUTDOWN_TIMEOUT),
            )?
            .set_default("http.chunk_size", i64::from(types::DEFAULT_CHUNK_SIZE))?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load from the path given on the command line, or `config`
    pub fn load() -> Result<Self> {
        let path = std::env::args()
            .nth(1)
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr> {
        let address = format!("{}:{}", self.server.host, self.server.port);
        address
            .parse()
            .map_err(|e: std::net::AddrParseError| ServerError::InvalidAddress {
                reason: e.to_string(),
                address,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.root, std::path::PathBuf::from("."));
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.http.chunk_size, 65_536);
        assert_eq!(cfg.performance.header_read_timeout, 30);
        assert_eq!(cfg.performance.shutdown_timeout, 10);
    }

    #[test]
    fn test_load_without_file_matches_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");

        let loaded = Config::load_from(missing.to_str().unwrap()).unwrap();
        let defaults = Config::default();
        assert_eq!(loaded.server.port, defaults.server.port);
        assert_eq!(loaded.http.chunk_size, defaults.http.chunk_size);
        assert_eq!(
            loaded.performance.header_read_timeout,
            defaults.performance.header_read_timeout
        );
        assert_eq!(
            loaded.performance.shutdown_timeout,
            defaults.performance.shutdown_timeout
        );
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\nroot = \"/srv/media\"\n\n[http]\nchunk_size = 4096"
        )
        .unwrap();

        let cfg = Config::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.root, std::path::PathBuf::from("/srv/media"));
        assert_eq!(cfg.http.chunk_size, 4096);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::default();
        cfg.server.host = "127.0.0.1".to_string();
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8080);

        cfg.server.host = "not an address".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(ServerError::InvalidAddress { .. })
        ));
    }
}
