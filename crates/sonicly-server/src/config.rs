//! Server configuration.

/// Which [`Store`](sonicly_store::Store) implementation persists records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// One JSON file per user and collection.
    #[default]
    File,
    /// `RocksDB` with a column family per collection.
    Rocks,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "json" => Ok(Self::File),
            "rocks" | "rocksdb" => Ok(Self::Rocks),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (default: "0.0.0.0:3001").
    pub listen_addr: String,

    /// Data directory (default: "data").
    pub data_dir: String,

    /// Storage backend (default: file).
    pub store_backend: StoreBackend,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            data_dir: std::env::var("DATA_DIR").unwrap_or(defaults.data_dir),
            store_backend: std::env::var("STORE_BACKEND")
                .ok()
                .and_then(|s| match s.parse() {
                    Ok(backend) => Some(backend),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring STORE_BACKEND");
                        None
                    }
                })
                .unwrap_or(defaults.store_backend),
            cors_origins: std::env::var("CORS_ORIGINS").map_or(defaults.cors_origins, |s| {
                s.split(',').map(|o| o.trim().to_string()).collect()
            }),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }

    /// Port component of the listen address, reported by the health check.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.listen_addr
            .rsplit_once(':')
            .and_then(|(_, port)| port.parse().ok())
            .unwrap_or(0)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3001".into(),
            data_dir: "data".into(),
            store_backend: StoreBackend::File,
            cors_origins: vec![
                "http://localhost:8080".into(),
                "http://localhost:3000".into(),
                "http://127.0.0.1:8080".into(),
            ],
            max_body_bytes: 1024 * 1024, // 1MB
            request_timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_from_listen_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.port(), 3001);

        let config = ServerConfig {
            listen_addr: "[::1]:8081".into(),
            ..ServerConfig::default()
        };
        assert_eq!(config.port(), 8081);
    }

    #[test]
    fn parses_store_backend() {
        assert_eq!("rocksdb".parse::<StoreBackend>(), Ok(StoreBackend::Rocks));
        assert_eq!(" File ".parse::<StoreBackend>(), Ok(StoreBackend::File));
        assert!("postgres".parse::<StoreBackend>().is_err());
    }
}
