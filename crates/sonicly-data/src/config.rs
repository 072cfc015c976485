//! Data service configuration.

use std::path::PathBuf;
use std::time::Duration;

use sonicly_client::DEFAULT_BASE_URL;

/// Data service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DataServiceConfig {
    /// Record store API base URL (default: `http://localhost:3001/api`).
    pub api_url: String,

    /// Timeout for record store requests in seconds (default: 10).
    pub request_timeout_seconds: u64,

    /// Timeout for the liveness check in seconds (default: 3).
    pub check_timeout_seconds: u64,

    /// Interval between liveness checks in seconds (default: 30).
    pub check_interval_seconds: u64,

    /// Directory for the local cache. An in-memory cache is used when unset.
    pub cache_dir: Option<PathBuf>,
}

impl DataServiceConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_url: std::env::var("SONICLY_API_URL").unwrap_or(defaults.api_url),
            request_timeout_seconds: env_seconds(
                "SONICLY_REQUEST_TIMEOUT_SECONDS",
                defaults.request_timeout_seconds,
            ),
            check_timeout_seconds: env_seconds(
                "SONICLY_CHECK_TIMEOUT_SECONDS",
                defaults.check_timeout_seconds,
            ),
            check_interval_seconds: env_seconds(
                "SONICLY_CHECK_INTERVAL_SECONDS",
                defaults.check_interval_seconds,
            ),
            cache_dir: std::env::var_os("SONICLY_CACHE_DIR").map(PathBuf::from),
        }
    }

    /// Record store request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Liveness check timeout.
    #[must_use]
    pub fn check_timeout(&self) -> Duration {
        Duration::from_secs(self.check_timeout_seconds)
    }

    /// Interval between liveness checks.
    #[must_use]
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_seconds)
    }
}

impl Default for DataServiceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_seconds: 10,
            check_timeout_seconds: 3,
            check_interval_seconds: 30,
            cache_dir: None,
        }
    }
}

fn env_seconds(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&secs| secs > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DataServiceConfig::default();
        assert_eq!(config.api_url, "http://localhost:3001/api");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.check_timeout(), Duration::from_secs(3));
        assert_eq!(config.check_interval(), Duration::from_secs(30));
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn unparsable_seconds_fall_back() {
        assert_eq!(env_seconds("SONICLY_TEST_UNSET_VARIABLE", 7), 7);
    }
}
