//! Common test utilities for server integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use sonicly_server::{create_router, AppState, ServerConfig, StoreBackend};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary data directory (kept alive for test duration).
    pub temp_dir: TempDir,
    /// A test user ID.
    pub user_id: String,
}

impl TestHarness {
    /// Create a new test harness over a fresh file store.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let router = Self::router(&temp_dir);
        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            temp_dir,
            user_id: "user_1".into(),
        }
    }

    /// Start a second server over the same data directory.
    pub fn restart(&self) -> TestServer {
        TestServer::new(Self::router(&self.temp_dir)).expect("Failed to create test server")
    }

    /// Path under `/api` for this harness's user.
    pub fn path(&self, collection: &str) -> String {
        format!("/api/{collection}/{}", self.user_id)
    }

    fn router(temp_dir: &TempDir) -> Router {
        let config = ServerConfig {
            listen_addr: "127.0.0.1:3001".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            store_backend: StoreBackend::File,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::open(config).expect("Failed to open store");
        create_router(state)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
