//! Common test utilities for data service integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;
use std::time::Duration;

use rand_core::{impls, RngCore};
use sonicly_client::{ClientOptions, RecordStoreClient};
use sonicly_core::{BillingSynthesizer, UserId};
use sonicly_data::{
    Connectivity, ConnectivityMonitor, LocalBackend, RemoteBackend, SubscriptionService,
};
use sonicly_store::LocalCache;
use wiremock::MockServer;

/// Nothing listens on the discard port in the test environment.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

/// RNG whose draws never land in the pending band.
pub struct AlwaysPaid;

impl RngCore for AlwaysPaid {
    fn next_u32(&mut self) -> u32 {
        99
    }

    fn next_u64(&mut self) -> u64 {
        99
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// A service bound to a test user, plus direct access to its local cache.
pub struct TestHarness {
    pub service: Arc<SubscriptionService>,
    pub cache: LocalCache,
    pub user: UserId,
}

impl TestHarness {
    /// Service pinned offline.
    pub fn offline() -> Self {
        Self::build(UNREACHABLE_API, Connectivity::Offline, LocalCache::in_memory())
    }

    /// Service pinned offline over a caller-provided cache.
    pub fn offline_with_cache(cache: LocalCache) -> Self {
        Self::build(UNREACHABLE_API, Connectivity::Offline, cache)
    }

    /// Service that has not checked yet and whose record store is unreachable.
    pub fn unchecked_unreachable() -> Self {
        Self::build(UNREACHABLE_API, Connectivity::Unknown, LocalCache::in_memory())
    }

    /// Service talking to a mock record store.
    pub fn online(server: &MockServer) -> Self {
        Self::with_connectivity(server, Connectivity::Online)
    }

    /// Service talking to a mock record store, starting from `connectivity`.
    pub fn with_connectivity(server: &MockServer, connectivity: Connectivity) -> Self {
        Self::build(
            &format!("{}/api", server.uri()),
            connectivity,
            LocalCache::in_memory(),
        )
    }

    fn build(api_url: &str, connectivity: Connectivity, cache: LocalCache) -> Self {
        let client = RecordStoreClient::with_options(
            api_url,
            ClientOptions::with_timeout(Duration::from_secs(2)),
        )
        .expect("Failed to build client");

        let monitor = Arc::new(ConnectivityMonitor::new(
            client.clone(),
            Duration::from_millis(500),
        ));
        monitor.set(connectivity);

        let service = SubscriptionService::new(
            RemoteBackend::new(client),
            LocalBackend::new(cache.clone()),
            monitor,
        )
        .with_synthesizer(BillingSynthesizer::with_rng(AlwaysPaid));

        let user = UserId::new("user_1").expect("valid user id");
        service.set_current_user(user.clone());

        Self {
            service: Arc::new(service),
            cache,
            user,
        }
    }
}
