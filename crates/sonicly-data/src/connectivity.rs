//! Record store reachability.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use sonicly_client::RecordStoreClient;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Shortest interval accepted for periodic health checks; shorter ones are raised to it.
pub const MIN_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// A ticker firing immediately and then every `interval`, clamped to
/// [`MIN_CHECK_INTERVAL`].
pub(crate) fn check_ticker(interval: Duration) -> tokio::time::Interval {
    let mut ticker = tokio::time::interval(interval.max(MIN_CHECK_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Last known reachability of the record store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Connectivity {
    /// No health check has completed yet.
    #[default]
    Unknown,
    /// The last health check succeeded.
    Online,
    /// The last health check failed.
    Offline,
}

impl Connectivity {
    /// Whether requests should try the record store first.
    ///
    /// `Unknown` is treated optimistically; a failing request still falls
    /// back to the local cache.
    #[must_use]
    pub fn routes_remote(self) -> bool {
        !matches!(self, Self::Offline)
    }

    fn from_check(online: bool) -> Self {
        if online {
            Self::Online
        } else {
            Self::Offline
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "unknown",
            Self::Online => "online",
            Self::Offline => "offline",
        })
    }
}

/// Checks the record store's health endpoint and caches the outcome.
pub struct ConnectivityMonitor {
    client: RecordStoreClient,
    check_timeout: Duration,
    state: watch::Sender<Connectivity>,
}

impl ConnectivityMonitor {
    /// Create a monitor in the `Unknown` state.
    #[must_use]
    pub fn new(client: RecordStoreClient, check_timeout: Duration) -> Self {
        let (state, _) = watch::channel(Connectivity::Unknown);
        Self {
            client,
            check_timeout,
            state,
        }
    }

    /// The cached flag.
    #[must_use]
    pub fn current(&self) -> Connectivity {
        *self.state.borrow()
    }

    /// Observe flag changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Connectivity> {
        self.state.subscribe()
    }

    /// Run one liveness check and record the outcome.
    ///
    /// Any transport failure, timeout, non-success status or unexpected body
    /// counts as offline. No retries.
    pub async fn check_status(&self) -> bool {
        let online = match self.client.health_with_timeout(self.check_timeout).await {
            Ok(health) => {
                tracing::trace!(status = %health.status, "record store healthy");
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "record store health check failed");
                false
            }
        };

        self.set(Connectivity::from_check(online));
        online
    }

    /// Overwrite the flag. Returns whether it changed.
    pub fn set(&self, next: Connectivity) -> bool {
        let changed = self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });

        if changed {
            tracing::info!(connectivity = %next, "record store connectivity changed");
        }
        changed
    }

    /// Check immediately and then on every `interval` (at least
    /// [`MIN_CHECK_INTERVAL`]).
    pub fn spawn_periodic(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = check_ticker(interval);
            loop {
                ticker.tick().await;
                self.check_status().await;
            }
        })
    }
}

impl fmt::Debug for ConnectivityMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectivityMonitor")
            .field("base_url", &self.client.base_url())
            .field("connectivity", &self.current())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> ConnectivityMonitor {
        let client = RecordStoreClient::new("http://127.0.0.1:9/api").unwrap();
        ConnectivityMonitor::new(client, Duration::from_millis(200))
    }

    #[test]
    fn unknown_routes_remote() {
        assert!(Connectivity::Unknown.routes_remote());
        assert!(Connectivity::Online.routes_remote());
        assert!(!Connectivity::Offline.routes_remote());
    }

    #[test]
    fn starts_unknown() {
        assert_eq!(monitor().current(), Connectivity::Unknown);
    }

    #[test]
    fn set_reports_changes_only() {
        let monitor = monitor();
        let rx = monitor.subscribe();

        assert!(monitor.set(Connectivity::Offline));
        assert!(!monitor.set(Connectivity::Offline));
        assert_eq!(*rx.borrow(), Connectivity::Offline);
    }

    #[tokio::test]
    async fn zero_interval_is_clamped() {
        let monitor = Arc::new(monitor());
        let task = monitor.clone().spawn_periodic(Duration::ZERO);

        tokio::time::timeout(Duration::from_secs(5), async {
            let mut rx = monitor.subscribe();
            while *rx.borrow_and_update() == Connectivity::Unknown {
                rx.changed().await.unwrap();
            }
        })
        .await
        .expect("first health check should run");

        assert!(!task.is_finished());
        assert_eq!(monitor.current(), Connectivity::Offline);
        task.abort();
    }

    #[tokio::test]
    async fn unreachable_store_is_offline() {
        let monitor = monitor();
        assert!(!monitor.check_status().await);
        assert_eq!(monitor.current(), Connectivity::Offline);
    }
}
