//! Background sync scheduler.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::interval;
use tracing::{debug, info, warn};

use super::SyncState;
use crate::error::StorageError;
use crate::storage::RunnerStorage;

/// Configuration for the sync scheduler.
///
/// The cadence itself comes from the storage's `pull_interval`; this only
/// shapes the failure backoff.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Consecutive failures tolerated before backing off.
    pub max_failures: u32,
    /// Backoff multiplier applied past the failure threshold.
    pub backoff_multiplier: f64,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_failures: 3,
            backoff_multiplier: 2.0,
            max_backoff: Duration::from_secs(300),
        }
    }
}

/// Handle for controlling a running sync scheduler.
pub struct SyncHandle {
    /// Sender to signal shutdown.
    shutdown_tx: watch::Sender<bool>,
}

impl SyncHandle {
    /// Signals the scheduler to stop.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Drives a storage's `pull_code` on its configured cadence.
///
/// A storage without a pull interval gets exactly one sync. Syncs for one
/// storage run strictly one at a time; the scheduler is the serialization
/// point the storage contract asks callers to provide.
pub struct SyncScheduler {
    /// The storage to sync.
    storage: Arc<dyn RunnerStorage>,
    /// The current state.
    state: Arc<SyncState>,
    /// Configuration.
    config: SyncConfig,
    /// Current backoff duration.
    current_backoff: Arc<Mutex<Option<Duration>>>,
}

impl SyncScheduler {
    /// Creates a new sync scheduler.
    pub fn new(storage: Arc<dyn RunnerStorage>, state: Arc<SyncState>, config: SyncConfig) -> Self {
        Self {
            storage,
            state,
            config,
            current_backoff: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a scheduler with default configuration.
    pub fn with_defaults(storage: Arc<dyn RunnerStorage>, state: Arc<SyncState>) -> Self {
        Self::new(storage, state, SyncConfig::default())
    }

    /// Starts the background sync task.
    ///
    /// Returns a handle that can be used to stop the scheduler.
    pub fn start(self) -> SyncHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = SyncHandle { shutdown_tx };

        tokio::spawn(self.run(shutdown_rx));

        handle
    }

    /// Runs the scheduler loop.
    async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        let Some(secs) = self.storage.pull_interval() else {
            debug!("No pull interval configured, performing one-time sync");
            self.do_sync().await;
            return;
        };

        // tokio rejects a zero interval; a zero cadence means back-to-back
        let base = Duration::from_secs(secs).max(Duration::from_millis(1));
        let mut interval_timer = interval(base);

        info!("Starting sync scheduler with interval {:?}", base);

        loop {
            tokio::select! {
                _ = interval_timer.tick() => {
                    self.do_sync().await;

                    // Adjust cadence while backing off
                    let period = (*self.current_backoff.lock()).unwrap_or(base);
                    if period != interval_timer.period() {
                        interval_timer = interval(period);
                    }
                }
                result = shutdown_rx.changed() => {
                    if result.is_err() || *shutdown_rx.borrow() {
                        info!("Sync scheduler shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// Performs a single sync attempt.
    async fn do_sync(&self) {
        debug!("Starting scheduled sync to {:?}", self.storage.destination());

        match self.storage.pull_code().await {
            Ok(()) => {
                self.state.record_success();
                self.reset_backoff();
                debug!("Sync successful");
            }
            Err(e) => {
                self.state.record_failure(e.to_string());
                self.increase_backoff();
                warn!("Sync failed: {}", e);
            }
        }
    }

    /// Resets the backoff to the base cadence.
    fn reset_backoff(&self) {
        let mut backoff = self.current_backoff.lock();
        *backoff = None;
    }

    /// Increases the backoff duration after a failure.
    fn increase_backoff(&self) {
        let failure_count = self.state.failure_count();
        if failure_count < self.config.max_failures {
            return;
        }

        let base = self
            .storage
            .pull_interval()
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(1));
        let mut backoff = self.current_backoff.lock();
        let current = (*backoff).unwrap_or(base);
        let next = Duration::from_secs_f64(current.as_secs_f64() * self.config.backoff_multiplier);
        *backoff = Some(next.min(self.config.max_backoff));

        debug!(
            "Increased backoff to {:?} after {} failures",
            *backoff, failure_count
        );
    }

    /// Manually triggers a sync.
    pub async fn trigger_sync(&self) -> Result<(), StorageError> {
        info!("Manual sync triggered");
        let result = self.storage.pull_code().await;

        match &result {
            Ok(()) => {
                self.state.record_success();
                self.reset_backoff();
            }
            Err(e) => {
                self.state.record_failure(e.to_string());
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use worksync_core::PullStep;

    struct CountingStorage {
        interval: Option<u64>,
        pulls: AtomicU32,
    }

    impl CountingStorage {
        fn new(interval: Option<u64>) -> Self {
            Self {
                interval,
                pulls: AtomicU32::new(0),
            }
        }

        fn pulls(&self) -> u32 {
            self.pulls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RunnerStorage for CountingStorage {
        fn set_base_path(&mut self, _path: PathBuf) {}

        fn pull_interval(&self) -> Option<u64> {
            self.interval
        }

        fn destination(&self) -> PathBuf {
            PathBuf::from("/tmp/counting")
        }

        async fn pull_code(&self) -> Result<(), StorageError> {
            self.pulls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn to_pull_step(&self) -> Result<PullStep, StorageError> {
            Ok(PullStep::new("mock://counting"))
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn same_storage(&self, _other: &dyn RunnerStorage) -> bool {
            false
        }
    }

    #[test]
    fn test_sync_config_default() {
        let config = SyncConfig::default();
        assert_eq!(config.max_failures, 3);
        assert_eq!(config.backoff_multiplier, 2.0);
        assert_eq!(config.max_backoff, Duration::from_secs(300));
    }

    #[test]
    fn test_sync_handle_stop() {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = SyncHandle { shutdown_tx };

        assert!(!*shutdown_rx.borrow());
        handle.stop();
        assert!(shutdown_rx.has_changed().unwrap_or(false) || *shutdown_rx.borrow());
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_shot_storage_syncs_once() {
        let storage = Arc::new(CountingStorage::new(None));
        let state = Arc::new(SyncState::new());
        let scheduler = SyncScheduler::with_defaults(storage.clone(), state.clone());

        let _handle = scheduler.start();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(storage.pulls(), 1);
        assert!(state.is_healthy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_recurring_storage_keeps_syncing() {
        let storage = Arc::new(CountingStorage::new(Some(10)));
        let state = Arc::new(SyncState::new());
        let scheduler = SyncScheduler::with_defaults(storage.clone(), state.clone());

        let handle = scheduler.start();
        tokio::time::sleep(Duration::from_secs(35)).await;
        handle.stop();

        // First tick fires immediately, then every 10s
        assert!(storage.pulls() >= 3, "expected repeated syncs, got {}", storage.pulls());
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_sync_records_state() {
        let storage = Arc::new(CountingStorage::new(Some(10)));
        let state = Arc::new(SyncState::new());
        let scheduler = SyncScheduler::with_defaults(storage.clone(), state.clone());

        scheduler.trigger_sync().await.unwrap();

        assert_eq!(storage.pulls(), 1);
        assert!(state.is_healthy());
    }
}
