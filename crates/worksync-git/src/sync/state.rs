//! Synchronization state tracking.

use std::time::Instant;

use parking_lot::RwLock;

/// Tracks the outcome of repeated sync attempts for one storage.
#[derive(Debug)]
pub struct SyncState {
    /// The last successful sync time.
    last_sync: RwLock<Option<Instant>>,
    /// The last error message, if any.
    last_error: RwLock<Option<String>>,
    /// Number of consecutive failures.
    failure_count: RwLock<u32>,
}

impl SyncState {
    /// Creates a new SyncState.
    pub fn new() -> Self {
        Self {
            last_sync: RwLock::new(None),
            last_error: RwLock::new(None),
            failure_count: RwLock::new(0),
        }
    }

    /// Returns the time of the last successful sync.
    pub fn last_sync(&self) -> Option<Instant> {
        *self.last_sync.read()
    }

    /// Returns the duration since the last successful sync.
    pub fn time_since_sync(&self) -> Option<std::time::Duration> {
        self.last_sync.read().map(|t| t.elapsed())
    }

    /// Records a successful sync.
    pub fn record_success(&self) {
        let mut last_sync = self.last_sync.write();
        let mut last_error = self.last_error.write();
        let mut failure_count = self.failure_count.write();

        *last_sync = Some(Instant::now());
        *last_error = None;
        *failure_count = 0;
    }

    /// Records a failed sync.
    pub fn record_failure(&self, error: impl Into<String>) {
        let mut last_error = self.last_error.write();
        let mut failure_count = self.failure_count.write();

        *last_error = Some(error.into());
        *failure_count += 1;
    }

    /// Returns the last error message.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    /// Returns the number of consecutive failures.
    pub fn failure_count(&self) -> u32 {
        *self.failure_count.read()
    }

    /// Returns true if at least one sync has completed.
    pub fn is_synced(&self) -> bool {
        self.last_sync.read().is_some()
    }

    /// Returns true if the storage has synced and the last attempt
    /// succeeded.
    pub fn is_healthy(&self) -> bool {
        self.is_synced() && self.last_error.read().is_none()
    }

    /// Resets all state.
    pub fn reset(&self) {
        let mut last_sync = self.last_sync.write();
        let mut last_error = self.last_error.write();
        let mut failure_count = self.failure_count.write();

        *last_sync = None;
        *last_error = None;
        *failure_count = 0;
    }
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new()
    }
}
