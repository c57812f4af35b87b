//! Background synchronization.
//!
//! This module drives repeated [`pull_code`](crate::RunnerStorage::pull_code)
//! invocations on a storage's configured cadence, serializing calls per
//! destination as the storage contract requires.

mod scheduler;
mod state;

pub use scheduler::{SyncConfig, SyncHandle, SyncScheduler};
pub use state::SyncState;
