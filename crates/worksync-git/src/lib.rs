//! # Worksync Git Backend
//!
//! Git-backed code storage for Worksync runners.
//!
//! This crate keeps a local working directory in sync with a remote Git
//! repository so that a runner can always execute the latest (or a pinned)
//! version of remotely stored workflow code, without that code being baked
//! into the execution environment.
//!
//! ## Features
//!
//! - Clone-or-update synchronization via the system `git` CLI
//! - Provider-aware credential injection (GitHub, GitLab, Bitbucket,
//!   Bitbucket Server) that never persists secrets to logs or errors
//! - Replayable pull step serialization for deployment tooling
//! - Background sync on a per-repository cadence
//!
//! ## Example
//!
//! ```ignore
//! use worksync_git::{GitRepository, GitStorageConfig};
//!
//! let config = GitStorageConfig::builder()
//!     .url("https://github.com/org/repo.git")
//!     .branch("main")
//!     .build()?;
//!
//! let mut storage = GitRepository::new(config)?;
//! storage.set_base_path("/var/lib/worksync/code");
//! storage.pull_code().await?;
//! ```

pub mod error;
pub mod factory;
pub mod repository;
pub mod storage;
pub mod sync;

// Re-exports
pub use error::StorageError;
pub use factory::create_storage_from_url;
pub use repository::{
    AccessToken, DEFAULT_PULL_INTERVAL, GitCredentials, GitRepository, GitStorageConfig,
    InlineCredentials, strip_auth_from_url,
};
pub use storage::RunnerStorage;
pub use sync::{SyncConfig, SyncHandle, SyncScheduler, SyncState};

// Re-export worksync_core for consumers
pub use worksync_core;
