//! Git repository storage.
//!
//! This module provides cloning and updating of remote Git repositories on
//! behalf of a runner, along with the credential formatting and URL
//! sanitizing that synchronization relies on.

mod config;
mod credentials;
mod git_ops;
mod pull_step;
mod sanitize;

pub use config::{DEFAULT_PULL_INTERVAL, GitStorageConfig, GitStorageConfigBuilder};
pub use credentials::{AccessToken, GitCredentials, InlineCredentials};
pub use git_ops::GitRepository;
pub use sanitize::strip_auth_from_url;
