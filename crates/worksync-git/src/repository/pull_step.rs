//! Pull step rendering.
//!
//! Turns a storage configuration into the declarative mapping an execution
//! engine replays later. Secret-backed tokens render as placeholders; raw
//! inline tokens are refused so plaintext secrets never land in a step
//! definition.

use super::config::GitStorageConfig;
use super::credentials::{AccessToken, GitCredentials};
use crate::error::StorageError;
use worksync_core::{PullStep, StepCredentials};

pub(super) fn render(config: &GitStorageConfig) -> Result<PullStep, StorageError> {
    let credentials = match config.credentials() {
        None => None,
        Some(GitCredentials::Secret(secret)) => {
            Some(StepCredentials::Reference(secret.placeholder()))
        }
        Some(GitCredentials::Inline(inline)) => match inline.access_token() {
            Some(AccessToken::Secret(secret)) => Some(StepCredentials::Fields {
                username: inline.username().map(str::to_string),
                access_token: secret.placeholder(),
            }),
            Some(AccessToken::Raw(_)) => return Err(StorageError::RawAccessToken),
            // Username/password-only credentials stay out of the step; the
            // engine falls back to its own credential handling
            None => None,
        },
    };

    Ok(PullStep {
        repository: config.url().to_string(),
        branch: config.branch().map(str::to_string),
        credentials,
    })
}
