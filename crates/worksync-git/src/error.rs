//! Error types for runner storage backends.

use std::path::PathBuf;

use worksync_core::SecretError;

/// Raw output of a failed git invocation.
///
/// Only attached to a [`StorageError::Git`] when no credentials participated
/// in the command.
#[derive(Debug, thiserror::Error)]
#[error("{stderr}")]
pub struct GitProcessError {
    /// Captured stderr of the git process.
    pub stderr: String,
}

/// Errors that can occur when synchronizing remotely stored code.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The credential configuration is malformed.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The URL is not handled by any registered storage backend.
    #[error("unsupported storage URL: {url}. Only git URLs are supported")]
    UnsupportedUrl { url: String },

    /// A URL could not be parsed.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The working copy at the destination belongs to a different repository.
    #[error(
        "the existing repository at {} ({existing}) does not match the configured repository {configured}",
        .destination.display()
    )]
    RepositoryMismatch {
        destination: PathBuf,
        existing: String,
        configured: String,
    },

    /// A git invocation exited non-zero.
    ///
    /// `detail` carries the process stderr and is absent whenever credentials
    /// participated in the command, so tokens never reach logs or error
    /// trackers. `repository` is always the credential-stripped URL.
    #[error("failed to {operation} repository {repository:?} with exit code {code}")]
    Git {
        operation: &'static str,
        repository: String,
        code: i32,
        #[source]
        detail: Option<GitProcessError>,
    },

    /// A secret reference was used but no secret store was injected.
    #[error("no secret store configured to resolve secret {0:?}")]
    MissingSecretStore(String),

    /// A secret reference could not be resolved.
    #[error(transparent)]
    Secret(#[from] SecretError),

    /// A replayable step would embed raw secret material.
    #[error(
        "please store your access token in a secret store before converting this storage object to a pull step"
    )]
    RawAccessToken,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Creates a new invalid-credentials error.
    pub fn invalid_credentials(msg: impl Into<String>) -> Self {
        Self::InvalidCredentials(msg.into())
    }

    /// Creates a new invalid-URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if this is a transient error that might succeed on retry.
    ///
    /// Retry policy itself belongs to the owning scheduler; this only
    /// classifies.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Git { .. } | Self::Io(_) | Self::Secret(SecretError::Unavailable { .. })
        )
    }
}
