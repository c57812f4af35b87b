//! Git storage configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use super::credentials::GitCredentials;
use crate::error::StorageError;

/// Default sync cadence in seconds when none is configured explicitly.
pub const DEFAULT_PULL_INTERVAL: u64 = 60;

/// Configuration for one git repository synchronization target.
///
/// Identity is `url` + `branch` + `name`; credentials and cadence are
/// excluded so they can rotate without invalidating cached identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitStorageConfig {
    /// The repository clone URL.
    url: String,

    /// The branch to pull; `None` means the provider default branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    branch: Option<String>,

    /// Credentials used when pulling from a private repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credentials: Option<GitCredentials>,

    /// Whether to recurse into submodules when cloning and pulling.
    #[serde(default)]
    include_submodules: bool,

    /// Name of the local directory the repository syncs into.
    name: String,

    /// Sync cadence in seconds; `None` means a one-time sync.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pull_interval: Option<u64>,
}

impl GitStorageConfig {
    /// Creates a new builder.
    pub fn builder() -> GitStorageConfigBuilder {
        GitStorageConfigBuilder::default()
    }

    /// Returns the repository clone URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the branch, when pinned.
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// Returns the configured credentials.
    pub fn credentials(&self) -> Option<&GitCredentials> {
        self.credentials.as_ref()
    }

    /// Returns whether submodules are recursed into.
    pub fn include_submodules(&self) -> bool {
        self.include_submodules
    }

    /// Returns the local directory name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sync cadence in seconds.
    pub fn pull_interval(&self) -> Option<u64> {
        self.pull_interval
    }
}

/// Identity comparison: `url`, `branch` and `name` only.
impl PartialEq for GitStorageConfig {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && self.branch == other.branch && self.name == other.name
    }
}

impl Eq for GitStorageConfig {}

/// Derives a directory name from the URL's last path segment, with the
/// `.git` suffix stripped and the branch appended when one is set, so
/// distinct branches of the same repository land in distinct directories.
fn derive_name(url: &str, branch: Option<&str>) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.to_string(),
    };
    let repo = path
        .rsplit('/')
        .next()
        .unwrap_or(path.as_str())
        .trim_end_matches(".git");
    match branch {
        Some(branch) => format!("{repo}-{branch}"),
        None => repo.to_string(),
    }
}

/// Builder for [`GitStorageConfig`].
#[derive(Debug, Default)]
pub struct GitStorageConfigBuilder {
    url: Option<String>,
    branch: Option<String>,
    credentials: Option<GitCredentials>,
    include_submodules: bool,
    name: Option<String>,
    pull_interval: Option<Option<u64>>,
}

impl GitStorageConfigBuilder {
    /// Sets the repository clone URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Pins the branch to pull.
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Sets the credentials.
    pub fn credentials(mut self, credentials: impl Into<GitCredentials>) -> Self {
        self.credentials = Some(credentials.into());
        self
    }

    /// Enables or disables submodule recursion.
    pub fn include_submodules(mut self, include: bool) -> Self {
        self.include_submodules = include;
        self
    }

    /// Overrides the derived directory name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the sync cadence; `None` means a one-time sync.
    ///
    /// Defaults to [`DEFAULT_PULL_INTERVAL`] when never called.
    pub fn pull_interval(mut self, interval: Option<u64>) -> Self {
        self.pull_interval = Some(interval);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the URL is missing or the
    /// credentials are malformed (a username without any secret field, or
    /// inline credentials with no secret field at all).
    pub fn build(self) -> Result<GitStorageConfig, StorageError> {
        let url = self
            .url
            .ok_or_else(|| StorageError::invalid_url("", "url is required"))?;

        if let Some(credentials) = &self.credentials {
            credentials.validate()?;
        }

        let name = self
            .name
            .unwrap_or_else(|| derive_name(&url, self.branch.as_deref()));

        Ok(GitStorageConfig {
            url,
            branch: self.branch,
            credentials: self.credentials,
            include_submodules: self.include_submodules,
            name,
            pull_interval: self
                .pull_interval
                .unwrap_or(Some(DEFAULT_PULL_INTERVAL)),
        })
    }
}
