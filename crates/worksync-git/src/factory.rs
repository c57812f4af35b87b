//! Storage selection from a URL.

use url::Url;

use crate::error::StorageError;
use crate::repository::{GitRepository, GitStorageConfig};
use crate::storage::RunnerStorage;

/// Creates a storage object for the given URL.
///
/// URLs with a `git://` scheme or a path ending in `.git` route to
/// [`GitRepository`]; `pull_interval` is passed through verbatim (`None`
/// means a one-time sync). Additional backends plug in here by recognizing
/// their own URL shapes ahead of the fallback error, without changes to the
/// existing implementations.
///
/// # Errors
///
/// Returns [`StorageError::UnsupportedUrl`] for anything no backend
/// recognizes, and [`StorageError::InvalidUrl`] when the input does not
/// parse at all.
pub fn create_storage_from_url(
    url: &str,
    pull_interval: Option<u64>,
) -> Result<Box<dyn RunnerStorage>, StorageError> {
    let parsed = Url::parse(url).map_err(|e| StorageError::invalid_url(url, e))?;

    if parsed.scheme() == "git" || parsed.path().ends_with(".git") {
        let config = GitStorageConfig::builder()
            .url(url)
            .pull_interval(pull_interval)
            .build()?;
        return Ok(Box::new(GitRepository::new(config)?));
    }

    Err(StorageError::UnsupportedUrl {
        url: url.to_string(),
    })
}
