//! Runner storage abstraction.

use std::any::Any;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::StorageError;
use worksync_core::PullStep;

/// A storage capability a runner uses to retrieve remotely stored workflow
/// code.
///
/// # Implementors
///
/// - [`GitRepository`](crate::GitRepository) - Pulls code from a Git repository
/// - (Future) Object-store and archive backends may register through the
///   factory without changes to existing implementations
///
/// Callers must serialize [`pull_code`](RunnerStorage::pull_code) invocations
/// per destination; implementations provide no mutual exclusion of their own.
#[async_trait]
pub trait RunnerStorage: Send + Sync {
    /// Sets the base path under which pulled contents are placed.
    ///
    /// Must be called before the first [`pull_code`](RunnerStorage::pull_code)
    /// for deterministic placement; existing on-disk content is never
    /// migrated.
    fn set_base_path(&mut self, path: PathBuf);

    /// The cadence, in seconds, at which contents should be pulled.
    ///
    /// `None` means remote storage performs a one-time sync and the caller
    /// owns any re-invocation policy.
    fn pull_interval(&self) -> Option<u64>;

    /// The local directory contents are pulled into.
    fn destination(&self) -> PathBuf;

    /// Pulls contents from remote storage to the local filesystem.
    async fn pull_code(&self) -> Result<(), StorageError>;

    /// Renders a replayable step describing this synchronization.
    ///
    /// Never touches git or the filesystem, and never embeds resolved
    /// secrets.
    fn to_pull_step(&self) -> Result<PullStep, StorageError>;

    /// Upcast used by [`same_storage`](RunnerStorage::same_storage).
    fn as_any(&self) -> &dyn Any;

    /// Identity comparison between storage objects.
    ///
    /// Implementations compare their identity fields only, so credential
    /// rotation or cadence changes do not change identity.
    fn same_storage(&self, other: &dyn RunnerStorage) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct MockStorage {
        destination: PathBuf,
    }

    #[async_trait]
    impl RunnerStorage for MockStorage {
        fn set_base_path(&mut self, path: PathBuf) {
            self.destination = path;
        }

        fn pull_interval(&self) -> Option<u64> {
            Some(60)
        }

        fn destination(&self) -> PathBuf {
            self.destination.clone()
        }

        async fn pull_code(&self) -> Result<(), StorageError> {
            Ok(())
        }

        fn to_pull_step(&self) -> Result<PullStep, StorageError> {
            Ok(PullStep::new("mock://repo"))
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn same_storage(&self, other: &dyn RunnerStorage) -> bool {
            other
                .as_any()
                .downcast_ref::<Self>()
                .is_some_and(|other| self == other)
        }
    }

    #[tokio::test]
    async fn test_mock_storage_pull() {
        let storage = MockStorage {
            destination: PathBuf::from("/tmp/mock"),
        };

        assert!(storage.pull_code().await.is_ok());
        assert_eq!(storage.pull_interval(), Some(60));
    }

    #[test]
    fn test_same_storage_downcast() {
        let a = MockStorage {
            destination: PathBuf::from("/tmp/a"),
        };
        let b = MockStorage {
            destination: PathBuf::from("/tmp/a"),
        };
        let c = MockStorage {
            destination: PathBuf::from("/tmp/c"),
        };

        assert!(a.same_storage(&b));
        assert!(!a.same_storage(&c));
    }
}
