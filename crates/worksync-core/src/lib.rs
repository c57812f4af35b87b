//! Worksync Core - Domain types shared by storage backends
//!
//! This crate provides the secret-reference boundary used to keep
//! credential material out of replayable artifacts, and the pull step
//! wire contract consumed by deployment tooling.

pub mod secrets;
pub mod step;

pub use secrets::{MemorySecretStore, SecretError, SecretRef, SecretStore};
pub use step::{PullStep, StepCredentials};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_defined() {
        assert!(!version().is_empty());
    }

    #[test]
    fn version_is_semver() {
        let v = version();
        assert_eq!(v.split('.').count(), 3, "Version should be semver");
    }
}
