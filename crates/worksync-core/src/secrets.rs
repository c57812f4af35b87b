//! Secret references and the secret store boundary.
//!
//! Storage backends never read or write secret storage directly. They hold a
//! [`SecretRef`] naming an entry and an injected [`SecretStore`] capability
//! that resolves the entry to plaintext on demand. Replayable artifacts only
//! ever carry the placeholder form of a reference.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Errors raised when resolving secret references.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    /// The named secret does not exist in the store.
    #[error("secret not found: {0}")]
    NotFound(String),

    /// The store backend could not be reached.
    #[error("secret store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl SecretError {
    /// Creates a new unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// A non-secret reference to an entry in a secret store.
///
/// A `SecretRef` carries only the entry name and can be embedded in
/// configuration, logs and replayable steps without leaking the value it
/// points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretRef {
    name: String,
}

impl SecretRef {
    /// Creates a reference to the named secret.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the secret entry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the placeholder token used in replayable step definitions.
    ///
    /// The execution engine substitutes the resolved value at replay time.
    pub fn placeholder(&self) -> String {
        format!("{{{{ secrets.{} }}}}", self.name)
    }
}

impl fmt::Display for SecretRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.placeholder())
    }
}

/// Resolves secret references to plaintext values.
///
/// # Implementors
///
/// - [`MemorySecretStore`] - Map-backed store for tests and embedded setups
/// - (Host) Vault-, file- or API-backed stores provided by the owning process
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Resolves the named secret to its plaintext value.
    ///
    /// # Errors
    ///
    /// - [`SecretError::NotFound`] if no entry exists under `name`
    /// - [`SecretError::Unavailable`] if the backend cannot answer
    async fn resolve(&self, name: &str) -> Result<String, SecretError>;
}

/// An in-memory secret store.
///
/// Intended for tests and for embedded setups where the host process
/// provisions secrets at startup.
#[derive(Default, Clone)]
pub struct MemorySecretStore {
    entries: HashMap<String, String>,
}

impl MemorySecretStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a secret, consuming and returning the store.
    pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a secret to the store.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn resolve(&self, name: &str) -> Result<String, SecretError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| SecretError::NotFound(name.to_string()))
    }
}

impl fmt::Debug for MemorySecretStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Entry values stay out of Debug output
        f.debug_struct("MemorySecretStore")
            .field("entries", &self.entries.keys())
            .finish()
    }
}
