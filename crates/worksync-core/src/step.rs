//! Replayable pull step definitions.
//!
//! A pull step is a declarative description of one repository
//! synchronization, consumed by an execution engine that replays the
//! operation without access to this crate's runtime state. The field names
//! `repository`, `branch` and `credentials` are a stable contract that other
//! tooling depends on.

use serde::{Deserialize, Serialize};

/// Credentials carried by a pull step.
///
/// Secret material never appears here: token slots carry the placeholder
/// form of a secret reference, substituted by the engine at replay time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepCredentials {
    /// A placeholder referencing a whole externally stored credential set.
    Reference(String),

    /// Inline fields with the access token replaced by its placeholder.
    Fields {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
        access_token: String,
    },
}

/// A declarative description of one repository synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullStep {
    /// The repository clone URL.
    pub repository: String,

    /// The branch to check out; `None` means the provider default branch.
    pub branch: Option<String>,

    /// Credential placeholders, present only for private repositories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<StepCredentials>,
}

impl PullStep {
    /// Creates a step for the given repository with no branch pin and no
    /// credentials.
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            branch: None,
            credentials: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_step_shape() {
        let step = PullStep::new("https://github.com/org/repo.git");
        let json = serde_json::to_value(&step).unwrap();

        assert_eq!(json["repository"], "https://github.com/org/repo.git");
        // The branch key is always present so replay engines see an explicit null
        assert!(json.as_object().unwrap().contains_key("branch"));
        assert!(json["branch"].is_null());
        assert!(!json.as_object().unwrap().contains_key("credentials"));
    }

    #[test]
    fn test_reference_credentials_serialize_as_string() {
        let step = PullStep {
            repository: "https://github.com/org/repo.git".to_string(),
            branch: Some("main".to_string()),
            credentials: Some(StepCredentials::Reference(
                "{{ secrets.github-creds }}".to_string(),
            )),
        };
        let json = serde_json::to_value(&step).unwrap();

        assert_eq!(json["branch"], "main");
        assert_eq!(json["credentials"], "{{ secrets.github-creds }}");
    }

    #[test]
    fn test_field_credentials_skip_missing_username() {
        let step = PullStep {
            repository: "https://github.com/org/repo.git".to_string(),
            branch: None,
            credentials: Some(StepCredentials::Fields {
                username: None,
                access_token: "{{ secrets.deploy-token }}".to_string(),
            }),
        };
        let json = serde_json::to_value(&step).unwrap();

        assert_eq!(json["credentials"]["access_token"], "{{ secrets.deploy-token }}");
        assert!(!json["credentials"].as_object().unwrap().contains_key("username"));
    }

    #[test]
    fn test_round_trip() {
        let step = PullStep {
            repository: "https://gitlab.com/org/repo.git".to_string(),
            branch: Some("develop".to_string()),
            credentials: Some(StepCredentials::Fields {
                username: Some("alice".to_string()),
                access_token: "{{ secrets.gitlab-token }}".to_string(),
            }),
        };

        let json = serde_json::to_string(&step).unwrap();
        let back: PullStep = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }
}
