//! Error types for resolving and executing the policy.
//!
//! [`ConfigError`] covers every way an organization policy file can be
//! unusable. A missing file is deliberately absent from this list: it resolves
//! to the built-in defaults and is never an error.
//!
//! [`AnalyzeError`] is what one webhook delivery can fail with. It is caught and
//! logged once, at the webhook boundary.
//!
//! GitHub API failures are defined next to the port traits in
//! [`crate::github`].

use thiserror::Error;

use crate::GitHubError;

/// Errors produced while turning a fetched policy file into a
/// [`crate::PolicyConfig`].
///
/// All variants are operator errors: the file exists but cannot be used. They
/// propagate to the webhook boundary instead of silently falling back to the
/// defaults, so a broken policy file is visible in the logs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file content was not valid base64 or not valid UTF-8.
    #[error("Policy file could not be decoded: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
    },

    /// The file is not well-formed YAML.
    #[error("Policy file is not valid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The YAML document parsed, but its top level is not a mapping.
    #[error("Policy file must contain a mapping at the top level, found {found}")]
    NotAMapping {
        /// Kind of YAML node found instead (e.g. `"sequence"`).
        found: &'static str,
    },

    /// A known key carries a value of the wrong type.
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue {
        /// The offending YAML key.
        key: String,
        /// Why the value was rejected.
        message: String,
    },
}

impl ConfigError {
    /// Returns `true` for malformed-YAML errors.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

// ---------------------------------------------------------------------------
// Execution errors
// ---------------------------------------------------------------------------

/// A GitHub mutation the policy performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyAction {
    /// Opening the notification issue.
    CreateIssue,
    /// Flipping the repository to private.
    SetPrivate,
}

impl std::fmt::Display for PolicyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateIssue => f.write_str("create issue"),
            Self::SetPrivate => f.write_str("set private"),
        }
    }
}

/// One failed GitHub mutation.
#[derive(Debug, Error)]
#[error("{action} failed: {source}")]
pub struct ActionError {
    /// The mutation that failed.
    pub action: PolicyAction,
    /// The underlying API failure.
    #[source]
    pub source: GitHubError,
}

/// Errors that end the handling of one repository event.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The organization policy file exists but is unusable. No action is taken.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// One or more GitHub mutations failed.
    ///
    /// Mutations are independent: a failure in one does not prevent or roll
    /// back the other.
    #[error("{} policy action(s) failed: {}", .0.len(), join_actions(.0))]
    Actions(Vec<ActionError>),
}

fn join_actions(errors: &[ActionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
