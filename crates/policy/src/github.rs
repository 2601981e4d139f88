//! GitHub port traits.
//!
//! The policy needs exactly three GitHub capabilities: read a file from a
//! repository, open an issue, and update repository settings. They are split
//! across two traits the way the GitHub API groups them. The `github` crate
//! implements both over the REST API; tests implement them in memory.
//!
//! ## Architectural Layer
//!
//! **Port definitions.** No transport details leak through these traits; the
//! only thing callers can distinguish is [`GitHubError::NotFound`] versus every
//! other failure.

use async_trait::async_trait;
use thiserror::Error;

use crate::{FileContent, IssueNumber, NewIssue, RepositoryRef, RepositoryUpdate};

/// Errors returned by the GitHub ports.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The requested repository, file, or endpoint does not exist (HTTP 404).
    #[error("Not found: {resource}")]
    NotFound {
        /// Description of the missing resource.
        resource: String,
    },

    /// GitHub answered with a non-success status other than 404.
    #[error("GitHub API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or the status reason.
        message: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// GitHub answered successfully but the body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl GitHubError {
    /// Returns `true` if the error means the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Repository-level capabilities: file contents and settings.
#[async_trait]
pub trait CodeRepository: Send + Sync {
    /// Fetches a file from the default branch of `repo`.
    ///
    /// # Errors
    ///
    /// [`GitHubError::NotFound`] if the repository or the file does not exist.
    async fn get_file_content(
        &self,
        repo: &RepositoryRef,
        path: &str,
    ) -> Result<FileContent, GitHubError>;

    /// Applies a partial settings update to `repo`.
    async fn update_repository(
        &self,
        repo: &RepositoryRef,
        update: &RepositoryUpdate,
    ) -> Result<(), GitHubError>;
}

/// Issue-level capabilities.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Opens a new issue in `repo` and returns its number.
    async fn create_issue(
        &self,
        repo: &RepositoryRef,
        issue: &NewIssue,
    ) -> Result<IssueNumber, GitHubError>;
}
