//! Shared value types for the policy domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types describe
//! a whole event or request and are what flows between the evaluator, the
//! orchestration layer, and the GitHub ports.

use serde::Serialize;

use crate::{RepositoryName, RepositoryOwner, UserLogin};

// ---------------------------------------------------------------------------
// Repository references
// ---------------------------------------------------------------------------

/// Identifies one repository as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    /// Owning organization or user.
    pub owner: RepositoryOwner,
    /// Repository name.
    pub name: RepositoryName,
}

impl RepositoryRef {
    /// Creates a new [`RepositoryRef`].
    pub fn new(owner: RepositoryOwner, name: RepositoryName) -> Self {
        Self { owner, name }
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// The `repository` webhook actions the policy reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryAction {
    /// A repository was created.
    Created,
    /// A private repository was made public.
    Publicized,
}

impl RepositoryAction {
    /// Maps a webhook `action` string onto a handled action.
    ///
    /// Returns `None` for every action the policy ignores (`privatized`,
    /// `deleted`, `renamed`, ...).
    pub fn from_webhook(action: &str) -> Option<Self> {
        match action {
            "created" => Some(Self::Created),
            "publicized" => Some(Self::Publicized),
            _ => None,
        }
    }

    /// Returns the webhook spelling of this action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Publicized => "publicized",
        }
    }
}

impl std::fmt::Display for RepositoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `repository` webhook delivery, normalized for evaluation.
///
/// Ephemeral: built per delivery and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEvent {
    /// What happened to the repository.
    pub action: RepositoryAction,
    /// The repository the event is about.
    pub repository: RepositoryRef,
    /// Visibility of the repository as reported in the payload.
    pub private: bool,
    /// The user who triggered the event; mentioned in any issue opened.
    pub sender: UserLogin,
}

// ---------------------------------------------------------------------------
// GitHub requests
// ---------------------------------------------------------------------------

/// The content of an issue to open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    /// Issue title.
    pub title: String,
    /// Issue body (Markdown).
    pub body: String,
}

/// A partial repository update. Only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryUpdate {
    /// New visibility; `Some(true)` makes the repository private.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
}

impl RepositoryUpdate {
    /// An update that only flips the repository to private.
    pub fn make_private() -> Self {
        Self {
            private: Some(true),
        }
    }
}

/// A file fetched from a repository, still in its transport encoding.
///
/// GitHub returns file content base64-encoded, wrapped at 60 columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// Path of the file relative to the repository root.
    pub path: String,
    /// Base64-encoded bytes, possibly containing line breaks.
    pub encoded: String,
}
