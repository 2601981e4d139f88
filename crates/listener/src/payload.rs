//! `repository` webhook payloads.
//!
//! Only the fields the policy reads are modelled; everything else in the
//! payload is ignored during deserialization.

use policy::{
    RepositoryAction, RepositoryEvent, RepositoryName, RepositoryOwner, RepositoryRef, UserLogin,
};
use serde::Deserialize;
use thiserror::Error;

/// The `X-GitHub-Event` value for repository events.
pub const REPOSITORY_EVENT: &str = "repository";

/// Errors raised for a `repository` payload that cannot be understood.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The body is not JSON or lacks a required field.
    #[error("Malformed repository payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A required identifier is present but empty.
    #[error("Repository payload has an empty '{field}'")]
    EmptyField {
        /// JSON path of the empty field.
        field: &'static str,
    },
}

#[derive(Debug, Deserialize)]
struct AccountPayload {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    name: String,
    private: bool,
    owner: AccountPayload,
}

/// The subset of a `repository` webhook body the policy needs.
#[derive(Debug, Deserialize)]
pub struct RepositoryWebhook {
    action: String,
    repository: RepositoryPayload,
    sender: AccountPayload,
}

impl RepositoryWebhook {
    /// Parses a raw webhook body.
    pub fn from_slice(body: &[u8]) -> Result<Self, PayloadError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Converts the payload into a [`RepositoryEvent`].
    ///
    /// Returns `Ok(None)` for actions the policy does not handle.
    pub fn into_event(self) -> Result<Option<RepositoryEvent>, PayloadError> {
        let Some(action) = RepositoryAction::from_webhook(&self.action) else {
            return Ok(None);
        };

        let owner = RepositoryOwner::new(self.repository.owner.login).ok_or(
            PayloadError::EmptyField {
                field: "repository.owner.login",
            },
        )?;
        let name = RepositoryName::new(self.repository.name).ok_or(PayloadError::EmptyField {
            field: "repository.name",
        })?;
        let sender = UserLogin::new(self.sender.login).ok_or(PayloadError::EmptyField {
            field: "sender.login",
        })?;

        Ok(Some(RepositoryEvent {
            action,
            repository: RepositoryRef::new(owner, name),
            private: self.repository.private,
            sender,
        }))
    }
}
