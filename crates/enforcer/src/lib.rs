//! Policy orchestration for public repositories.
//!
//! [`Enforcer`] drives one repository event through the whole sequence:
//!
//! 1. resolve the organization policy ([`resolver::resolve_config`]),
//! 2. evaluate it ([`policy::evaluate`]),
//! 3. execute the outcome ([`actions::execute`]).
//!
//! The steps run strictly in order: the config fetch completes before
//! evaluation, and the issue is created before the visibility change.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** This crate sequences calls between business logic
//! in the [`policy`] crate and the GitHub port traits. It contains no policy
//! rules of its own and no transport code.

use std::sync::Arc;

use async_trait::async_trait;
use policy::{
    evaluate, AnalyzeError, CodeRepository, ConfigLocation, IssueTracker, Outcome,
    RepositoryEvent, RepositoryEventHandler,
};
use tracing::{info, instrument};

pub mod actions;
pub mod resolver;

#[cfg(test)]
mod test_helpers;

pub use actions::{execute, set_private};
pub use resolver::{decode_content, resolve_config};

/// Resolves, evaluates, and executes the policy for repository events.
///
/// Holds no per-event state; one instance serves every delivery.
#[derive(Clone)]
pub struct Enforcer {
    repository: Arc<dyn CodeRepository>,
    issues: Arc<dyn IssueTracker>,
    location: ConfigLocation,
}

impl Enforcer {
    /// Creates an enforcer reading its policy from `location`.
    pub fn new(
        repository: Arc<dyn CodeRepository>,
        issues: Arc<dyn IssueTracker>,
        location: ConfigLocation,
    ) -> Self {
        Self {
            repository,
            issues,
            location,
        }
    }

    /// Where the organization policy is read from.
    pub fn location(&self) -> &ConfigLocation {
        &self.location
    }

    /// Handles one repository event and returns the decision taken.
    ///
    /// # Errors
    ///
    /// - [`AnalyzeError::Config`] if the policy file is unusable; nothing is done.
    /// - [`AnalyzeError::Actions`] if a GitHub mutation failed.
    #[instrument(skip_all, fields(repository = %event.repository, action = %event.action))]
    pub async fn analyze(&self, event: &RepositoryEvent) -> Result<Outcome, AnalyzeError> {
        let config = resolver::resolve_config(
            self.repository.as_ref(),
            &self.location,
            &event.repository.owner,
        )
        .await?;

        let outcome = evaluate(event, &config);
        info!(outcome = %outcome, reason = outcome.reason(), "policy evaluated");

        actions::execute(
            outcome,
            &config,
            event,
            self.repository.as_ref(),
            self.issues.as_ref(),
        )
        .await?;

        Ok(outcome)
    }
}

impl std::fmt::Debug for Enforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enforcer")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RepositoryEventHandler for Enforcer {
    async fn handle(&self, event: &RepositoryEvent) -> Result<Outcome, AnalyzeError> {
        self.analyze(event).await
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
