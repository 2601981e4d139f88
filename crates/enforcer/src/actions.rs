//! Execution of a policy outcome against GitHub.
//!
//! `Warn` opens the monitor issue. `Enforce` opens the privatized issue and
//! then flips the repository to private. The issue always goes first so the
//! notification exists even if the visibility change fails; the two calls are
//! independent and neither is rolled back when the other fails.

use policy::{
    compose_issue, ActionError, AnalyzeError, CodeRepository, GitHubError, IssueTracker, Outcome,
    PolicyAction, PolicyConfig, RepositoryEvent, RepositoryRef, RepositoryUpdate,
};
use tracing::info;

/// Makes `repo` private. No read-back is performed.
pub async fn set_private(
    repository: &dyn CodeRepository,
    repo: &RepositoryRef,
) -> Result<(), GitHubError> {
    repository
        .update_repository(repo, &RepositoryUpdate::make_private())
        .await
}

/// Performs the GitHub mutations `outcome` calls for.
///
/// # Errors
///
/// [`AnalyzeError::Actions`] listing every mutation that failed. Both
/// mutations are attempted even if the first one fails.
pub async fn execute(
    outcome: Outcome,
    config: &PolicyConfig,
    event: &RepositoryEvent,
    repository: &dyn CodeRepository,
    issues: &dyn IssueTracker,
) -> Result<(), AnalyzeError> {
    let Some(issue) = compose_issue(outcome, config, event) else {
        return Ok(());
    };

    let repo = &event.repository;
    let mut failures = Vec::new();

    match issues.create_issue(repo, &issue).await {
        Ok(number) => info!(repository = %repo, issue = %number, "opened notification issue"),
        Err(source) => failures.push(ActionError {
            action: PolicyAction::CreateIssue,
            source,
        }),
    }

    if outcome.changes_visibility() {
        info!(repository = %repo, "Privatizing Repo: {}", repo.name);
        match set_private(repository, repo).await {
            Ok(()) => info!(repository = %repo, "repository is now private"),
            Err(source) => failures.push(ActionError {
                action: PolicyAction::SetPrivate,
                source,
            }),
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(AnalyzeError::Actions(failures))
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
