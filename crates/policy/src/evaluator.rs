//! Policy evaluation.
//!
//! [`evaluate`] is a pure function from an event and a resolved configuration
//! to an [`Outcome`]. It performs no I/O; the orchestration layer executes the
//! outcome.
//!
//! ## Rule order
//!
//! The checks short-circuit in this order:
//!
//! 1. `publicized` event while private → public conversions are disabled → skip
//! 2. repository is on the exclusion list → skip
//! 3. repository is already private → skip
//! 4. monitor-only mode → warn
//! 5. otherwise → enforce
//!
//! Exclusion therefore wins over monitor mode, and a repository that is already
//! private never produces an issue.

use tracing::info;

use crate::{PolicyConfig, RepositoryAction, RepositoryEvent};

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// A private repository was made public, but `enablePrivateToPublic` is off.
    ConversionsDisabled,
    /// The repository name is listed in `excludeRepos`.
    Excluded,
    /// The repository is not publicly visible.
    NotPublic,
}

impl SkipReason {
    /// Human-readable description for logs.
    pub fn describe(self) -> &'static str {
        match self {
            Self::ConversionsDisabled => "publicized but enablePrivateToPublic is set to false",
            Self::Excluded => "part of the exclusion list",
            Self::NotPublic => "not publicly visible",
        }
    }
}

/// The decision reached for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Take no action.
    Skip(SkipReason),
    /// Open a notification issue; leave visibility unchanged.
    Warn,
    /// Open a notification issue and make the repository private.
    Enforce,
}

impl Outcome {
    /// Human-readable reason for the decision.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Skip(reason) => reason.describe(),
            Self::Warn => "public repository in monitor-only mode",
            Self::Enforce => "public repository while public repositories are disabled",
        }
    }

    /// Returns `true` if the outcome requires a visibility change.
    pub fn changes_visibility(self) -> bool {
        matches!(self, Self::Enforce)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip(_) => f.write_str("skip"),
            Self::Warn => f.write_str("warn"),
            Self::Enforce => f.write_str("enforce"),
        }
    }
}

/// Decides what to do about `event` under `config`.
pub fn evaluate(event: &RepositoryEvent, config: &PolicyConfig) -> Outcome {
    let repo = &event.repository;

    if let Some(reason) = skip_reason(event, config) {
        info!(repository = %repo, reason = reason.describe(), "Repo: {} is {}", repo.name, reason.describe());
        return Outcome::Skip(reason);
    }

    info!(repository = %repo, "Repo: {} is public", repo.name);
    if config.monitor_only {
        Outcome::Warn
    } else {
        Outcome::Enforce
    }
}

fn skip_reason(event: &RepositoryEvent, config: &PolicyConfig) -> Option<SkipReason> {
    if event.action == RepositoryAction::Publicized && !config.enable_private_to_public {
        return Some(SkipReason::ConversionsDisabled);
    }
    if config.is_excluded(&event.repository.name) {
        return Some(SkipReason::Excluded);
    }
    if event.private {
        return Some(SkipReason::NotPublic);
    }
    None
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
