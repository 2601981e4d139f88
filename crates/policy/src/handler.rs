//! The seam between the webhook host and the policy.

use async_trait::async_trait;

use crate::{AnalyzeError, Outcome, RepositoryEvent};

/// Handles one `repository` event end to end.
///
/// Implemented by `enforcer::Enforcer`; the listener only sees this trait, so
/// tests can substitute a recording or failing handler.
#[async_trait]
pub trait RepositoryEventHandler: Send + Sync {
    /// Resolves the policy for `event`, evaluates it, and executes the outcome.
    async fn handle(&self, event: &RepositoryEvent) -> Result<Outcome, AnalyzeError>;
}
