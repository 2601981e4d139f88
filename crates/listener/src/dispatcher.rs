//! Routing of webhook deliveries to the policy.
//!
//! [`Dispatcher::route`] decides whether a delivery concerns the policy at all.
//! [`Dispatcher::dispatch`] runs the handler for one event and is the single
//! place where a failed delivery is logged: nothing is retried and nothing is
//! propagated further.

use std::sync::Arc;

use policy::{DeliveryId, Outcome, RepositoryAction, RepositoryEvent, RepositoryEventHandler};
use tracing::{error, info, info_span, Instrument};

use crate::payload::{PayloadError, RepositoryWebhook, REPOSITORY_EVENT};

/// How one dispatched delivery ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// The handler completed and reached this decision.
    Handled(Outcome),
    /// The handler failed; the error has been logged.
    Failed,
}

/// Hands repository events to a [`RepositoryEventHandler`].
#[derive(Clone)]
pub struct Dispatcher {
    handler: Arc<dyn RepositoryEventHandler>,
}

impl Dispatcher {
    /// Creates a dispatcher that forwards to `handler`.
    pub fn new(handler: Arc<dyn RepositoryEventHandler>) -> Self {
        Self { handler }
    }

    /// Turns a raw delivery into an event to dispatch.
    ///
    /// Returns `Ok(None)` for events other than `repository` and for
    /// `repository` actions other than `created` and `publicized`.
    ///
    /// # Errors
    ///
    /// [`PayloadError`] if a `repository` payload cannot be parsed.
    pub fn route(event_name: &str, body: &[u8]) -> Result<Option<RepositoryEvent>, PayloadError> {
        if event_name != REPOSITORY_EVENT {
            return Ok(None);
        }
        RepositoryWebhook::from_slice(body)?.into_event()
    }

    /// Runs the handler for `event`, logging any failure.
    pub async fn dispatch(&self, delivery: DeliveryId, event: RepositoryEvent) -> DispatchResult {
        let span = info_span!(
            "delivery",
            delivery = %delivery,
            repository = %event.repository,
            action = %event.action,
        );

        async move {
            if event.action == RepositoryAction::Publicized {
                info!("New repo was publicized");
            }

            match self.handler.handle(&event).await {
                Ok(outcome) => {
                    info!(outcome = %outcome, "delivery handled");
                    DispatchResult::Handled(outcome)
                }
                Err(err) => {
                    error!(error = %err, "delivery failed");
                    DispatchResult::Failed
                }
            }
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
