//! GitHub webhook event source.
//!
//! Binds an HTTP server, receives GitHub webhook payloads, and dispatches
//! `repository.created` and `repository.publicized` events to a
//! [`policy::RepositoryEventHandler`]. Every other event or action is
//! acknowledged and ignored.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Transport details and payload deserialization live here.
//! The [`policy`] crate sees only [`policy::RepositoryEvent`].
//!
//! ## Non-goals
//!
//! Webhook signature verification, delivery retries, and installation token
//! management are left to the deployment (a verifying ingress or proxy in
//! front of this server).

pub mod dispatcher;
pub mod payload;
pub mod server;

pub use dispatcher::{DispatchResult, Dispatcher};
pub use payload::{PayloadError, RepositoryWebhook};
pub use server::{router, serve, serve_listener, ServerError, WEBHOOK_PATH};
