//! Public-repository policy domain.
//!
//! This crate contains every domain concept used to decide what happens when a
//! repository in an organization becomes public: the organization policy
//! configuration, the normalized repository event, the evaluation rules, the
//! notification issue composer, and the port traits through which GitHub is
//! reached. Infrastructure crates implement the traits defined here; they never
//! add policy rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`RepositoryName`, `UserLogin`, `DeliveryId`, etc.) |
//! | [`types`] | Events and GitHub request values (`RepositoryEvent`, `NewIssue`, etc.) |
//! | [`config`] | `PolicyConfig`, its defaults, and the YAML overlay |
//! | [`evaluator`] | The rule sequence producing an `Outcome` |
//! | [`compose`] | Notification issue title/body composition |
//! | [`github`] | GitHub port traits and `GitHubError` |
//! | [`handler`] | The event-handler seam used by the webhook host |
//! | [`errors`] | Configuration and execution error types |

pub mod compose;
pub mod config;
pub mod errors;
pub mod evaluator;
pub mod github;
pub mod handler;
pub mod identifiers;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use compose::{compose_body, compose_issue};
pub use config::{ConfigLocation, PolicyConfig, DEFAULT_CONFIG_PATH, DEFAULT_ORG_WIDE_REPO_NAME};
pub use errors::{ActionError, AnalyzeError, ConfigError, PolicyAction};
pub use evaluator::{evaluate, Outcome, SkipReason};
pub use github::{CodeRepository, GitHubError, IssueTracker};
pub use handler::RepositoryEventHandler;
pub use identifiers::{DeliveryId, IssueNumber, RepositoryName, RepositoryOwner, UserLogin};
pub use types::{
    FileContent, NewIssue, RepositoryAction, RepositoryEvent, RepositoryRef, RepositoryUpdate,
};
