//! Organization policy configuration.
//!
//! A [`PolicyConfig`] is always fully populated: the YAML document found in the
//! organization-wide settings repository (possibly empty) is overlaid onto the
//! built-in defaults by [`PolicyConfig::overlay`]. Keys the policy does not know
//! are preserved in [`PolicyConfig::extra`] so that other tooling sharing the
//! same file keeps working, but they never influence evaluation.
//!
//! ## YAML format
//!
//! ```yaml
//! monitorOnly: false
//! enablePrivateToPublic: true
//! ccList: "@my-org/security"
//! excludeRepos:
//!   - public-docs
//!   - website
//! ```

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::{ConfigError, RepositoryName};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Repository that holds organization-wide settings files.
pub const DEFAULT_ORG_WIDE_REPO_NAME: &str = "org-settings";

/// Path of the policy file inside [`DEFAULT_ORG_WIDE_REPO_NAME`].
pub const DEFAULT_CONFIG_PATH: &str = ".github/prevent-public-repos.yml";

const DEFAULT_PRIVATIZED_ISSUE_TITLE: &str = "[CRITICAL] Public Repos Disabled";
const DEFAULT_PRIVATIZED_ISSUE_BODY: &str = "NOTE: Public Repos are disabled for this organization! \
Repository was automatically converted to a Private Repo.\n\n";
const DEFAULT_MONITOR_ISSUE_TITLE: &str = "[CRITICAL] Public Repository Created";
const DEFAULT_MONITOR_ISSUE_BODY: &str =
    "Please note that this repository is publicly visible to the internet!\n\n";

// ---------------------------------------------------------------------------
// Config location
// ---------------------------------------------------------------------------

/// Where the policy file lives, relative to the owner of the event's repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    /// Name of the organization-wide settings repository.
    pub repository: RepositoryName,
    /// Path of the policy file inside that repository.
    pub path: String,
}

impl ConfigLocation {
    /// Builds a location from optional overrides.
    ///
    /// Blank overrides are treated as absent, so an exported-but-empty
    /// environment variable falls back to the default.
    pub fn with_overrides(repository: Option<&str>, path: Option<&str>) -> Self {
        let defaults = Self::default();
        let repository = repository
            .map(str::trim)
            .and_then(RepositoryName::new)
            .unwrap_or(defaults.repository);
        let path = path
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .unwrap_or(defaults.path);
        Self { repository, path }
    }
}

impl Default for ConfigLocation {
    fn default() -> Self {
        Self {
            repository: RepositoryName(DEFAULT_ORG_WIDE_REPO_NAME.to_string()),
            path: DEFAULT_CONFIG_PATH.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.repository, self.path)
    }
}

// ---------------------------------------------------------------------------
// Policy configuration
// ---------------------------------------------------------------------------

/// The resolved public-repository policy for one organization.
///
/// Immutable once resolved; one is built per webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyConfig {
    /// Only open an issue; never change visibility. YAML: `monitorOnly`.
    pub monitor_only: bool,

    /// React to private → public conversions. When `false`, `publicized`
    /// events are ignored entirely. YAML: `enablePrivateToPublic`.
    pub enable_private_to_public: bool,

    /// Title of the issue opened when a repository is made private.
    pub privatized_issue_title: String,

    /// Body template of the issue opened when a repository is made private.
    pub privatized_issue_body: String,

    /// Title of the issue opened in monitor-only mode.
    pub monitor_issue_title: String,

    /// Body template of the issue opened in monitor-only mode.
    pub monitor_issue_body: String,

    /// Space-separated mentions appended to every issue body. Empty means no
    /// extra mention line. YAML: `ccList`.
    pub cc_list: String,

    /// Repository names exempt from every policy action. YAML: `excludeRepos`.
    pub exclude_repos: BTreeSet<String>,

    /// Keys present in the YAML document that the policy does not use.
    pub extra: Mapping,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            monitor_only: true,
            enable_private_to_public: false,
            privatized_issue_title: DEFAULT_PRIVATIZED_ISSUE_TITLE.to_string(),
            privatized_issue_body: DEFAULT_PRIVATIZED_ISSUE_BODY.to_string(),
            monitor_issue_title: DEFAULT_MONITOR_ISSUE_TITLE.to_string(),
            monitor_issue_body: DEFAULT_MONITOR_ISSUE_BODY.to_string(),
            cc_list: String::new(),
            exclude_repos: BTreeSet::new(),
            extra: Mapping::new(),
        }
    }
}

impl PolicyConfig {
    /// Parses a policy document and overlays it onto the defaults.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Parse`] if `text` is not valid YAML.
    /// - [`ConfigError::NotAMapping`] if the top level is not a mapping.
    /// - [`ConfigError::InvalidValue`] if a known key has the wrong type.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let document = parse_document(text)?;
        Self::default().overlay(&document)
    }

    /// Overlays `document` onto `self`, key by key.
    ///
    /// A known key with a `null` value keeps the current value. Unknown keys are
    /// copied into [`PolicyConfig::extra`].
    pub fn overlay(mut self, document: &Mapping) -> Result<Self, ConfigError> {
        for (key, value) in document {
            let Some(name) = key.as_str() else {
                self.extra.insert(key.clone(), value.clone());
                continue;
            };

            if value.is_null() && is_known_key(name) {
                continue;
            }

            match name {
                "monitorOnly" => self.monitor_only = field(name, value)?,
                "enablePrivateToPublic" => self.enable_private_to_public = field(name, value)?,
                "privatizedIssueTitle" => self.privatized_issue_title = field(name, value)?,
                "privatizedIssueBody" => self.privatized_issue_body = field(name, value)?,
                "monitorIssueTitle" => self.monitor_issue_title = field(name, value)?,
                "monitorIssueBody" => self.monitor_issue_body = field(name, value)?,
                "ccList" => self.cc_list = field(name, value)?,
                "excludeRepos" => {
                    self.exclude_repos = field::<Vec<String>>(name, value)?.into_iter().collect()
                }
                _ => {
                    self.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(self)
    }

    /// Returns `true` if `name` is on the exclusion list.
    pub fn is_excluded(&self, name: &RepositoryName) -> bool {
        self.exclude_repos.contains(name.as_str())
    }
}

const KNOWN_KEYS: &[&str] = &[
    "monitorOnly",
    "enablePrivateToPublic",
    "privatizedIssueTitle",
    "privatizedIssueBody",
    "monitorIssueTitle",
    "monitorIssueBody",
    "ccList",
    "excludeRepos",
];

fn is_known_key(name: &str) -> bool {
    KNOWN_KEYS.contains(&name)
}

fn field<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T, ConfigError> {
    serde_yaml::from_value(value.clone()).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Parses `text` into a top-level mapping. An empty document is an empty mapping.
pub fn parse_document(text: &str) -> Result<Mapping, ConfigError> {
    if text.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(text)? {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        Value::Bool(_) => Err(ConfigError::NotAMapping { found: "boolean" }),
        Value::Number(_) => Err(ConfigError::NotAMapping { found: "number" }),
        Value::String(_) => Err(ConfigError::NotAMapping { found: "string" }),
        Value::Sequence(_) => Err(ConfigError::NotAMapping { found: "sequence" }),
        Value::Tagged(_) => Err(ConfigError::NotAMapping {
            found: "tagged value",
        }),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
