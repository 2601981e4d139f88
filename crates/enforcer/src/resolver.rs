//! Organization policy resolution.
//!
//! The policy file is read from the organization-wide settings repository that
//! belongs to the same owner as the event's repository. A missing file, or a
//! failure to reach GitHub at all, resolves to the built-in defaults. A file
//! that exists but cannot be decoded or parsed is an error.

use base64::prelude::*;
use policy::{
    CodeRepository, ConfigError, ConfigLocation, PolicyConfig, RepositoryOwner, RepositoryRef,
};
use tracing::{info, warn};

/// Fetches and resolves the policy for repositories owned by `owner`.
///
/// # Errors
///
/// - [`ConfigError::Decode`] if the file content is not base64-encoded UTF-8.
/// - [`ConfigError::Parse`], [`ConfigError::NotAMapping`] or
///   [`ConfigError::InvalidValue`] if the YAML is unusable.
pub async fn resolve_config(
    repository: &dyn CodeRepository,
    location: &ConfigLocation,
    owner: &RepositoryOwner,
) -> Result<PolicyConfig, ConfigError> {
    let config_repo = RepositoryRef::new(owner.clone(), location.repository.clone());
    info!(owner = %owner, location = %location, "Get config from: {owner}/{location}");

    let text = match repository
        .get_file_content(&config_repo, &location.path)
        .await
    {
        Ok(file) => decode_content(&file.encoded)?,
        Err(err) if err.is_not_found() => {
            info!(location = %location, "config file not found in {location}, using defaults");
            String::new()
        }
        Err(err) => {
            warn!(location = %location, error = %err, "config file could not be fetched, using defaults");
            String::new()
        }
    };

    PolicyConfig::from_yaml_str(&text)
}

/// Decodes GitHub's base64 file encoding into UTF-8 text.
///
/// Line breaks inside the encoded content are ignored.
pub fn decode_content(encoded: &str) -> Result<String, ConfigError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = BASE64_STANDARD
        .decode(compact)
        .map_err(|e| ConfigError::Decode {
            message: e.to_string(),
        })?;

    String::from_utf8(bytes).map_err(|e| ConfigError::Decode {
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
