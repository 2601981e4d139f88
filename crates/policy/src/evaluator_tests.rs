use super::*;
use crate::{RepositoryName, RepositoryOwner, RepositoryRef, UserLogin};

fn event(action: RepositoryAction, private: bool) -> RepositoryEvent {
    RepositoryEvent {
        action,
        repository: RepositoryRef::new(
            RepositoryOwner::new("issc29-GHfB").unwrap(),
            RepositoryName::new("test-pro").unwrap(),
        ),
        private,
        sender: UserLogin::new("issc29").unwrap(),
    }
}

fn config(yaml: &str) -> PolicyConfig {
    PolicyConfig::from_yaml_str(yaml).unwrap()
}

#[test]
fn test_publicized_with_conversions_disabled_is_skipped() {
    let outcome = evaluate(
        &event(RepositoryAction::Publicized, false),
        &config("enablePrivateToPublic: false"),
    );
    assert_eq!(outcome, Outcome::Skip(SkipReason::ConversionsDisabled));
}

#[test]
fn test_publicized_with_conversions_enabled_warns_in_monitor_mode() {
    let outcome = evaluate(
        &event(RepositoryAction::Publicized, false),
        &config("monitorOnly: true\nenablePrivateToPublic: true"),
    );
    assert_eq!(outcome, Outcome::Warn);
}

#[test]
fn test_created_ignores_conversion_flag() {
    for flag in ["true", "false"] {
        let outcome = evaluate(
            &event(RepositoryAction::Created, false),
            &config(&format!("monitorOnly: true\nenablePrivateToPublic: {flag}")),
        );
        assert_eq!(outcome, Outcome::Warn, "enablePrivateToPublic: {flag}");
    }
}

#[test]
fn test_excluded_repo_is_skipped_regardless_of_mode() {
    for mode in ["true", "false"] {
        let outcome = evaluate(
            &event(RepositoryAction::Created, false),
            &config(&format!(
                "monitorOnly: {mode}\nexcludeRepos: ['test-pro1', 'test-pro']"
            )),
        );
        assert_eq!(outcome, Outcome::Skip(SkipReason::Excluded), "monitorOnly: {mode}");
    }
}

#[test]
fn test_not_excluded_repo_is_evaluated() {
    let outcome = evaluate(
        &event(RepositoryAction::Created, false),
        &config("monitorOnly: true\nexcludeRepos: ['test-pro2', test-pro3]"),
    );
    assert_eq!(outcome, Outcome::Warn);
}

#[test]
fn test_private_repo_is_skipped() {
    let outcome = evaluate(&event(RepositoryAction::Created, true), &config(""));
    assert_eq!(outcome, Outcome::Skip(SkipReason::NotPublic));
}

#[test]
fn test_private_repo_is_skipped_even_when_publicized_and_enforcing() {
    let outcome = evaluate(
        &event(RepositoryAction::Publicized, true),
        &config("monitorOnly: false\nenablePrivateToPublic: true"),
    );
    assert_eq!(outcome, Outcome::Skip(SkipReason::NotPublic));
}

#[test]
fn test_conversion_gate_precedes_exclusion() {
    let outcome = evaluate(
        &event(RepositoryAction::Publicized, false),
        &config("excludeRepos: [test-pro]"),
    );
    assert_eq!(outcome, Outcome::Skip(SkipReason::ConversionsDisabled));
}

#[test]
fn test_monitor_mode_disabled_enforces() {
    let outcome = evaluate(
        &event(RepositoryAction::Created, false),
        &config("monitorOnly: false"),
    );
    assert_eq!(outcome, Outcome::Enforce);
    assert!(outcome.changes_visibility());
}

#[test]
fn test_defaults_warn_on_public_creation() {
    let outcome = evaluate(&event(RepositoryAction::Created, false), &PolicyConfig::default());
    assert_eq!(outcome, Outcome::Warn);
    assert!(!outcome.changes_visibility());
}
