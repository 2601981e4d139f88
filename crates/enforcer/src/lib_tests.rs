use std::sync::Arc;

use super::*;
use crate::test_helpers::{repo_event, Call, FakeGitHub, FileResponse};
use policy::{PolicyAction, RepositoryAction, SkipReason};

fn enforcer(github: &Arc<FakeGitHub>) -> Enforcer {
    Enforcer::new(github.clone(), github.clone(), ConfigLocation::default())
}

#[tokio::test]
async fn test_missing_config_warns_with_defaults() {
    let github = Arc::new(FakeGitHub::with_file(FileResponse::NotFound));

    let outcome = enforcer(&github)
        .analyze(&repo_event(RepositoryAction::Created, false))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Warn);
    let mutations = github.mutations();
    assert_eq!(mutations.len(), 1);
    match &mutations[0] {
        Call::CreateIssue { issue, .. } => {
            assert_eq!(issue.title, "[CRITICAL] Public Repository Created");
            assert_eq!(
                issue.body,
                "Please note that this repository is publicly visible to the internet!\n\n\n\n/cc @issc29"
            );
        }
        other => panic!("unexpected call: {other:?}"),
    }
}

#[tokio::test]
async fn test_monitor_only_never_changes_visibility() {
    let github = Arc::new(FakeGitHub::with_yaml("monitorOnly: true\n"));

    let outcome = enforcer(&github)
        .analyze(&repo_event(RepositoryAction::Created, false))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Warn);
    assert!(!github
        .mutations()
        .iter()
        .any(|c| matches!(c, Call::UpdateRepository { .. })));
}

#[tokio::test]
async fn test_enforce_mode_fetches_config_then_issue_then_visibility() {
    let github = Arc::new(FakeGitHub::with_yaml("monitorOnly: false\n"));

    let outcome = enforcer(&github)
        .analyze(&repo_event(RepositoryAction::Created, false))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Enforce);
    let calls = github.calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(calls[0], Call::GetFile { .. }));
    assert!(matches!(calls[1], Call::CreateIssue { .. }));
    assert!(matches!(calls[2], Call::UpdateRepository { .. }));
}

#[tokio::test]
async fn test_excluded_repo_is_left_alone() {
    let github = Arc::new(FakeGitHub::with_yaml(
        "monitorOnly: false\nexcludeRepos: [test-pro]\n",
    ));

    let outcome = enforcer(&github)
        .analyze(&repo_event(RepositoryAction::Created, false))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Skip(SkipReason::Excluded));
    assert!(github.mutations().is_empty());
}

#[tokio::test]
async fn test_publicized_ignored_by_default() {
    let github = Arc::new(FakeGitHub::with_file(FileResponse::NotFound));

    let outcome = enforcer(&github)
        .analyze(&repo_event(RepositoryAction::Publicized, false))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Skip(SkipReason::ConversionsDisabled));
    assert!(github.mutations().is_empty());
}

#[tokio::test]
async fn test_malformed_config_takes_no_action() {
    let github = Arc::new(FakeGitHub::with_yaml("monitorOnly: false\n  - broken: [\n"));

    let err = enforcer(&github)
        .analyze(&repo_event(RepositoryAction::Created, false))
        .await
        .unwrap_err();

    match err {
        AnalyzeError::Config(config) => assert!(config.is_parse(), "unexpected: {config:?}"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(github.mutations().is_empty());
}

#[tokio::test]
async fn test_handler_reports_failed_actions() {
    let github = Arc::new(FakeGitHub::with_yaml("monitorOnly: false\n").failing_update());
    let handler: Arc<dyn RepositoryEventHandler> = Arc::new(enforcer(&github));

    let err = handler
        .handle(&repo_event(RepositoryAction::Created, false))
        .await
        .unwrap_err();

    match err {
        AnalyzeError::Actions(failures) => {
            assert_eq!(failures[0].action, PolicyAction::SetPrivate);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
