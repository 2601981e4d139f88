//! In-memory GitHub fake shared by the unit tests in this crate.

use std::sync::Mutex;

use async_trait::async_trait;
use base64::prelude::*;
use policy::{
    CodeRepository, FileContent, GitHubError, IssueNumber, IssueTracker, NewIssue,
    RepositoryAction, RepositoryEvent, RepositoryName, RepositoryOwner, RepositoryRef,
    RepositoryUpdate, UserLogin,
};

/// What the fake answers for the policy file.
pub enum FileResponse {
    /// The file exists with this (plain text) content.
    Found(String),
    /// The file exists but its content is this raw, already-encoded string.
    Raw(String),
    NotFound,
    Unreachable,
}

/// One recorded call, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetFile { repo: String, path: String },
    CreateIssue { repo: String, issue: NewIssue },
    UpdateRepository { repo: String, update: RepositoryUpdate },
}

pub struct FakeGitHub {
    file: FileResponse,
    fail_issue: bool,
    fail_update: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeGitHub {
    pub fn with_file(file: FileResponse) -> Self {
        Self {
            file,
            fail_issue: false,
            fail_update: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_yaml(yaml: &str) -> Self {
        Self::with_file(FileResponse::Found(yaml.to_string()))
    }

    pub fn failing_issue(mut self) -> Self {
        self.fail_issue = true;
        self
    }

    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than the config fetch.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::GetFile { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CodeRepository for FakeGitHub {
    async fn get_file_content(
        &self,
        repo: &RepositoryRef,
        path: &str,
    ) -> Result<FileContent, GitHubError> {
        self.record(Call::GetFile {
            repo: repo.to_string(),
            path: path.to_string(),
        });
        match &self.file {
            FileResponse::Found(text) => Ok(FileContent {
                path: path.to_string(),
                encoded: BASE64_STANDARD.encode(text),
            }),
            FileResponse::Raw(encoded) => Ok(FileContent {
                path: path.to_string(),
                encoded: encoded.clone(),
            }),
            FileResponse::NotFound => Err(GitHubError::NotFound {
                resource: format!("{repo}/{path}"),
            }),
            FileResponse::Unreachable => Err(GitHubError::Transport("connection refused".into())),
        }
    }

    async fn update_repository(
        &self,
        repo: &RepositoryRef,
        update: &RepositoryUpdate,
    ) -> Result<(), GitHubError> {
        self.record(Call::UpdateRepository {
            repo: repo.to_string(),
            update: update.clone(),
        });
        if self.fail_update {
            return Err(GitHubError::Api {
                status: 403,
                message: "Resource not accessible by integration".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl IssueTracker for FakeGitHub {
    async fn create_issue(
        &self,
        repo: &RepositoryRef,
        issue: &NewIssue,
    ) -> Result<IssueNumber, GitHubError> {
        self.record(Call::CreateIssue {
            repo: repo.to_string(),
            issue: issue.clone(),
        });
        if self.fail_issue {
            return Err(GitHubError::Api {
                status: 410,
                message: "Issues are disabled for this repo".into(),
            });
        }
        Ok(IssueNumber::new(1))
    }
}

pub fn repo_event(action: RepositoryAction, private: bool) -> RepositoryEvent {
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
