//! GitHub webhook payload schema and the notification intent derived from it.
//!
//! Only `push` events to branch refs produce a notification. The payload
//! schema below names the fields that matter; `head_commit` is optional
//! because GitHub omits it for branch deletions.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Prefix identifying a branch ref in push payloads.
pub const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Header carrying the HMAC-SHA256 signature of the body.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Header carrying the GitHub event type.
pub const EVENT_HEADER: &str = "x-github-event";

/// Largest delivery GitHub sends (25 MB).
pub const MAX_WEBHOOK_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Event type classification from the `X-GitHub-Event` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubEventKind {
    Push,
    Other(String),
    /// The header was absent; treated as an unknown event.
    Missing,
}

impl GitHubEventKind {
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => GitHubEventKind::Missing,
            Some("push") => GitHubEventKind::Push,
            Some(other) => GitHubEventKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for GitHubEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitHubEventKind::Push => write!(f, "push"),
            GitHubEventKind::Other(name) => write!(f, "{name}"),
            GitHubEventKind::Missing => write!(f, "<missing>"),
        }
    }
}

/// The subset of a GitHub `push` payload used for notifications.
#[derive(Debug, Clone, Deserialize)]
pub struct PushPayload {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub repository: PushRepository,
    #[serde(default)]
    pub head_commit: Option<HeadCommit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushRepository {
    pub name: String,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadCommit {
    pub message: String,
    pub url: String,
    pub author: CommitAuthor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
}

impl PushPayload {
    /// Build the notification intent, or `None` when there is no head commit
    /// (e.g. a branch deletion).
    pub fn to_intent(&self) -> Option<PushNotificationIntent> {
        let commit = self.head_commit.as_ref()?;
        Some(PushNotificationIntent {
            repo_name: self.repository.name.clone(),
            branch: branch_name(&self.git_ref).to_string(),
            commit_message: commit.message.clone(),
            commit_author: commit.author.name.clone(),
            commit_url: commit.url.clone(),
            repo_url: self.repository.html_url.clone(),
        })
    }
}

/// The last path segment of a ref (`refs/heads/release-1.2` -> `release-1.2`).
pub fn branch_name(git_ref: &str) -> &str {
    git_ref.rsplit('/').next().unwrap_or(git_ref)
}

/// A push notification to be rendered by the dispatcher.
///
/// Immutable; handed to the dispatcher exactly once per qualifying event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotificationIntent {
    pub repo_name: String,
    pub branch: String,
    pub commit_message: String,
    pub commit_author: String,
    pub commit_url: String,
    pub repo_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUSH_JSON: &str = r#"{
        "ref": "refs/heads/release-1.2",
        "repository": {"name": "dashboard", "html_url": "https://github.com/acme/dashboard"},
        "head_commit": {
            "message": "Fix flaky test",
            "url": "https://github.com/acme/dashboard/commit/abc123",
            "author": {"name": "Alice", "email": "alice@example.com"}
        },
        "pusher": {"name": "alice"}
    }"#;

    #[test]
    fn test_branch_name_last_segment() {
        assert_eq!(branch_name("refs/heads/release-1.2"), "release-1.2");
        assert_eq!(branch_name("refs/heads/main"), "main");
        assert_eq!(branch_name("main"), "main");
    }

    #[test]
    fn test_event_kind_from_header() {
        assert_eq!(GitHubEventKind::from_header(Some("push")), GitHubEventKind::Push);
        assert_eq!(
            GitHubEventKind::from_header(Some("ping")),
            GitHubEventKind::Other("ping".to_string())
        );
        assert_eq!(
            GitHubEventKind::from_header(Some("issues")),
            GitHubEventKind::Other("issues".to_string())
        );
        assert_eq!(GitHubEventKind::from_header(None), GitHubEventKind::Missing);
        assert_eq!(GitHubEventKind::from_header(Some("")), GitHubEventKind::Missing);
    }

    #[test]
    fn test_push_payload_to_intent() {
        let payload: PushPayload = serde_json::from_str(PUSH_JSON).unwrap();
        let intent = payload.to_intent().unwrap();
        assert_eq!(intent.repo_name, "dashboard");
        assert_eq!(intent.branch, "release-1.2");
        assert_eq!(intent.commit_message, "Fix flaky test");
        assert_eq!(intent.commit_author, "Alice");
        assert_eq!(intent.commit_url, "https://github.com/acme/dashboard/commit/abc123");
        assert_eq!(intent.repo_url, "https://github.com/acme/dashboard");
    }

    #[test]
    fn test_push_payload_without_head_commit() {
        let payload: PushPayload = serde_json::from_str(
            r#"{"ref":"refs/heads/old","repository":{"name":"r","html_url":"https://x"},"head_commit":null}"#,
        )
        .unwrap();
        assert!(payload.to_intent().is_none());
    }
}
