//! GitHub webhook receiver.
//!
//! Verifies the `X-Hub-Signature-256` header against the raw body, classifies
//! the event, and hands qualifying pushes to the notification queue. The
//! response never waits on delivery: once a push is queued (or dropped
//! because the queue is full) GitHub gets `200 OK`.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;

use dashbot_core::webhook::{WebhookDisposition, classify_event};
use dashbot_types::error::WebhookError;
use dashbot_types::webhook::{EVENT_HEADER, GitHubEventKind, SIGNATURE_HEADER};

use crate::http::error::WebhookRejection;
use crate::state::AppState;

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// POST /webhook - Receive a GitHub webhook delivery.
pub async fn receive_github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, WebhookRejection> {
    if !state.verifier.verify(&body, header(&headers, SIGNATURE_HEADER)) {
        tracing::warn!(
            has_signature = headers.contains_key(SIGNATURE_HEADER),
            "rejected webhook with invalid signature"
        );
        return Err(WebhookError::SignatureInvalid.into());
    }

    let event = GitHubEventKind::from_header(header(&headers, EVENT_HEADER));
    let disposition = classify_event(&event, &body).inspect_err(|e| {
        tracing::warn!(%event, error = %e, "rejected webhook with malformed body");
    })?;

    match disposition {
        WebhookDisposition::Notify(intent) => {
            let (repo, branch) = (intent.repo_name.clone(), intent.branch.clone());
            match state.notifications.enqueue(intent) {
                Ok(()) => tracing::info!(%repo, %branch, "queued push notification"),
                Err(e) => tracing::error!(
                    %repo,
                    %branch,
                    error = %e,
                    "dropped push notification"
                ),
            }
        }
        WebhookDisposition::Ignored { reason } => {
            tracing::debug!(%event, %reason, "webhook ignored");
        }
        WebhookDisposition::Skipped { reason } => {
            tracing::info!(%event, %reason, "push notification skipped");
        }
    }

    Ok("OK")
}
