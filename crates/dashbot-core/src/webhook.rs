//! GitHub webhook classification.
//!
//! Signature verification happens before this module is reached. Here a
//! verified body and its event header are turned into either a push
//! notification intent or a reason for doing nothing.

use serde_json::Value;

use dashbot_types::error::WebhookError;
use dashbot_types::webhook::{
    BRANCH_REF_PREFIX, GitHubEventKind, PushNotificationIntent, PushPayload,
};

/// What to do with a verified webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookDisposition {
    /// Hand the intent to the notification queue.
    Notify(PushNotificationIntent),
    /// Not an event we notify on (other event types, tag pushes).
    Ignored { reason: String },
    /// A branch push that cannot be rendered (no head commit, or missing
    /// fields).
    Skipped { reason: String },
}

/// Classify a verified delivery.
///
/// Only a body that is not JSON at all is an error. Everything else,
/// including pushes with missing fields, is acknowledged.
pub fn classify_event(
    event: &GitHubEventKind,
    body: &[u8],
) -> Result<WebhookDisposition, WebhookError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| WebhookError::PayloadMalformed(e.to_string()))?;

    if *event != GitHubEventKind::Push {
        return Ok(WebhookDisposition::Ignored {
            reason: format!("event '{event}' is not a push"),
        });
    }

    let git_ref = value.get("ref").and_then(Value::as_str).unwrap_or_default();
    if !git_ref.starts_with(BRANCH_REF_PREFIX) {
        return Ok(WebhookDisposition::Ignored {
            reason: format!("ref '{git_ref}' is not a branch"),
        });
    }

    let payload: PushPayload = match serde_json::from_value(value) {
        Ok(payload) => payload,
        Err(e) => {
            return Ok(WebhookDisposition::Skipped {
                reason: format!("push payload is incomplete: {e}"),
            });
        }
    };

    Ok(match payload.to_intent() {
        Some(intent) => WebhookDisposition::Notify(intent),
        None => WebhookDisposition::Skipped {
            reason: "push has no head commit".to_string(),
        },
    })
}
