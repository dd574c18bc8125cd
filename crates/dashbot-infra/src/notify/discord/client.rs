//! DiscordDispatcher -- [`NotificationDispatcher`] over the Discord REST API.
//!
//! The bot token is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the `Authorization` header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use dashbot_core::notify::NotificationDispatcher;
use dashbot_types::error::DispatchError;
use dashbot_types::session::{AnnouncementRef, ChannelId, SessionClosure, SessionRecord};
use dashbot_types::webhook::PushNotificationIntent;

use super::render;
use super::types::{
    ApiError, CreatedMessage, ERROR_UNKNOWN_CHANNEL, ERROR_UNKNOWN_MESSAGE, MessagePayload,
};

/// Posts notifications to a single Discord channel.
pub struct DiscordDispatcher {
    client: reqwest::Client,
    token: SecretString,
    base_url: String,
    channel_id: ChannelId,
    timeout: Duration,
}

/// What a 404 refers to.
enum Target {
    Channel,
    Message(AnnouncementRef),
}

impl DiscordDispatcher {
    pub fn new(token: SecretString, channel_id: ChannelId, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            token,
            base_url: dashbot_types::config::DEFAULT_DISCORD_API_BASE.to_string(),
            channel_id,
            timeout,
        }
    }

    /// Override the API base URL (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn messages_url(&self) -> String {
        format!("{}/channels/{}/messages", self.base_url, self.channel_id)
    }

    fn message_url(&self, message: AnnouncementRef) -> String {
        format!("{}/{}", self.messages_url(), message)
    }

    fn authorization(&self) -> String {
        format!("Bot {}", self.token.expose_secret())
    }

    async fn post_message(&self, payload: &MessagePayload) -> Result<CreatedMessage, DispatchError> {
        let response = self
            .client
            .post(self.messages_url())
            .header("Authorization", self.authorization())
            .json(payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = self.check_status(response, Target::Channel).await?;
        response
            .json::<CreatedMessage>()
            .await
            .map_err(|e| DispatchError::Transport(format!("failed to parse response: {e}")))
    }

    async fn check_status(
        &self,
        response: reqwest::Response,
        target: Target,
    ) -> Result<reqwest::Response, DispatchError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(not_found(self.channel_id, target, &body));
        }

        Err(DispatchError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> DispatchError {
        if e.is_timeout() {
            DispatchError::Timeout(self.timeout)
        } else {
            DispatchError::Transport(e.to_string())
        }
    }
}

/// Classify a 404 by Discord's JSON error code, falling back to the target.
fn not_found(channel_id: ChannelId, target: Target, body: &str) -> DispatchError {
    let code = serde_json::from_str::<ApiError>(body)
        .map(|e| e.code)
        .unwrap_or_default();

    match (target, code) {
        (Target::Message(message), ERROR_UNKNOWN_MESSAGE) => {
            DispatchError::AnnouncementNotFound(message)
        }
        (_, ERROR_UNKNOWN_CHANNEL) | (Target::Channel, _) => {
            DispatchError::ChannelNotFound(channel_id)
        }
        (Target::Message(message), _) => DispatchError::AnnouncementNotFound(message),
    }
}

impl NotificationDispatcher for DiscordDispatcher {
    async fn push_received(&self, intent: &PushNotificationIntent) -> Result<(), DispatchError> {
        self.post_message(&render::push_message(intent)).await?;
        tracing::info!(
            channel_id = %self.channel_id,
            repo = %intent.repo_name,
            branch = %intent.branch,
            "sent GitHub push notification"
        );
        Ok(())
    }

    async fn session_started(
        &self,
        record: &SessionRecord,
    ) -> Result<Option<AnnouncementRef>, DispatchError> {
        let created = self
            .post_message(&render::session_started_message(record))
            .await?;

        match created.id.parse::<u64>() {
            Ok(id) => Ok(Some(AnnouncementRef::new(id))),
            Err(e) => {
                tracing::warn!(id = %created.id, error = %e, "unexpected message id format");
                Ok(None)
            }
        }
    }

    async fn session_ended(&self, closure: &SessionClosure) -> Result<(), DispatchError> {
        self.post_message(&render::session_ended_message(closure))
            .await
            .map(|_| ())
    }

    async fn retract_announcement(
        &self,
        announcement: AnnouncementRef,
        session: &SessionRecord,
    ) -> Result<(), DispatchError> {
        let response = self
            .client
            .patch(self.message_url(announcement))
            .header("Authorization", self.authorization())
            .json(&render::retraction_message(session))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.check_status(response, Target::Message(announcement))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> DiscordDispatcher {
        DiscordDispatcher::new(
            SecretString::from("token-123".to_string()),
            ChannelId::new(1001),
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_urls() {
        let d = dispatcher().with_base_url("http://localhost:9999/api/");
        assert_eq!(d.messages_url(), "http://localhost:9999/api/channels/1001/messages");
        assert_eq!(
            d.message_url(AnnouncementRef::new(77)),
            "http://localhost:9999/api/channels/1001/messages/77"
        );
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(
            dispatcher().messages_url(),
            "https://discord.com/api/v10/channels/1001/messages"
        );
    }

    #[test]
    fn test_bot_authorization_header() {
        assert_eq!(dispatcher().authorization(), "Bot token-123");
    }

    #[test]
    fn test_not_found_classification() {
        let channel = ChannelId::new(1001);
        let message = AnnouncementRef::new(77);

        assert!(matches!(
            not_found(channel, Target::Message(message), r#"{"message":"Unknown Message","code":10008}"#),
            DispatchError::AnnouncementNotFound(m) if m == message
        ));
        assert!(matches!(
            not_found(channel, Target::Message(message), r#"{"message":"Unknown Channel","code":10003}"#),
            DispatchError::ChannelNotFound(c) if c == channel
        ));
        assert!(matches!(
            not_found(channel, Target::Channel, "not json"),
            DispatchError::ChannelNotFound(_)
        ));
        assert!(matches!(
            not_found(channel, Target::Message(message), ""),
            DispatchError::AnnouncementNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let d = dispatcher().with_base_url("http://127.0.0.1:9");
        let err = d.push_received(&PushNotificationIntent {
            repo_name: "r".to_string(),
            branch: "main".to_string(),
            commit_message: "m".to_string(),
            commit_author: "a".to_string(),
            commit_url: "https://example.com/c".to_string(),
            repo_url: "https://example.com/r".to_string(),
        })
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Transport(_) | DispatchError::Timeout(_)
        ));
    }
}
