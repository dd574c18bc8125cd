//! Notification dispatcher implementations.
//!
//! [`ConfiguredDispatcher`] picks Discord or log-only output at startup so
//! the rest of the app can hold a single concrete dispatcher type.

pub mod discord;
pub mod log_only;

use dashbot_core::notify::NotificationDispatcher;
use dashbot_types::config::DashbotConfig;
use dashbot_types::error::DispatchError;
use dashbot_types::session::{AnnouncementRef, SessionClosure, SessionRecord};
use dashbot_types::webhook::PushNotificationIntent;

pub use self::discord::DiscordDispatcher;
pub use self::log_only::LogDispatcher;

pub enum ConfiguredDispatcher {
    Discord(DiscordDispatcher),
    Log(LogDispatcher),
}

impl ConfiguredDispatcher {
    /// Discord when a token is configured, otherwise log-only.
    pub fn from_config(config: &DashbotConfig) -> Self {
        match &config.discord_token {
            Some(token) => {
                tracing::info!(channel_id = %config.channel_id, "dispatching to Discord");
                ConfiguredDispatcher::Discord(
                    DiscordDispatcher::new(token.clone(), config.channel_id, config.dispatch_timeout)
                        .with_base_url(config.discord_api_base.clone()),
                )
            }
            None => {
                tracing::warn!("no Discord token configured; notifications are logged only");
                ConfiguredDispatcher::Log(LogDispatcher::new())
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConfiguredDispatcher::Discord(_) => "discord",
            ConfiguredDispatcher::Log(_) => "log",
        }
    }
}

impl NotificationDispatcher for ConfiguredDispatcher {
    async fn push_received(&self, intent: &PushNotificationIntent) -> Result<(), DispatchError> {
        match self {
            ConfiguredDispatcher::Discord(d) => d.push_received(intent).await,
            ConfiguredDispatcher::Log(d) => d.push_received(intent).await,
        }
    }

    async fn session_started(
        &self,
        record: &SessionRecord,
    ) -> Result<Option<AnnouncementRef>, DispatchError> {
        match self {
            ConfiguredDispatcher::Discord(d) => d.session_started(record).await,
            ConfiguredDispatcher::Log(d) => d.session_started(record).await,
        }
    }

    async fn session_ended(&self, closure: &SessionClosure) -> Result<(), DispatchError> {
        match self {
            ConfiguredDispatcher::Discord(d) => d.session_ended(closure).await,
            ConfiguredDispatcher::Log(d) => d.session_ended(closure).await,
        }
    }

    async fn retract_announcement(
        &self,
        announcement: AnnouncementRef,
        session: &SessionRecord,
    ) -> Result<(), DispatchError> {
        match self {
            ConfiguredDispatcher::Discord(d) => d.retract_announcement(announcement, session).await,
            ConfiguredDispatcher::Log(d) => d.retract_announcement(announcement, session).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashbot_types::session::ChannelId;
    use secrecy::SecretString;

    #[test]
    fn test_without_token_selects_log() {
        let config = DashbotConfig::with_channel(ChannelId::new(1));
        assert_eq!(ConfiguredDispatcher::from_config(&config).name(), "log");
    }

    #[test]
    fn test_with_token_selects_discord() {
        let mut config = DashbotConfig::with_channel(ChannelId::new(1));
        config.discord_token = Some(SecretString::from("t".to_string()));
        assert_eq!(ConfiguredDispatcher::from_config(&config).name(), "discord");
    }
}
