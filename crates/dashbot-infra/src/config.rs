//! Configuration loader for dashbot.
//!
//! The CLI layer collects raw values (flags with environment fallbacks, see
//! `dashbot-api`) into [`ConfigSource`]; [`load_config`] validates them into
//! a [`DashbotConfig`]. A missing or non-numeric channel id is fatal; blank
//! secrets are treated as unset.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use dashbot_types::config::{
    DEFAULT_DISCORD_API_BASE, DEFAULT_DISPATCH_TIMEOUT_SECS, DEFAULT_PORT, DEFAULT_SESSION_FILE,
    DashbotConfig,
};
use dashbot_types::error::ConfigError;
use dashbot_types::session::ChannelId;

pub const CHANNEL_ID_KEY: &str = "DASHBOARD_CHANNEL_ID";
pub const DISPATCH_TIMEOUT_KEY: &str = "DISPATCH_TIMEOUT_SECS";
pub const DISCORD_API_BASE_KEY: &str = "DISCORD_API_BASE";

/// Unvalidated configuration values.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub discord_token: Option<String>,
    pub channel_id: Option<String>,
    pub webhook_secret: Option<String>,
    pub port: u16,
    pub session_file: PathBuf,
    pub discord_api_base: String,
    pub dispatch_timeout_secs: u64,
}

impl Default for ConfigSource {
    fn default() -> Self {
        Self {
            discord_token: None,
            channel_id: None,
            webhook_secret: None,
            port: DEFAULT_PORT,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            discord_api_base: DEFAULT_DISCORD_API_BASE.to_string(),
            dispatch_timeout_secs: DEFAULT_DISPATCH_TIMEOUT_SECS,
        }
    }
}

/// Validate raw values into the runtime configuration.
pub fn load_config(source: ConfigSource) -> Result<DashbotConfig, ConfigError> {
    let channel_id = parse_channel_id(source.channel_id.as_deref())?;

    if source.dispatch_timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            key: DISPATCH_TIMEOUT_KEY,
            reason: "must be at least 1 second".to_string(),
        });
    }

    let discord_api_base = source.discord_api_base.trim().trim_end_matches('/').to_string();
    if !(discord_api_base.starts_with("http://") || discord_api_base.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            key: DISCORD_API_BASE_KEY,
            reason: format!("'{discord_api_base}' is not an http(s) URL"),
        });
    }

    Ok(DashbotConfig {
        discord_token: non_blank(source.discord_token),
        channel_id,
        webhook_secret: non_blank(source.webhook_secret),
        port: source.port,
        session_file: source.session_file,
        discord_api_base,
        dispatch_timeout: Duration::from_secs(source.dispatch_timeout_secs),
    })
}

fn parse_channel_id(raw: Option<&str>) -> Result<ChannelId, ConfigError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::Missing(CHANNEL_ID_KEY))?;

    raw.parse::<u64>()
        .map(ChannelId::new)
        .map_err(|e| ConfigError::Invalid {
            key: CHANNEL_ID_KEY,
            reason: format!("'{raw}' is not a channel id: {e}"),
        })
}

fn non_blank(value: Option<String>) -> Option<SecretString> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn source(channel: &str) -> ConfigSource {
        ConfigSource {
            channel_id: Some(channel.to_string()),
            ..ConfigSource::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = load_config(source("123456789012345678")).unwrap();
        assert_eq!(config.channel_id, ChannelId::new(123_456_789_012_345_678));
        assert_eq!(config.port, 5000);
        assert_eq!(config.session_file, PathBuf::from("session.json"));
        assert_eq!(config.discord_api_base, "https://discord.com/api/v10");
        assert_eq!(config.dispatch_timeout, Duration::from_secs(10));
        assert!(config.discord_token.is_none());
        assert!(config.webhook_secret.is_none());
    }

    #[test]
    fn test_missing_channel_is_fatal() {
        let err = load_config(ConfigSource::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DASHBOARD_CHANNEL_ID")));

        let err = load_config(source("  ")).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn test_non_numeric_channel_is_fatal() {
        let err = load_config(source("dashboard")).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "DASHBOARD_CHANNEL_ID",
                ..
            }
        ));
    }

    #[test]
    fn test_blank_secrets_are_unset() {
        let config = load_config(ConfigSource {
            discord_token: Some(String::new()),
            webhook_secret: Some("   ".to_string()),
            ..source("1")
        })
        .unwrap();
        assert!(config.discord_token.is_none());
        assert!(config.webhook_secret.is_none());
    }

    #[test]
    fn test_secrets_are_kept() {
        let config = load_config(ConfigSource {
            discord_token: Some("bot-token".to_string()),
            webhook_secret: Some("hook-secret".to_string()),
            ..source("1")
        })
        .unwrap();
        assert_eq!(config.discord_token.unwrap().expose_secret(), "bot-token");
        assert_eq!(config.webhook_secret.unwrap().expose_secret(), "hook-secret");
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let err = load_config(ConfigSource {
            dispatch_timeout_secs: 0,
            ..source("1")
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "DISPATCH_TIMEOUT_SECS",
                ..
            }
        ));
    }

    #[test]
    fn test_api_base_is_normalized() {
        let config = load_config(ConfigSource {
            discord_api_base: "http://localhost:8080/api/".to_string(),
            ..source("1")
        })
        .unwrap();
        assert_eq!(config.discord_api_base, "http://localhost:8080/api");

        assert!(
            load_config(ConfigSource {
                discord_api_base: "discord.com".to_string(),
                ..source("1")
            })
            .is_err()
        );
    }
}
