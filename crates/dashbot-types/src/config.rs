//! Validated runtime configuration for dashbot.
//!
//! `DashbotConfig` is produced by `dashbot_infra::config::load_config` from
//! environment-backed CLI arguments. Secrets are held as [`SecretString`] and
//! never appear in `Debug` output.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::session::ChannelId;

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default path of the durable session file.
pub const DEFAULT_SESSION_FILE: &str = "session.json";

/// Default Discord REST API base URL.
pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Default upper bound on a single outbound delivery, in seconds.
pub const DEFAULT_DISPATCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct DashbotConfig {
    /// Bot credential. `None` selects the log-only dispatcher.
    pub discord_token: Option<SecretString>,
    /// Destination for notifications, and the only channel session
    /// commands are accepted from.
    pub channel_id: ChannelId,
    /// Shared HMAC secret. `None` rejects every webhook.
    pub webhook_secret: Option<SecretString>,
    pub port: u16,
    pub session_file: PathBuf,
    pub discord_api_base: String,
    pub dispatch_timeout: Duration,
}

impl DashbotConfig {
    /// Configuration with defaults for everything but the destination channel.
    pub fn with_channel(channel_id: ChannelId) -> Self {
        Self {
            discord_token: None,
            channel_id,
            webhook_secret: None,
            port: DEFAULT_PORT,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            discord_api_base: DEFAULT_DISCORD_API_BASE.to_string(),
            dispatch_timeout: Duration::from_secs(DEFAULT_DISPATCH_TIMEOUT_SECS),
        }
    }

    /// The socket address to bind (`0.0.0.0:<port>`).
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
