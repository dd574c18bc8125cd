//! CLI command definitions for the `dashbot` binary.
//!
//! Every serve option can also come from the environment (or a `.env` file
//! loaded before parsing), matching the variable names deployments already
//! use.

pub mod sign;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use dashbot_infra::config::ConfigSource;
use dashbot_observe::LogFormat;
use dashbot_types::config::{
    DEFAULT_DISCORD_API_BASE, DEFAULT_DISPATCH_TIMEOUT_SECS, DEFAULT_PORT, DEFAULT_SESSION_FILE,
};

/// GitHub push relay and live-share session tracker for a Discord dashboard.
#[derive(Parser)]
#[command(name = "dashbot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Detailed output (-v for debug, -vv for trace). Ignored when RUST_LOG is set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format: text or json.
    #[arg(long, global = true, env = "LOG_FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the webhook receiver and session API.
    Serve(ServeArgs),

    /// Print the X-Hub-Signature-256 value for a payload file.
    Sign(sign::SignArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Discord bot token. Without it, notifications are only logged.
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub discord_token: Option<String>,

    /// Dashboard channel: notification target and the only channel session
    /// commands are accepted from.
    #[arg(long = "channel-id", env = "DASHBOARD_CHANNEL_ID")]
    pub channel_id: Option<String>,

    /// Shared secret for GitHub webhook signatures. Without it, every
    /// webhook is rejected.
    #[arg(long, env = "GITHUB_WEBHOOK_SECRET", hide_env_values = true)]
    pub webhook_secret: Option<String>,

    /// Port to listen on (all interfaces).
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Path of the durable session file.
    #[arg(long, env = "SESSION_FILE", default_value = DEFAULT_SESSION_FILE)]
    pub session_file: PathBuf,

    /// Discord REST API base URL.
    #[arg(long, env = "DISCORD_API_BASE", default_value = DEFAULT_DISCORD_API_BASE)]
    pub discord_api_base: String,

    /// Upper bound on a single outbound notification, in seconds.
    #[arg(long, env = "DISPATCH_TIMEOUT_SECS", default_value_t = DEFAULT_DISPATCH_TIMEOUT_SECS)]
    pub dispatch_timeout_secs: u64,
}

impl From<ServeArgs> for ConfigSource {
    fn from(args: ServeArgs) -> Self {
        ConfigSource {
            discord_token: args.discord_token,
            channel_id: args.channel_id,
            webhook_secret: args.webhook_secret,
            port: args.port,
            session_file: args.session_file,
            discord_api_base: args.discord_api_base,
            dispatch_timeout_secs: args.dispatch_timeout_secs,
        }
    }
}
