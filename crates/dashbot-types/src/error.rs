use std::time::Duration;

use thiserror::Error;

use crate::session::{AnnouncementRef, ChannelId};

/// Errors that terminate a webhook request.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("invalid signature")]
    SignatureInvalid,

    #[error("invalid JSON: {0}")]
    PayloadMalformed(String),
}

/// Errors from durable session storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session file I/O error: {0}")]
    Io(String),

    #[error("session file is corrupt: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

/// Errors surfaced to the caller of a session command.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a session link is required to start a session")]
    MissingLink,

    #[error("no active session")]
    NoActiveSession,

    #[error("session commands are only accepted in channel {expected} (got {actual})")]
    WrongChannel {
        expected: ChannelId,
        actual: ChannelId,
    },

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Errors from delivering a notification. Logged, never propagated.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("destination channel {0} not found")]
    ChannelNotFound(ChannelId),

    #[error("announcement {0} not found")]
    AnnouncementNotFound(AnnouncementRef),

    #[error("delivery rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),
}

/// Startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
