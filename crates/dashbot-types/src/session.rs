//! Live collaboration session types.
//!
//! A session is the single shared-link record tracked by dashbot: who started
//! it, who is in it, when it began, and which public announcement advertised
//! it. At most one session exists at a time.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Wall-clock format used for session timestamps (no offset suffix).
pub const SESSION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A Discord channel identifier (snowflake).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(u64);

impl ChannelId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to a previously posted public announcement.
///
/// Retained on the session record so the announcement's interactive
/// controls can be retracted when the session closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnouncementRef(u64);

impl AnnouncementRef {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnnouncementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The active session record.
///
/// Serializes to the on-disk shape
/// `{ link, participants, start_time, end_time, last_message_id }`.
/// `end_time` is never persisted as anything but `null`; ending a session
/// clears the record instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub link: String,
    /// Insertion-ordered; the first entry is the starter.
    pub participants: Vec<String>,
    /// Local wall-clock time in [`SESSION_TIME_FORMAT`].
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub last_message_id: Option<AnnouncementRef>,
}

impl SessionRecord {
    /// The participant who started the session.
    pub fn starter(&self) -> Option<&str> {
        self.participants.first().map(String::as_str)
    }
}

/// Lenient view of the session file as read from disk.
///
/// The file holds either an empty mapping (no session) or a record. Every
/// field is optional here so hand-edited or older files still load; a file
/// counts as an active session only when `link` is non-empty.
#[derive(Debug, Default, Deserialize)]
pub struct StoredSession {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub participants: Option<Vec<String>>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub last_message_id: Option<AnnouncementRef>,
}

impl StoredSession {
    /// Convert into a record, or `None` when the file describes no session.
    ///
    /// A missing `start_time` is kept as an empty string; closing such a
    /// session reports an unparseable duration rather than failing.
    pub fn into_record(self) -> Option<SessionRecord> {
        let link = self.link.filter(|l| !l.is_empty())?;
        Some(SessionRecord {
            link,
            participants: self.participants.unwrap_or_default(),
            start_time: self.start_time.unwrap_or_default(),
            end_time: self.end_time,
            last_message_id: self.last_message_id,
        })
    }
}

/// Whole hours and remaining whole minutes of a closed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDuration {
    pub hours: u64,
    pub minutes: u64,
}

impl SessionDuration {
    /// Floor-divide a non-negative number of seconds into hours and minutes.
    pub fn from_seconds(seconds: u64) -> Self {
        Self {
            hours: seconds / 3600,
            minutes: (seconds % 3600) / 60,
        }
    }
}

impl fmt::Display for SessionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: u64| if n == 1 { "" } else { "s" };
        write!(
            f,
            "{} hour{} {} minute{}",
            self.hours,
            plural(self.hours),
            self.minutes,
            plural(self.minutes)
        )
    }
}

/// Result of measuring a session's length at close time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DurationOutcome {
    Measured(SessionDuration),
    /// The end time precedes the start time (clock skew or an edited file).
    InvalidTimeRange,
    /// One of the timestamps could not be parsed.
    Unparseable { reason: String },
}

impl fmt::Display for DurationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationOutcome::Measured(d) => write!(f, "{d}"),
            DurationOutcome::InvalidTimeRange => write!(f, "invalid time range"),
            DurationOutcome::Unparseable { .. } => write!(f, "-"),
        }
    }
}

/// Summary of a session captured as it closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClosure {
    pub start_time: String,
    pub end_time: String,
    pub duration: DurationOutcome,
    pub link: String,
    pub participants: Vec<String>,
    pub last_message_id: Option<AnnouncementRef>,
}

impl SessionClosure {
    /// The session as it stood while it was active.
    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            link: self.link.clone(),
            participants: self.participants.clone(),
            start_time: self.start_time.clone(),
            end_time: None,
            last_message_id: self.last_message_id,
        }
    }
}

/// Identifies one `start` call within the running process.
///
/// Timestamps only resolve to the second, so two starts with the same link
/// can produce identical records; the token tells them apart. Never
/// persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StartToken(u64);

impl StartToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

/// Result of `start`: the new record and any active session it replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartOutcome {
    pub record: SessionRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displaced: Option<SessionRecord>,
    #[serde(skip)]
    pub token: StartToken,
}

/// Who issued a session command, and from where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandContext {
    pub channel_id: ChannelId,
    /// Display name of the issuing user.
    pub actor: String,
}

/// A session command as received from the command front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum SessionCommand {
    Start {
        #[serde(default)]
        link: Option<String>,
    },
    Status,
    End,
}

/// Successful output of a session command, for rendering by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum CommandOutput {
    Start(StartOutcome),
    Status(SessionRecord),
    End(SessionClosure),
}
