//! Embed rendering for each notification kind.

use dashbot_types::session::{SessionClosure, SessionRecord};
use dashbot_types::webhook::PushNotificationIntent;

use super::types::{ActionRow, Embed, EmbedField, MessagePayload, truncate_chars};

const COLOR_BLUE: u32 = 0x3498db;
const COLOR_RED: u32 = 0xe74c3c;
const COLOR_GREY: u32 = 0x95a5a6;

pub const SESSION_STARTED_TITLE: &str = "VS Code Live Share Session Started!";
pub const SESSION_ENDED_TITLE: &str = "Live Share Session Ended";

/// Commit messages are shortened before being wrapped in a link so the link
/// survives the field limit.
const COMMIT_MESSAGE_LIMIT: usize = 256;

/// Discord rejects empty field values.
fn or_placeholder(value: String, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}

fn participant_list(participants: &[String]) -> String {
    or_placeholder(participants.join(", "), "(none)")
}

pub fn push_message(intent: &PushNotificationIntent) -> MessagePayload {
    let subject = truncate_chars(intent.commit_message.clone(), COMMIT_MESSAGE_LIMIT);
    let last_commit = format!(
        "[{} by {}]({})",
        subject, intent.commit_author, intent.commit_url
    );

    MessagePayload {
        embeds: vec![Embed {
            title: "GitHub Repo Status".to_string(),
            description: None,
            color: COLOR_BLUE,
            fields: vec![
                EmbedField::new("Repo", intent.repo_name.clone(), false),
                EmbedField::new("Branch", intent.branch.clone(), true),
                EmbedField::new("Last Commit", last_commit, false),
            ],
        }],
        components: vec![ActionRow::link("View Repository", &intent.repo_url)],
    }
}

fn started_fields(record: &SessionRecord) -> Vec<EmbedField> {
    vec![
        EmbedField::new(
            "Started by",
            or_placeholder(record.starter().unwrap_or_default().to_string(), "-"),
            true,
        ),
        EmbedField::new("Start time", or_placeholder(record.start_time.clone(), "-"), true),
        EmbedField::new("Participants", participant_list(&record.participants), false),
    ]
}

pub fn session_started_message(record: &SessionRecord) -> MessagePayload {
    MessagePayload {
        embeds: vec![Embed {
            title: SESSION_STARTED_TITLE.to_string(),
            description: Some(
                "A collaboration session has started. Use the button below to join.".to_string(),
            ),
            color: COLOR_BLUE,
            fields: started_fields(record),
        }],
        components: vec![ActionRow::link("Join Session (LIVE)", &record.link)],
    }
}

pub fn session_ended_message(closure: &SessionClosure) -> MessagePayload {
    MessagePayload {
        embeds: vec![Embed {
            title: SESSION_ENDED_TITLE.to_string(),
            description: Some("The session has ended. Thanks for joining!".to_string()),
            color: COLOR_RED,
            fields: vec![
                EmbedField::new("Start time", or_placeholder(closure.start_time.clone(), "-"), true),
                EmbedField::new("End time", closure.end_time.clone(), true),
                EmbedField::new("Duration", closure.duration.to_string(), true),
                EmbedField::new("Participants", participant_list(&closure.participants), false),
            ],
        }],
        components: vec![ActionRow::link("Past Session Link", &closure.link)],
    }
}

/// Edit applied to the start announcement of `record` once that session is
/// over. The title is marked finished and the join button is removed; the
/// starter, start time, and participant fields stay.
pub fn retraction_message(record: &SessionRecord) -> MessagePayload {
    MessagePayload {
        embeds: vec![Embed {
            title: format!("{SESSION_STARTED_TITLE} (Finished)"),
            description: Some("This session has ended. See the summary below.".to_string()),
            color: COLOR_GREY,
            fields: started_fields(record),
        }],
        components: Vec::new(),
    }
}
