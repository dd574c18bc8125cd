//! Discord message payload types.
//!
//! Only the subset of the Discord message object that dashbot sends or reads
//! back. Component `type`/`style` values are Discord's numeric codes.

use serde::{Deserialize, Serialize};

/// Action row container component.
pub const COMPONENT_ACTION_ROW: u8 = 1;
/// Button component.
pub const COMPONENT_BUTTON: u8 = 2;
/// Button style that opens a URL.
pub const BUTTON_STYLE_LINK: u8 = 5;

/// Discord rejects a message whose embed field value is longer than this
/// (in characters).
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Body for creating or editing a channel message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagePayload {
    pub embeds: Vec<Embed>,
    /// Serialized even when empty: `[]` on an edit removes existing buttons.
    pub components: Vec<ActionRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    /// Values over [`FIELD_VALUE_LIMIT`] are cut short and end with `…`.
    pub fn new(name: &str, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value: truncate_chars(value.into(), FIELD_VALUE_LIMIT),
            inline,
        }
    }
}

/// Cut `value` to at most `limit` characters, marking the cut with `…`.
pub fn truncate_chars(value: String, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value;
    }
    let mut cut: String = value.chars().take(limit.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    pub kind: u8,
    pub components: Vec<LinkButton>,
}

impl ActionRow {
    pub fn link(label: &str, url: &str) -> Self {
        Self {
            kind: COMPONENT_ACTION_ROW,
            components: vec![LinkButton {
                kind: COMPONENT_BUTTON,
                style: BUTTON_STYLE_LINK,
                label: label.to_string(),
                url: url.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkButton {
    #[serde(rename = "type")]
    pub kind: u8,
    pub style: u8,
    pub label: String,
    pub url: String,
}

/// The part of a created message we read back.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedMessage {
    /// Snowflake, sent as a decimal string.
    pub id: String,
}

/// Discord JSON error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub message: String,
}

/// `Unknown Channel`
pub const ERROR_UNKNOWN_CHANNEL: u32 = 10003;
/// `Unknown Message`
pub const ERROR_UNKNOWN_MESSAGE: u32 = 10008;
