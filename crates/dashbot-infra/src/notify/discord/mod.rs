//! Discord REST dispatcher.
//!
//! Posts embeds to the dashboard channel through the Discord HTTP API
//! (`/channels/{id}/messages`) using a bot token. No gateway connection is
//! held; every notification is a single REST call.

pub mod client;
pub mod render;
pub mod types;

pub use client::DiscordDispatcher;
