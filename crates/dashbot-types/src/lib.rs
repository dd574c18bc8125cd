//! Shared domain types for dashbot.
//!
//! This crate contains the domain types used across the dashbot workspace:
//! the persisted session record, push notification intents derived from
//! GitHub webhooks, validated configuration, and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, thiserror, secrecy.

pub mod config;
pub mod error;
pub mod session;
pub mod webhook;
