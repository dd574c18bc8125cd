//! Infrastructure layer for dashbot.
//!
//! Contains implementations of the ports defined in `dashbot-core`: the
//! JSON session file, GitHub webhook signature checks, the Discord REST
//! dispatcher, and the environment-backed configuration loader.

pub mod config;
pub mod filesystem;
pub mod notify;
pub mod webhook;
