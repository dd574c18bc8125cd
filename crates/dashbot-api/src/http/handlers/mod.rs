//! HTTP request handlers.

pub mod session;
pub mod webhook;
