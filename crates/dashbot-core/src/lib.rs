//! Business logic and port trait definitions for dashbot.
//!
//! This crate defines the "ports" (repository, clock, and dispatcher traits)
//! that the infrastructure layer implements. It depends only on
//! `dashbot-types` -- never on `dashbot-infra` or any file/network crate.

pub mod clock;
pub mod notify;
pub mod repository;
pub mod session;
pub mod webhook;

#[cfg(test)]
pub(crate) mod testing;
